use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeValue {
    Null,
    Number(f64),
    Boolean(bool),
    Object(HashMap<String, RuntimeValue>),
}

impl RuntimeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            RuntimeValue::Null => "null",
            RuntimeValue::Number(_) => "number",
            RuntimeValue::Boolean(_) => "boolean",
            RuntimeValue::Object(_) => "object",
        }
    }
}

impl Display for RuntimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeValue::Null => f.write_str("null"),
            RuntimeValue::Number(value) => write_number(*value, f),
            RuntimeValue::Boolean(value) => write!(f, "{}", value),
            RuntimeValue::Object(properties) => {
                if properties.is_empty() {
                    return f.write_str("{}");
                }

                let mut keys: Vec<&String> = properties.keys().collect();
                keys.sort();

                f.write_str("{ ")?;

                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }

                    write!(f, "{}: {}", key, properties[key])?;
                }

                f.write_str(" }")
            },
        }
    }
}

fn write_number(value: f64, f: &mut Formatter<'_>) -> std::fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        // `{}` already drops the fractional part of integral floats
        write!(f, "{}", value)
    }
}
