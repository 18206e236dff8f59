use std::collections::HashMap;
use crate::compiler::ast::{BinaryOperator, Expr, Program, Property, Stmt};
use crate::compiler::environment::{Environment, Scope};
use crate::compiler::error::{RuntimeError, RuntimeResult};
use crate::compiler::value::RuntimeValue;
use crate::util;

/// Receives the values of expression statements that are echoed.
pub trait Output {
    fn emit(&mut self, value: &RuntimeValue);
}

impl Output for Vec<RuntimeValue> {
    fn emit(&mut self, value: &RuntimeValue) {
        self.push(value.clone());
    }
}

/// Prints each echoed value on its own line.
#[derive(Debug, Default)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn emit(&mut self, value: &RuntimeValue) {
        println!("{}", value);
    }
}

/// Whether expression statements send their value to the [`Output`].
///
/// Assignments are never echoed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Echo {
    Statements,
    Suppressed,
}

pub struct Evaluator<'output> {
    output: &'output mut dyn Output,
}

impl<'output> Evaluator<'output> {
    pub fn new(output: &'output mut dyn Output) -> Evaluator<'output> {
        Evaluator { output }
    }

    /// Runs every statement in order and returns the value of the last one.
    ///
    /// Statements that ran before a failing one keep their effects on `scope`.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn evaluate_program(&mut self, program: &Program, scope: &Scope, echo: Echo) -> RuntimeResult<RuntimeValue> {
        let mut last = RuntimeValue::Null;

        for stmt in &program.body {
            last = self.evaluate_statement(stmt, scope, echo)?;
        }

        Ok(last)
    }

    pub fn evaluate_statement(&mut self, stmt: &Stmt, scope: &Scope, echo: Echo) -> RuntimeResult<RuntimeValue> {
        tracing::trace!(kind = %stmt.kind(), "evaluating statement");

        match stmt {
            Stmt::VariableDeclaration { mutable, name, initializer } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate_expression(initializer, scope)?,
                    None => RuntimeValue::Null,
                };

                tracing::debug!(name = name.as_str(), mutable, "declaring variable");
                scope.borrow_mut().declare(name, value, *mutable)
            },
            Stmt::Expression(expr) => {
                let value = self.evaluate_expression(expr, scope)?;

                if echo == Echo::Statements && !matches!(expr, Expr::Assignment { .. }) {
                    self.output.emit(&value);
                }

                Ok(value)
            },
        }
    }

    pub fn evaluate_expression(&mut self, expr: &Expr, scope: &Scope) -> RuntimeResult<RuntimeValue> {
        util::ensure_sufficient_stack(|| match expr {
            Expr::NumericLiteral(value) => Ok(RuntimeValue::Number(*value)),
            Expr::NullLiteral => Ok(RuntimeValue::Null),
            Expr::Identifier(name) => Environment::get(scope, name),
            Expr::Binary { left, operator, right } => self.evaluate_binary(left, *operator, right, scope),
            Expr::Assignment { target, value } => self.evaluate_assignment(target, value, scope),
            Expr::Object(properties) => self.evaluate_object(properties, scope),
        })
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: BinaryOperator, right: &Expr, scope: &Scope) -> RuntimeResult<RuntimeValue> {
        let left = self.evaluate_expression(left, scope)?;
        let right = self.evaluate_expression(right, scope)?;

        match (&left, &right) {
            (RuntimeValue::Number(left), RuntimeValue::Number(right)) => Ok(RuntimeValue::Number(operator.apply(*left, *right))),
            // Operators are only defined for numbers; anything else yields null
            _ => {
                tracing::debug!(%operator, left = left.type_name(), right = right.type_name(), "non-numeric operands");
                Ok(RuntimeValue::Null)
            },
        }
    }

    fn evaluate_assignment(&mut self, target: &Expr, value: &Expr, scope: &Scope) -> RuntimeResult<RuntimeValue> {
        let name = match target {
            Expr::Identifier(name) => name,
            _ => return Err(RuntimeError::InvalidAssignmentTarget(target.kind())),
        };

        let value = self.evaluate_expression(value, scope)?;

        tracing::debug!(name = name.as_str(), "assigning variable");
        Environment::set(scope, name, value)
    }

    fn evaluate_object(&mut self, properties: &[Property], scope: &Scope) -> RuntimeResult<RuntimeValue> {
        let mut object = HashMap::with_capacity(properties.len());

        for property in properties {
            let value = match &property.value {
                Some(value) => self.evaluate_expression(value, scope)?,
                None => Environment::get(scope, &property.key)?,
            };

            object.insert(property.key.clone(), value);
        }

        Ok(RuntimeValue::Object(object))
    }
}
