pub mod util;
pub mod compiler;

use crate::compiler::ast::Program;
use crate::compiler::environment::{Environment, Scope};
use crate::compiler::error::{Error, RuntimeResult};
use crate::compiler::evaluator::{Echo, Evaluator, Output};
use crate::compiler::lexer::tokenize;
use crate::compiler::parser::Parser;
use crate::compiler::value::RuntimeValue;

/// Tokenizes and parses `source` into a [`Program`].
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);

    Ok(parser.parse()?)
}

/// Declares the built-in constants `true` and `false` in `scope`.
pub fn declare_globals(scope: &Scope) -> RuntimeResult<()> {
    let mut environment = scope.borrow_mut();

    environment.declare("true", RuntimeValue::Boolean(true), false)?;
    environment.declare("false", RuntimeValue::Boolean(false), false)?;

    Ok(())
}

/// A session: one root scope shared by every program run through it.
pub struct Interpreter {
    scope: Scope,
}

impl Interpreter {
    pub fn new() -> Result<Interpreter, Error> {
        let scope = Environment::new_global();
        declare_globals(&scope)?;

        Ok(Interpreter { scope })
    }

    /// Parses and evaluates `source` against the session scope.
    ///
    /// Declarations made before a failure stay in the scope.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, source: &str, output: &mut dyn Output, echo: Echo) -> Result<RuntimeValue, Error> {
        let program = parse(source)?;
        self.evaluate(&program, output, echo)
    }

    pub fn evaluate(&mut self, program: &Program, output: &mut dyn Output, echo: Echo) -> Result<RuntimeValue, Error> {
        Ok(Evaluator::new(output).evaluate_program(program, &self.scope, echo)?)
    }
}
