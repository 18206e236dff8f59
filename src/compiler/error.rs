use thiserror::Error;
use crate::compiler::ast::NodeKind;
use crate::compiler::lexer::LexerError;
use crate::compiler::parser::ParseError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Variable '{0}' does not exist")]
    UndefinedVariable(String),
    #[error("Cannot redeclare variable '{0}' in the same scope")]
    Redeclaration(String),
    #[error("Cannot reassign the value of non-mutable variable '{0}'")]
    AssignToConstant(String),
    #[error("Cannot assign to {0}; only identifiers are assignable")]
    InvalidAssignmentTarget(NodeKind),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Any failure between source text and a value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Lex error: {0}")]
    Lexer(#[from] LexerError),
    #[error("Parse error: {0}")]
    Parser(#[from] ParseError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}
