use std::fmt::{Display, Formatter};
use crate::compiler::lexer::TokenType;

/// Every kind of node the language knows about.
///
/// `CallExpr`, `UnaryExpr` and `FunctionDeclaration` are reserved for calls,
/// unary operators and functions. No node of those kinds can be built yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    NumericLiteral,
    Identifier,
    BinaryExpr,
    CallExpr,
    UnaryExpr,
    FunctionDeclaration,
    NullLiteral,
    VariableDeclaration,
    AssignmentExpr,
    Property,
    ObjectLiteral,
    ExpressionStatement,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    VariableDeclaration {
        mutable: bool,
        name: String,
        initializer: Option<Expr>,
    },
    Expression(Expr),
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Stmt::Expression(_) => NodeKind::ExpressionStatement,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn from_token_type(token_type: TokenType) -> Option<BinaryOperator> {
        match token_type {
            TokenType::Plus => Some(BinaryOperator::Add),
            TokenType::Minus => Some(BinaryOperator::Subtract),
            TokenType::Multiply => Some(BinaryOperator::Multiply),
            TokenType::Divide => Some(BinaryOperator::Divide),
            TokenType::Modulo => Some(BinaryOperator::Modulo),
            _ => None,
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => left / right,
            BinaryOperator::Modulo => left % right,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },
    Identifier(String),
    NumericLiteral(f64),
    NullLiteral,
    Object(Vec<Property>),
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Assignment { .. } => NodeKind::AssignmentExpr,
            Expr::Binary { .. } => NodeKind::BinaryExpr,
            Expr::Identifier(_) => NodeKind::Identifier,
            Expr::NumericLiteral(_) => NodeKind::NumericLiteral,
            Expr::NullLiteral => NodeKind::NullLiteral,
            Expr::Object(_) => NodeKind::ObjectLiteral,
        }
    }
}
