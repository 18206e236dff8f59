use std::fmt::{Display, Formatter};
use crate::compiler::ast::{BinaryOperator, Expr, Program, Property, Stmt};
use crate::compiler::lexer::{Token, TokenPos, TokenType};
use crate::util;

/// Deepest expression nesting the parser accepts before giving up.
///
/// Both bracketing and operator chains count: `((1))` nests three levels and
/// so does `1 + 2 + 3`.
pub const MAX_NESTING_DEPTH: usize = 2048;

/// The grammar construct the parser was looking for when it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    VariableName,
    DeclarationAssign,
    ObjectKey,
    PropertyColon,
    PropertySeparator,
    ClosingBracket,
    ClosingParenthesis,
    Expression,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Expected::VariableName => "variable name after declaration keyword(s)",
            Expected::DeclarationAssign => "'=' after variable name",
            Expected::ObjectKey => "key in object literal",
            Expected::PropertyColon => "':' after object key",
            Expected::PropertySeparator => "',' or '}' after key/value pair",
            Expected::ClosingBracket => "'}' after object literal",
            Expected::ClosingParenthesis => "')' after expression",
            Expected::Expression => "expression",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{} Expected {expected}, found {found}", .found.start())]
    UnexpectedToken {
        found: Token,
        expected: Expected,
    },
    #[error("{} Non-mutable variable '{}' must be initialized", .name.start(), .name.source())]
    MissingInitializer {
        name: Token,
    },
    #[error("{} Value required for key '{}' in object literal (shorthand properties are unsupported)", .key.start(), .key.source())]
    ShorthandProperty {
        key: Token,
    },
    #[error("{} Expression nested deeper than {} levels", .token.start(), MAX_NESTING_DEPTH)]
    NestingTooDeep {
        token: Token,
    },
}

impl ParseError {
    /// The token the parser stopped at.
    pub fn token(&self) -> &Token {
        match self {
            ParseError::UnexpectedToken { found, .. } => found,
            ParseError::MissingInitializer { name } => name,
            ParseError::ShorthandProperty { key } => key,
            ParseError::NestingTooDeep { token } => token,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    /// `tokens` must end with an [`TokenType::Eof`] token, as produced by [`crate::compiler::lexer::tokenize`].
    pub fn new(mut tokens: Vec<Token>) -> Parser {
        if tokens.last().map(Token::token_type) != Some(TokenType::Eof) {
            let pos = tokens.last().map(|token| *token.end()).unwrap_or_else(TokenPos::begin);
            tokens.push(Token::new(TokenType::Eof, String::new(), pos, pos));
        }

        Parser {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    // Statement parsing

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn parse(&mut self) -> ParseResult<Program> {
        self.depth = 0;
        let mut body = Vec::new();

        while !self.is_eof() {
            body.push(self.parse_statement()?);
        }

        tracing::debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current().token_type() {
            TokenType::Var | TokenType::Mut => self.parse_variable_declaration(),
            _ => Ok(Stmt::Expression(self.parse_expression()?)),
        }
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<Stmt> {
        // The leading `var` or `mut` only starts the declaration; mutability comes from a `mut` after it
        self.consume();
        let mutable = self.matches(TokenType::Mut);

        let name = self.expect(TokenType::Identifier, Expected::VariableName)?;

        if !self.check(TokenType::Assign) {
            if !mutable {
                return Err(ParseError::MissingInitializer { name });
            }

            return Ok(Stmt::VariableDeclaration { mutable, name: name.source().to_owned(), initializer: None });
        }

        self.expect(TokenType::Assign, Expected::DeclarationAssign)?;
        let initializer = self.parse_expression()?;

        Ok(Stmt::VariableDeclaration { mutable, name: name.source().to_owned(), initializer: Some(initializer) })
    }

    // Expression parsing

    fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.enter()?;
        let expr = util::ensure_sufficient_stack(|| self.parse_assignment());
        self.depth -= 1;

        expr
    }

    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let target = self.parse_object()?;

        if self.matches(TokenType::Assign) {
            let value = self.parse_expression()?;
            return Ok(Expr::Assignment { target: Box::new(target), value: Box::new(value) });
        }

        Ok(target)
    }

    fn parse_object(&mut self) -> ParseResult<Expr> {
        if !self.matches(TokenType::BracketLeft) {
            return self.parse_additive();
        }

        let mut properties = Vec::new();

        while !self.is_eof() && !self.check(TokenType::BracketRight) {
            let key = self.expect(TokenType::Identifier, Expected::ObjectKey)?;

            if self.check(TokenType::Comma) || self.check(TokenType::BracketRight) {
                return Err(ParseError::ShorthandProperty { key });
            }

            self.expect(TokenType::Colon, Expected::PropertyColon)?;
            let value = self.parse_expression()?;
            properties.push(Property { key: key.source().to_owned(), value: Some(value) });

            if !self.check(TokenType::BracketRight) {
                self.expect(TokenType::Comma, Expected::PropertySeparator)?;
            }
        }

        self.expect(TokenType::BracketRight, Expected::ClosingBracket)?;
        Ok(Expr::Object(properties))
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.parse_multiplicative()?;

        while let Some(operator) = self.match_operator(TokenType::is_additive) {
            self.enter()?;
            let right = self.parse_multiplicative()?;

            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        self.depth = depth;
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut expr = self.parse_primary()?;

        while let Some(operator) = self.match_operator(TokenType::is_multiplicative) {
            self.enter()?;
            let right = self.parse_primary()?;

            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        self.depth = depth;
        Ok(expr)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        if self.matches(TokenType::Identifier) {
            return Ok(Expr::Identifier(self.previous().source().to_owned()));
        } else if self.matches(TokenType::Number) {
            let number = self.previous();

            return match number.source().parse::<f64>() {
                Ok(value) => Ok(Expr::NumericLiteral(value)),
                Err(_) => Err(ParseError::UnexpectedToken { found: number.clone(), expected: Expected::Expression }),
            };
        } else if self.matches(TokenType::ParenthesisLeft) {
            let expr = self.parse_expression()?;
            self.expect(TokenType::ParenthesisRight, Expected::ClosingParenthesis)?;

            return Ok(expr);
        } else if self.matches(TokenType::Null) {
            return Ok(Expr::NullLiteral);
        }

        Err(ParseError::UnexpectedToken { found: self.current().clone(), expected: Expected::Expression })
    }

    fn match_operator(&mut self, accept: fn(&TokenType) -> bool) -> Option<BinaryOperator> {
        let token_type = self.current().token_type();

        if !accept(&token_type) {
            return None;
        }

        let operator = BinaryOperator::from_token_type(token_type)?;
        self.consume();
        Some(operator)
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { token: self.current().clone() });
        }

        self.depth += 1;
        Ok(())
    }

    // Token stream

    fn current(&self) -> &Token {
        // The stream always ends with Eof and `consume` never steps past it
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn consume(&mut self) {
        if !self.is_eof() {
            self.current += 1;
        }
    }

    fn expect(&mut self, token_type: TokenType, expected: Expected) -> ParseResult<Token> {
        if self.check(token_type) {
            self.consume();
            return Ok(self.previous().clone());
        }

        Err(ParseError::UnexpectedToken { found: self.current().clone(), expected })
    }

    fn matches(&mut self, token_type: TokenType) -> bool { // Should be called "match", but that's a keyword
        if !self.check(token_type) {
            return false;
        }

        self.consume();
        true
    }

    #[inline]
    fn check(&self, token_type: TokenType) -> bool {
        self.current().token_type() == token_type
    }

    fn is_eof(&self) -> bool {
        self.current().token_type() == TokenType::Eof
    }
}
