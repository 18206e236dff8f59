use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::Chars;
use lazy_static::lazy_static;
use crate::util;

lazy_static! {
    static ref RESERVED: HashMap<&'static str, TokenType> = {
        let mut reserved = HashMap::new();
        reserved.insert("var", TokenType::Var);
        reserved.insert("mut", TokenType::Mut);
        reserved.insert("null", TokenType::Null);
        reserved
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    pub fn begin() -> TokenPos {
        TokenPos::new(1, 1)
    }
}

impl Display for TokenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {} column {}]", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenType {
    ParenthesisLeft, ParenthesisRight,
    BracketLeft, BracketRight,
    Comma, Colon,

    Assign,

    Plus, Minus,
    Multiply, Divide, Modulo,

    Identifier,
    Number,

    // Keywords
    Var,
    Mut,
    Null,

    // EOF
    Eof,
}

impl TokenType {
    pub fn is_additive(&self) -> bool {
        matches!(self, TokenType::Plus | TokenType::Minus)
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self, TokenType::Multiply | TokenType::Divide | TokenType::Modulo)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    source: String,
    start: TokenPos, end: TokenPos,
}

impl Token {
    pub fn new(token_type: TokenType, source: String, start: TokenPos, end: TokenPos) -> Token {
        Token {
            token_type, source,
            start, end
        }
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn source(&self) -> &str { &self.source }
    pub fn start(&self) -> &TokenPos { &self.start }
    pub fn end(&self) -> &TokenPos { &self.end }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Eof => f.write_str("end of input"),
            _ => write!(f, "`{}`", self.source),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("{0} Unexpected character '{1}'")]
    UnexpectedCharacter(TokenPos, char),
}

pub type LexerResult<T> = Result<T, LexerError>;

/// Turns source text into the full token sequence, terminated by a single [`TokenType::Eof`] token.
#[tracing::instrument(level = "debug", skip(source))]
pub fn tokenize(source: &str) -> LexerResult<Vec<Token>> {
    let source = strip_comments(source);
    let mut lexer = Lexer::new(&source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.scan_token()?;
        let eof = token.token_type() == TokenType::Eof;
        tokens.push(token);

        if eof {
            break;
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Blanks out comments so that the scanner never sees them.
///
/// Line comments (`//` up to the end of the line) go first, even when they sit inside a block comment;
/// block comments (`/*` up to the nearest `*/`) go second and don't nest. A `/*` without a closing
/// `*/` is left alone and scans as ordinary `/` and `*` tokens.
///
/// Every removed character except `\n` becomes a single space, so token positions stay the same.
pub fn strip_comments(source: &str) -> String {
    let mut without_lines = String::with_capacity(source.len());

    for line in source.split_inclusive('\n') {
        match line.find("//") {
            Some(start) => {
                without_lines.push_str(&line[..start]);
                blank(&line[start..], &mut without_lines);
            },
            None => without_lines.push_str(line),
        }
    }

    let mut stripped = String::with_capacity(without_lines.len());
    let mut rest = without_lines.as_str();

    while let Some(start) = rest.find("/*") {
        let end = match rest[start + 2..].find("*/") {
            Some(offset) => start + 2 + offset + 2,
            None => break,
        };

        stripped.push_str(&rest[..start]);
        blank(&rest[start..end], &mut stripped);
        rest = &rest[end..];
    }

    stripped.push_str(rest);
    stripped
}

fn blank(comment: &str, out: &mut String) {
    out.extend(comment.chars().map(|c| if c == '\n' { '\n' } else { ' ' }));
}

/// Scans source that has already gone through [`strip_comments`]; a `//` here is two divisions.
pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peek_1: Option<char>,

    start_index: usize,
    current_index: usize,

    start_pos: TokenPos,
    current_pos: TokenPos,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peek_1: None,

            start_index: 0,
            current_index: 0,

            start_pos: TokenPos::begin(),
            current_pos: TokenPos::begin(),
        }
    }

    pub fn scan_token(&mut self) -> LexerResult<Token> {
        loop {
            self.skip_whitespace();
            self.start_index = self.current_index;
            self.start_pos = self.current_pos;

            let c = match self.consume() {
                Some(c) => c,
                None => return Ok(self.make_token(TokenType::Eof)),
            };

            return match c {
                '(' => Ok(self.make_token(TokenType::ParenthesisLeft)),
                ')' => Ok(self.make_token(TokenType::ParenthesisRight)),
                '{' => Ok(self.make_token(TokenType::BracketLeft)),
                '}' => Ok(self.make_token(TokenType::BracketRight)),
                ',' => Ok(self.make_token(TokenType::Comma)),
                ':' => Ok(self.make_token(TokenType::Colon)),
                '=' => Ok(self.make_token(TokenType::Assign)),

                // Statement separators carry no meaning for the grammar
                ';' => continue,

                '+' => Ok(self.make_token(TokenType::Plus)),
                '-' => Ok(self.make_token(TokenType::Minus)),
                '*' => Ok(self.make_token(TokenType::Multiply)),
                '%' => Ok(self.make_token(TokenType::Modulo)),
                '/' => Ok(self.make_token(TokenType::Divide)),

                c if util::is_numeric(c) => Ok(self.scan_number()),
                c if util::is_alphabetic(c) => Ok(self.scan_identifier()),

                _ => Err(LexerError::UnexpectedCharacter(self.start_pos, c)),
            };
        }
    }

    fn scan_number(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_numeric(c) {
                break;
            }

            self.consume();
        }

        self.make_token(TokenType::Number)
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_alphabetic(c) {
                break;
            }

            self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        let token_type = RESERVED.get(name).copied().unwrap_or(TokenType::Identifier);

        self.make_token(token_type)
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token {
            token_type,
            source: self.input[self.start_index..self.current_index].to_owned(),

            start: self.start_pos, end: self.current_pos,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek_1.take().or_else(|| self.chars.next())?;
        self.current_index += c.len_utf8();

        if c == '\n' {
            self.current_pos.line += 1;
            self.current_pos.column = 1;
        } else {
            self.current_pos.column += 1;
        }

        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        if self.peek_1.is_none() {
            self.peek_1 = self.chars.next();
        }

        self.peek_1
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !util::is_whitespace(c) {
                return;
            }

            self.consume();
        }
    }
}

#[cfg(test)]
mod tests;
