//! Tokens of the kinetic-law formula language

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Comma,
    LeftParen,
    RightParen,
    Eof,
}
