//! Lex a kinetic-law formula into tokens for the parser

use super::math::MathError;
use super::token::Token;

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token>, MathError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.tokens.push(Token::Eof);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), MathError> {
        let c = self.advance();
        match c {
            '(' => self.tokens.push(Token::LeftParen),
            ')' => self.tokens.push(Token::RightParen),
            ',' => self.tokens.push(Token::Comma),
            '+' => self.tokens.push(Token::Plus),
            '-' => self.tokens.push(Token::Minus),
            '*' => self.tokens.push(Token::Star),
            '/' => self.tokens.push(Token::Slash),
            '^' => self.tokens.push(Token::Caret),
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),
            ' ' | '\r' | '\n' | '\t' => {}
            other => {
                return Err(MathError::InvalidCharacter {
                    character: other,
                    position: self.start,
                });
            }
        }
        Ok(())
    }

    fn read_number(&mut self) -> Result<(), MathError> {
        while self.peek().is_ascii_digit() || self.peek() == '.' {
            self.advance();
        }
        // exponent part: 1e-3, 2.5E+4
        if matches!(self.peek(), 'e' | 'E') {
            let next = self.peek_next();
            let signed = matches!(next, '+' | '-') && self.peek_at(2).is_ascii_digit();
            if next.is_ascii_digit() || signed {
                self.advance();
                if signed {
                    self.advance();
                }
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
            }
        }
        let text: String = self.source[self.start..self.current].iter().collect();
        let value = text
            .parse::<f64>()
            .map_err(|_| MathError::InvalidNumber(text.clone()))?;
        self.tokens.push(Token::Number(value));
        Ok(())
    }

    fn read_identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }
        let text: String = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::Identifier(text));
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_next(&self) -> char {
        self.peek_at(1)
    }

    fn peek_at(&self, offset: usize) -> char {
        self.source
            .get(self.current + offset)
            .copied()
            .unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}
