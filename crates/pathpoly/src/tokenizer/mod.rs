//! Lexer shared by the path grammar, point lists and transform lists.
//!
//! Whitespace and commas separate tokens and are otherwise ignored. The tokenizer keeps at
//! most one token of look-ahead, which is all the path grammar needs to detect a coordinate
//! group that omits its repeated command letter.

use std::fmt;

use crate::error::TokenizerError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Eof,
    /// Maximal run of alphabetic characters.
    Command(String),
    Number(f64),
    /// Any other single symbol, e.g. the parentheses of a transform list.
    Char(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Command(c) => write!(f, "command {c:?}"),
            Token::Number(n) => write!(f, "number {n}"),
            Token::Char(c) => write!(f, "character {c:?}"),
        }
    }
}

pub struct Tokenizer<'input> {
    input: &'input str,
    pos: usize,
    peeked: Option<(usize, Token)>,
}

impl<'input> Tokenizer<'input> {
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            pos: 0,
            peeked: None,
        }
    }

    /// Byte offset of the next token that has not been consumed yet.
    pub fn offset(&mut self) -> usize {
        match &self.peeked {
            Some((start, _)) => *start,
            None => {
                self.skip_separators();
                self.pos
            }
        }
    }

    pub fn peek(&mut self) -> Result<&Token, TokenizerError> {
        let slot = match self.peeked.take() {
            Some(slot) => slot,
            None => {
                let start = self.offset();
                (start, self.lex()?)
            }
        };
        Ok(&self.peeked.insert(slot).1)
    }

    pub fn next_token(&mut self) -> Result<Token, TokenizerError> {
        match self.peeked.take() {
            Some((_, tok)) => Ok(tok),
            None => {
                self.skip_separators();
                self.lex()
            }
        }
    }

    pub fn expect(&mut self, c: char) -> Result<(), TokenizerError> {
        let offset = self.offset();
        match self.next_token()? {
            Token::Char(found) if found == c => Ok(()),
            other => Err(TokenizerError::Expected {
                expected: format!("{c:?}"),
                found: other.to_string(),
                offset,
            }),
        }
    }

    pub fn read_float(&mut self) -> Result<f64, TokenizerError> {
        let offset = self.offset();
        match self.next_token()? {
            Token::Number(v) => Ok(v),
            other => Err(TokenizerError::Expected {
                expected: "a number".to_string(),
                found: other.to_string(),
                offset,
            }),
        }
    }

    pub fn read_command(&mut self) -> Result<String, TokenizerError> {
        let offset = self.offset();
        match self.next_token()? {
            Token::Command(c) => Ok(c),
            other => Err(TokenizerError::Expected {
                expected: "a command".to_string(),
                found: other.to_string(),
                offset,
            }),
        }
    }

    pub fn next_is_number(&mut self) -> Result<bool, TokenizerError> {
        Ok(matches!(self.peek()?, Token::Number(_)))
    }

    /// Consumes the next token if it is the character `c`.
    pub fn next_is_char(&mut self, c: char) -> Result<bool, TokenizerError> {
        if matches!(self.peek()?, Token::Char(found) if *found == c) {
            self.peeked = None;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn is_eof(&mut self) -> Result<bool, TokenizerError> {
        Ok(matches!(self.peek()?, Token::Eof))
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == ',' {
                self.pos += c.len_utf8();
                continue;
            }
            break;
        }
    }

    fn lex(&mut self) -> Result<Token, TokenizerError> {
        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        if c.is_alphabetic() {
            let start = self.pos;
            while let Some(c) = self.peek_char() {
                if !c.is_alphabetic() {
                    break;
                }
                self.pos += c.len_utf8();
            }
            return Ok(Token::Command(self.input[start..self.pos].to_string()));
        }

        let starts_number = c.is_ascii_digit()
            || c == '-'
            || c == '+'
            || (c == '.' && self.peek_byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()));
        if starts_number {
            return self.lex_number().map(Token::Number);
        }

        self.pos += c.len_utf8();
        Ok(Token::Char(c))
    }

    fn lex_number(&mut self) -> Result<f64, TokenizerError> {
        let start = self.pos;
        let bytes = self.input.as_bytes();

        if matches!(self.peek_byte_at(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }

        let mut digits = 0usize;
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
            digits += 1;
        }
        // A second '.' terminates the literal: `0.5.5` is `0.5` followed by `.5`.
        if self.peek_byte_at(self.pos) == Some(b'.') {
            self.pos += 1;
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
                digits += 1;
            }
        }

        if digits > 0 && matches!(self.peek_byte_at(self.pos), Some(b'e' | b'E')) {
            let mut exp = self.pos + 1;
            if matches!(self.peek_byte_at(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            // Otherwise the 'e' is left for the next token.
            if self.peek_byte_at(exp).is_some_and(|b| b.is_ascii_digit()) {
                self.pos = exp;
                while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
            }
        }

        let literal = &self.input[start..self.pos];
        if digits == 0 {
            return Err(TokenizerError::MalformedNumber {
                literal: literal.to_string(),
                offset: start,
            });
        }
        literal
            .parse::<f64>()
            .map_err(|_| TokenizerError::MalformedNumber {
                literal: literal.to_string(),
                offset: start,
            })
    }
}

#[cfg(test)]
mod tests;
