//! Cursor over a token stream.
//!
//! # Responsibilities
//! - Expose the current token without consuming it
//! - Step forward one token at a time
//! - Reject token kinds the caller configured as invalid
//!
//! # Design Decisions
//! - The check happens when a token is accepted, so the matcher sees the
//!   offending token before the scanner refuses to move past it
//! - Accepting at `End` is a no-op; the scanner never runs off the input

use thiserror::Error;

use crate::lexer::token::{Token, TokenKind, TokenKinds};
use crate::lexer::tokenizer::{Cursor, Tokenizer};

/// An input character whose kind is configured as invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid character {character:?} ({kind}) at position {position}")]
pub struct ScanError {
    pub kind: TokenKind,
    pub character: char,
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    tokens: Tokenizer<'a>,
    current: Token,
    cursor: Cursor,
    invalid: TokenKinds,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, invalid: TokenKinds) -> Self {
        Self::resume(input, Cursor::default(), invalid)
    }

    /// Scanner whose current token is the one at `cursor`.
    pub fn resume(input: &'a str, cursor: Cursor, invalid: TokenKinds) -> Self {
        let mut tokens = Tokenizer::resume(input, cursor);
        let current = tokens
            .next()
            .unwrap_or_else(|| Token::end(cursor.position));
        Self {
            tokens,
            current,
            cursor,
            invalid,
        }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn is_end(&self) -> bool {
        self.current.is_end()
    }

    /// Move past the current token.
    pub fn accept(&mut self) -> Result<(), ScanError> {
        if self.current.is_end() {
            return Ok(());
        }
        if self.invalid.contains(self.current.kind) {
            return Err(ScanError {
                kind: self.current.kind,
                character: self.current.character.unwrap_or_default(),
                position: self.current.position,
            });
        }

        self.cursor = self.tokens.cursor();
        self.current = self
            .tokens
            .next()
            .unwrap_or_else(|| Token::end(self.cursor.position));
        Ok(())
    }

    /// Cursor of the current token; feed it to [`Scanner::resume`] to pick up here.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn invalid(&self) -> TokenKinds {
        self.invalid
    }

    /// Unconsumed input, starting with the current token.
    pub fn remaining(&self) -> &'a str {
        &self.tokens.input()[self.cursor.offset..]
    }

    /// Check the rest of the input for invalid tokens without moving this scanner.
    pub fn validate_remaining(&self) -> Result<(), ScanError> {
        let mut probe = self.clone();
        while !probe.is_end() {
            probe.accept()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_and_accept() {
        let mut scanner = Scanner::new("/a", TokenKinds::empty());
        assert_eq!(scanner.current().kind, TokenKind::Slash);
        scanner.accept().unwrap();
        assert_eq!(scanner.current().character, Some('a'));
        scanner.accept().unwrap();
        assert!(scanner.is_end());
        scanner.accept().unwrap();
        assert!(scanner.is_end());
    }

    #[test]
    fn test_invalid_kind_rejected_on_accept() {
        let mut scanner = Scanner::new("a b", TokenKinds::request_invalid());
        scanner.accept().unwrap();
        assert_eq!(scanner.current().kind, TokenKind::Space);

        let err = scanner.accept().unwrap_err();
        assert_eq!(err.kind, TokenKind::Space);
        assert_eq!(err.position, 1);
        assert_eq!(err.to_string(), "Invalid character ' ' (SPACE) at position 1");
    }

    #[test]
    fn test_clone_is_independent_view() {
        let mut scanner = Scanner::new("/user/21", TokenKinds::request_invalid());
        for _ in 0..5 {
            scanner.accept().unwrap();
        }
        let mut view = scanner.clone();
        view.accept().unwrap();
        assert_eq!(scanner.current().kind, TokenKind::Slash);
        assert_eq!(view.current().character, Some('2'));
        assert_eq!(scanner.remaining(), "/21");

        let resumed = Scanner::resume("/user/21", view.cursor(), TokenKinds::empty());
        assert_eq!(resumed.remaining(), "21");
    }

    #[test]
    fn test_validate_remaining() {
        let scanner = Scanner::new("/ok/path", TokenKinds::request_invalid());
        assert!(scanner.validate_remaining().is_ok());

        let scanner = Scanner::new("/bad\tpath", TokenKinds::request_invalid());
        let err = scanner.validate_remaining().unwrap_err();
        assert_eq!(err.kind, TokenKind::Tab);
        assert_eq!(scanner.current().kind, TokenKind::Slash);
    }
}
