//! Lazy token stream over a string.

use crate::lexer::token::Token;

/// Saved position within an input string.
///
/// `offset` is a byte offset and always lies on a character boundary;
/// `position` is the number of characters before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub offset: usize,
    pub position: usize,
}

/// Produces one token per character, then a single `End` token.
///
/// Cloning yields an independent stream at the same point; `restart` rewinds
/// to the beginning.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: Cursor,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::resume(input, Cursor::default())
    }

    /// Continue tokenizing from a previously saved cursor.
    pub fn resume(input: &'a str, cursor: Cursor) -> Self {
        Self {
            input,
            cursor,
            finished: false,
        }
    }

    pub fn restart(&mut self) {
        self.cursor = Cursor::default();
        self.finished = false;
    }

    /// Cursor of the next token this stream will yield.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn input(&self) -> &'a str {
        self.input
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        match self.input[self.cursor.offset..].chars().next() {
            Some(c) => {
                let token = Token::new(c, self.cursor.position);
                self.cursor.offset += c.len_utf8();
                self.cursor.position += 1;
                Some(token)
            }
            None => {
                self.finished = true;
                Some(Token::end(self.cursor.position))
            }
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}
