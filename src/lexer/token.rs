//! Token kinds and character classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification label for a single input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Slash,
    OpenBrace,
    CloseBrace,
    Colon,
    OpenBracket,
    CloseBracket,
    Digit,
    Alpha,
    Underscore,
    Hyphen,
    Period,
    Space,
    Tab,
    NewLine,
    CarriageReturn,
    /// Anything the classification table does not name.
    Other,
    /// End-of-input sentinel. Never carries a character.
    End,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 17] = [
        TokenKind::Slash,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::Colon,
        TokenKind::OpenBracket,
        TokenKind::CloseBracket,
        TokenKind::Digit,
        TokenKind::Alpha,
        TokenKind::Underscore,
        TokenKind::Hyphen,
        TokenKind::Period,
        TokenKind::Space,
        TokenKind::Tab,
        TokenKind::NewLine,
        TokenKind::CarriageReturn,
        TokenKind::Other,
        TokenKind::End,
    ];

    /// Classify a character. Total: unknown characters map to `Other`.
    pub fn classify(c: char) -> Self {
        match c {
            '/' => TokenKind::Slash,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ':' => TokenKind::Colon,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '_' => TokenKind::Underscore,
            '-' => TokenKind::Hyphen,
            '.' => TokenKind::Period,
            ' ' => TokenKind::Space,
            '\t' => TokenKind::Tab,
            '\n' => TokenKind::NewLine,
            '\r' => TokenKind::CarriageReturn,
            c if c.is_ascii_digit() => TokenKind::Digit,
            c if c.is_ascii_alphabetic() => TokenKind::Alpha,
            _ => TokenKind::Other,
        }
    }

    /// Name used in configuration files and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Slash => "SLASH",
            TokenKind::OpenBrace => "OPEN_BRACE",
            TokenKind::CloseBrace => "CLOSE_BRACE",
            TokenKind::Colon => "COLON",
            TokenKind::OpenBracket => "OPEN_BRACKET",
            TokenKind::CloseBracket => "CLOSE_BRACKET",
            TokenKind::Digit => "DIGIT",
            TokenKind::Alpha => "ALPHA",
            TokenKind::Underscore => "UNDERSCORE",
            TokenKind::Hyphen => "HYPHEN",
            TokenKind::Period => "PERIOD",
            TokenKind::Space => "SPACE",
            TokenKind::Tab => "TAB",
            TokenKind::NewLine => "NEW_LINE",
            TokenKind::CarriageReturn => "CARRIAGE_RETURN",
            TokenKind::Other => "OTHER",
            TokenKind::End => "END",
        }
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of token kinds, stored as a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenKinds(u32);

impl TokenKinds {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= kind.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }

    /// Characters a request path may never contain.
    pub fn request_invalid() -> Self {
        Self::from_iter([
            TokenKind::Space,
            TokenKind::Tab,
            TokenKind::NewLine,
            TokenKind::CarriageReturn,
        ])
    }

    /// Characters a path template may never contain. Spaces are allowed
    /// because placeholders read `{name: type}`.
    pub fn template_invalid() -> Self {
        Self::from_iter([TokenKind::Tab, TokenKind::NewLine, TokenKind::CarriageReturn])
    }
}

impl FromIterator<TokenKind> for TokenKinds {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        let mut kinds = Self::empty();
        for kind in iter {
            kinds.insert(kind);
        }
        kinds
    }
}

impl<const N: usize> From<[TokenKind; N]> for TokenKinds {
    fn from(kinds: [TokenKind; N]) -> Self {
        kinds.into_iter().collect()
    }
}

impl fmt::Debug for TokenKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One classified character of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// `None` only for `End`.
    pub character: Option<char>,
    /// Character index within the input.
    pub position: usize,
}

impl Token {
    pub fn new(character: char, position: usize) -> Self {
        Self {
            kind: TokenKind::classify(character),
            character: Some(character),
            position,
        }
    }

    pub fn end(position: usize) -> Self {
        Self {
            kind: TokenKind::End,
            character: None,
            position,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}
