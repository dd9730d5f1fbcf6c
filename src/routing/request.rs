//! Request boundary type.
//!
//! # Responsibilities
//! - Carry the path and method handed over by the transport layer
//! - Own the scan cursor shared by a router and its sub-routers
//!
//! # Design Decisions
//! - The cursor is an explicit value; only a router that has chosen a unique
//!   winner moves it forward
//! - Methods are a closed enum, parsed case-insensitively

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::lexer::{Cursor, Scanner, TokenKinds};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Connect,
    Trace,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Connect => "CONNECT",
            Method::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown request method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "OPTIONS" => Ok(Method::Options),
            "CONNECT" => Ok(Method::Connect),
            "TRACE" => Ok(Method::Trace),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// A request path being routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    path: String,
    method: Method,
    cursor: Cursor,
}

impl Request {
    pub fn new(path: impl Into<String>, method: Method) -> Self {
        Self {
            path: path.into(),
            method,
            cursor: Cursor::default(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Scanner positioned at the first unconsumed character.
    pub fn scanner(&self, invalid: TokenKinds) -> Scanner<'_> {
        Scanner::resume(&self.path, self.cursor, invalid)
    }

    /// Commit consumption up to `cursor`. Never moves backwards.
    pub fn advance(&mut self, cursor: Cursor) {
        if cursor.offset > self.cursor.offset {
            self.cursor = cursor;
        }
    }

    pub fn rewind(&mut self) {
        self.cursor = Cursor::default();
    }

    pub fn remaining(&self) -> &str {
        &self.path[self.cursor.offset..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.offset >= self.path.len()
    }
}
