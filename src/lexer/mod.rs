//! Lexing subsystem.
//!
//! # Data Flow
//! ```text
//! raw path or template text
//!     → token.rs (classify one character → TokenKind)
//!     → tokenizer.rs (lazy, resumable token stream ending in END)
//!     → scanner.rs (current token, accept, invalid-kind rejection)
//!     → routing (template compilation and request matching)
//! ```
//!
//! # Design Decisions
//! - Classification never fails: unknown characters become `Other`
//! - Tokens are produced lazily; nothing is buffered beyond the current token
//! - A scanner is a cheap `Clone`, so callers get rewindable views for free
//! - Positions count characters, offsets count bytes

pub mod scanner;
pub mod token;
pub mod tokenizer;

pub use scanner::{ScanError, Scanner};
pub use token::{Token, TokenKind, TokenKinds};
pub use tokenizer::{Cursor, Tokenizer};
