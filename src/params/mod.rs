//! Parameter typing subsystem.
//!
//! # Data Flow
//! ```text
//! Route construction:
//!     built-in types (int, integer, string)
//!     + per-route ParameterType definitions (override by name)
//!     → ParameterTypes registry
//!     → resolved once per `{name: type}` placeholder
//!
//! Matching:
//!     accumulated characters (all of an allowed kind)
//!     → ParameterType::cast
//!     → Parameter { name, type, value }
//!     → Parameters (ordered, merged across nested routers)
//! ```
//!
//! # Design Decisions
//! - Extension happens through registration, never by editing this module
//! - Casting an empty accumulation fails the match attempt, not the route
//! - Values are a closed enum so callers can match on them

pub mod parameter;
pub mod types;

pub use parameter::{DuplicateParameter, Parameter, Parameters, Value};
pub use types::{CastFn, ParameterType, ParameterTypeError, ParameterTypes};
