//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at setup):
//!     name + template + parameter types
//!     → matcher.rs (parse template → Pattern of segments)
//!     → route.rs (attach controllers, optional sub-router)
//!     → router.rs (push in registration order)
//!
//! Incoming Request (path, method)
//!     → request.rs (owns the scan cursor)
//!     → router.rs (attempt every route on a view of the rest of the path)
//!     → unique full match? advance cursor, collect parameters
//!     → sub-router? repeat on the remainder, merge parameters
//!     → invoke controllers, or return RouterError / NoControllerError
//! ```
//!
//! # Design Decisions
//! - Templates compile at construction; bad templates never reach matching
//! - Deterministic: ambiguous input is an error, not a first-match win
//! - Match progress is a value separate from the compiled pattern
//! - No regex in the hot path, one pass per route over the remaining input

pub mod error;
pub mod matcher;
pub mod request;
pub mod route;
pub mod router;

pub use error::{
    DispatchError, DispatchResult, NoControllerError, RouteConfigError, RouterError, TemplateError,
};
pub use matcher::{MatchState, Pattern, Segment, Step};
pub use request::{Method, Request, UnknownMethod};
pub use route::{Controller, Outcome, Route, RouteBuilder};
pub use router::{RouteMatch, Router};
