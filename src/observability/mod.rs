//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (route compiled, route attempted, route matched,
//!       request dispatched)
//!
//! Consumers:
//!     → logging.rs subscriber (fmt layer on stderr, EnvFilter)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - Per-route attempts log at trace, resolutions at debug

pub mod logging;

pub use logging::init_logging;
