//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouteTableConfig (validated, immutable)
//!     → dispatch.rs (compile routes → Router<Invocations>)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a new router
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Template errors surface when routes compile, before any request is served

pub mod dispatch;
pub mod loader;
pub mod schema;
pub mod validation;

pub use dispatch::{build_router, Invocation, Invocations};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, ParameterTypeConfig, RouteConfig, RouteTableConfig, ScannerConfig};
pub use validation::ValidationError;
