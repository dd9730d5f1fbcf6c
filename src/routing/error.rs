//! Routing error definitions.

use thiserror::Error;

use crate::lexer::ScanError;
use crate::params::ParameterTypeError;
use crate::routing::request::Method;

/// A path template that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,

    #[error("expected {expected} at position {position}")]
    Expected {
        expected: &'static str,
        position: usize,
    },

    #[error("unexpected '}}' at position {0}")]
    UnexpectedClose(usize),

    #[error("parameter '{0}' is declared more than once")]
    DuplicateName(String),

    #[error(transparent)]
    Type(#[from] ParameterTypeError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Raised while constructing a route; never during matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid route '{route}' with path '{template}': {source}")]
pub struct RouteConfigError {
    pub route: String,
    pub template: String,
    pub source: TemplateError,
}

/// Route resolution failures. Every variant carries the request path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("No match for request '{path}' - No routes were specified.")]
    NoRoutes { path: String },

    #[error("No match for request '{path}' - No route matches.")]
    NoMatch { path: String },

    #[error("No match for request '{path}' - Multiple possible routes.")]
    Ambiguous { path: String, routes: Vec<String> },

    #[error("No match for request '{path}' - Incomplete match with route '{route}'.")]
    Incomplete { path: String, route: String },

    #[error("No match for request '{path}' - Duplicate embedded parameters: '{name}'.")]
    DuplicateParameters { path: String, name: String },

    #[error("No match for request '{path}' - {source}.")]
    Scan { path: String, source: ScanError },
}

/// A matched route has no handler for the request method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Route '{route}' has no controller for method {method}")]
pub struct NoControllerError {
    pub route: String,
    pub method: Method,
}

/// Anything that can stop [`Router::run`](crate::routing::Router::run).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    NoController(#[from] NoControllerError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
