//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check names: non-empty, unique among sibling routes
//! - Check controller methods (known, one target each) and parameter type definitions
//! - Check the log filter parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Template syntax is left to route compilation, which reports positions

use std::collections::HashSet;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::{RouteConfig, RouteTableConfig};
use crate::lexer::TokenKind;
use crate::routing::Method;

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route with path '{path}' has an empty name")]
    EmptyName { path: String },

    #[error("route name '{name}' is used more than once in the same router")]
    DuplicateName { name: String },

    #[error("route '{route}' has an empty path")]
    EmptyPath { route: String },

    #[error("route '{route}' has a controller for unknown method '{method}'")]
    UnknownMethod { route: String, method: String },

    #[error("route '{route}' has more than one controller for method {method}")]
    DuplicateMethod { route: String, method: String },

    #[error("route '{route}' has an empty controller target for method '{method}'")]
    EmptyTarget { route: String, method: String },

    #[error("route '{route}': parameter type '{type_name}' lists no tokens")]
    NoTokens { route: String, type_name: String },

    #[error("route '{route}': parameter type '{type_name}' cannot allow END")]
    EndToken { route: String, type_name: String },

    #[error("route '{route}': parameter type '{type_name}' has unknown cast '{cast}'")]
    UnknownCast {
        route: String,
        type_name: String,
        cast: String,
    },

    #[error("invalid log level '{0}'")]
    LogLevel(String),
}

/// Validate a whole route table.
pub fn validate_config(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }
    validate_routes(&config.routes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for route in routes {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                path: route.path.clone(),
            });
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName {
                name: route.name.clone(),
            });
        }
        validate_route(route, errors);
        validate_routes(&route.routes, errors);
    }
}

fn validate_route(route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    if route.path.is_empty() {
        errors.push(ValidationError::EmptyPath {
            route: route.name.clone(),
        });
    }

    let mut methods = HashSet::new();
    for (method, target) in &route.controllers {
        match method.parse::<Method>() {
            Ok(parsed) if !methods.insert(parsed) => {
                errors.push(ValidationError::DuplicateMethod {
                    route: route.name.clone(),
                    method: parsed.as_str().to_string(),
                });
            }
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::UnknownMethod {
                route: route.name.clone(),
                method: method.clone(),
            }),
        }
        if target.trim().is_empty() {
            errors.push(ValidationError::EmptyTarget {
                route: route.name.clone(),
                method: method.clone(),
            });
        }
    }

    for (type_name, ty) in &route.parameters {
        if ty.tokens.is_empty() {
            errors.push(ValidationError::NoTokens {
                route: route.name.clone(),
                type_name: type_name.clone(),
            });
        }
        if ty.tokens.contains(&TokenKind::End) {
            errors.push(ValidationError::EndToken {
                route: route.name.clone(),
                type_name: type_name.clone(),
            });
        }
        if !matches!(ty.cast.as_str(), "string" | "int" | "integer") {
            errors.push(ValidationError::UnknownCast {
                route: route.name.clone(),
                type_name: type_name.clone(),
                cast: ty.cast.clone(),
            });
        }
    }
}
