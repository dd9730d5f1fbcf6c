//! Configuration schema definitions.
//!
//! This module defines the route table file format.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexer::{TokenKind, TokenKinds};

/// Root configuration: a tree of routes plus ambient settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Request scanner settings, shared by every router in the table.
    pub scanner: ScannerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Top-level routes, in registration order.
    pub routes: Vec<RouteConfig>,
}

/// Request scanner configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Token kinds rejected anywhere in a request path.
    pub invalid: Vec<TokenKind>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            invalid: TokenKinds::request_invalid().iter().collect(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (trace, debug, info, warn, error, or an EnvFilter directive).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// One route and, through `routes`, its sub-router.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging and error messages.
    pub name: String,

    /// Path template, e.g. `/user/{id: integer}`.
    pub path: String,

    /// Method name → controller target.
    #[serde(default)]
    pub controllers: BTreeMap<String, String>,

    /// Extra parameter types for this route's template.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterTypeConfig>,

    /// Token kinds rejected in the template text.
    #[serde(default = "default_template_invalid")]
    pub invalid: Vec<TokenKind>,

    /// Routes of the nested router that handles the rest of the path.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A custom parameter type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParameterTypeConfig {
    /// Token kinds a value may contain.
    pub tokens: Vec<TokenKind>,

    /// Named cast: `string` (default), `int` or `integer`.
    #[serde(default = "default_cast")]
    pub cast: String,
}

fn default_template_invalid() -> Vec<TokenKind> {
    TokenKinds::template_invalid().iter().collect()
}

fn default_cast() -> String {
    "string".to_string()
}
