//! Route table → Router.
//!
//! # Responsibilities
//! - Compile every configured route, nested routes included
//! - Register per-route parameter types
//! - Turn named controller targets into controllers that record invocations
//!
//! # Design Decisions
//! - Controllers from a file have no behavior of their own; the caller reads
//!   the recorded invocations and acts on the targets
//! - All routers in a table share the configured request scanner settings

use serde::Serialize;

use crate::config::loader::ConfigError;
use crate::config::schema::{RouteConfig, RouteTableConfig};
use crate::lexer::TokenKinds;
use crate::params::{ParameterType, Parameters};
use crate::routing::{Method, Route, RouteConfigError, Router, TemplateError};

/// A controller target reached while running a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub route: String,
    pub target: String,
    pub parameters: Parameters,
}

/// Controller context of a router built from configuration.
pub type Invocations = Vec<Invocation>;

/// Build the top-level router of a validated route table.
pub fn build_router(config: &RouteTableConfig) -> Result<Router<Invocations>, ConfigError> {
    let invalid: TokenKinds = config.scanner.invalid.iter().copied().collect();
    let router = build_level(&config.routes, invalid)?;

    tracing::debug!(routes = router.len(), "Router built from configuration");
    Ok(router)
}

fn build_level(routes: &[RouteConfig], invalid: TokenKinds) -> Result<Router<Invocations>, ConfigError> {
    let mut router = Router::with_invalid_kinds(invalid);
    for route in routes {
        router.push(build_route(route, invalid)?);
    }
    Ok(router)
}

fn build_route(config: &RouteConfig, invalid: TokenKinds) -> Result<Route<Invocations>, ConfigError> {
    let mut builder = Route::builder(&config.name, &config.path)
        .invalid_kinds(config.invalid.iter().copied().collect::<TokenKinds>());

    for (type_name, ty) in &config.parameters {
        let allowed: TokenKinds = ty.tokens.iter().copied().collect();
        let ty = ParameterType::with_named_cast(type_name.as_str(), allowed, &ty.cast).map_err(
            |source| {
                ConfigError::Route(RouteConfigError {
                    route: config.name.clone(),
                    template: config.path.clone(),
                    source: TemplateError::Type(source),
                })
            },
        )?;
        builder = builder.parameter_type(ty);
    }

    for (method, target) in &config.controllers {
        let method: Method = method.parse().map_err(ConfigError::Method)?;
        let route = config.name.clone();
        let target = target.clone();
        builder = builder.controller(method, move |parameters, invocations: &mut Invocations| {
            invocations.push(Invocation {
                route: route.clone(),
                target: target.clone(),
                parameters: parameters.clone(),
            })
        });
    }

    if !config.routes.is_empty() {
        builder = builder.sub_router(build_level(&config.routes, invalid)?);
    }

    builder.build().map_err(ConfigError::Route)
}
