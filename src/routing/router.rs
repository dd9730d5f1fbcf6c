//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Resolve exactly one fully matching route per request segment
//! - Descend into sub-routers on the unconsumed rest of the path
//! - Merge parameters along the way and invoke controllers
//!
//! # Design Decisions
//! - Every route is attempted; ambiguity is an error, never settled by order
//! - Attempts run on scanner clones, the request cursor moves only for the winner
//! - The whole chain is resolved before any controller runs, so a failed
//!   dispatch has no side effects
//! - Explicit errors rather than a silent default route

use std::fmt;

use crate::lexer::TokenKinds;
use crate::params::{DuplicateParameter, Parameters};
use crate::routing::error::{DispatchResult, RouterError};
use crate::routing::request::Request;
use crate::routing::route::{Controller, Outcome, Route};

/// Ordered collection of routes.
pub struct Router<A = ()> {
    routes: Vec<Route<A>>,
    invalid: TokenKinds,
}

/// The unique route that fully matched a request, with its parameters.
pub struct RouteMatch<'r, A = ()> {
    route: &'r Route<A>,
    parameters: Parameters,
}

impl<'r, A> RouteMatch<'r, A> {
    pub fn route(&self) -> &'r Route<A> {
        self.route
    }

    pub fn name(&self) -> &'r str {
        self.route.name()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn into_parameters(self) -> Parameters {
        self.parameters
    }

    pub fn has_sub_router(&self) -> bool {
        self.route.has_sub_router()
    }

    pub fn sub_router(&self) -> Option<&'r Router<A>> {
        self.route.sub_router()
    }
}

impl<A> fmt::Debug for RouteMatch<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route", &self.route.name())
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl<A> Router<A> {
    /// Router whose request scanner rejects whitespace and control characters.
    pub fn new() -> Self {
        Self::with_invalid_kinds(TokenKinds::request_invalid())
    }

    pub fn with_invalid_kinds(invalid: impl Into<TokenKinds>) -> Self {
        Self {
            routes: Vec::new(),
            invalid: invalid.into(),
        }
    }

    pub fn push(&mut self, route: Route<A>) -> &mut Self {
        self.routes.push(route);
        self
    }

    pub fn routes(&self) -> &[Route<A>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the single route matching the request from its current cursor.
    ///
    /// On success the request cursor is moved past the consumed input.
    pub fn match_route(&self, request: &mut Request) -> Result<RouteMatch<'_, A>, RouterError> {
        let path = || request.path().to_string();
        if self.routes.is_empty() {
            return Err(RouterError::NoRoutes { path: path() });
        }

        let scanner = request.scanner(self.invalid);
        scanner
            .validate_remaining()
            .map_err(|source| RouterError::Scan { path: path(), source })?;

        let mut full = Vec::new();
        let mut incomplete = Vec::new();
        for route in &self.routes {
            let attempt = route
                .attempt(&scanner)
                .map_err(|source| RouterError::Scan { path: path(), source })?;

            tracing::trace!(
                route = %route.name(),
                remaining = %scanner.remaining(),
                outcome = ?attempt.outcome,
                "Route attempted"
            );

            match attempt.outcome {
                Outcome::Full => full.push((route, attempt)),
                Outcome::Incomplete => incomplete.push(route.name()),
                Outcome::Mismatch => {}
            }
        }

        if full.len() > 1 {
            let routes = full.iter().map(|(route, _)| route.name().to_string()).collect();
            return Err(RouterError::Ambiguous { path: path(), routes });
        }

        let Some((route, attempt)) = full.pop() else {
            return Err(match incomplete.as_slice() {
                [name] => RouterError::Incomplete {
                    path: path(),
                    route: name.to_string(),
                },
                _ => RouterError::NoMatch { path: path() },
            });
        };

        request.advance(attempt.cursor);
        tracing::debug!(
            route = %route.name(),
            path = %request.path(),
            remaining = %request.remaining(),
            "Route matched"
        );

        Ok(RouteMatch {
            route,
            parameters: attempt.parameters.into_iter().collect(),
        })
    }

    /// Resolve the request through all nested routers and invoke the controllers.
    ///
    /// Controllers run parent first. Each receives the parameters collected
    /// down to its own route; intermediate routes without a controller for the
    /// method are skipped, the final route must have one. Returns the merged
    /// parameters.
    pub fn run(&self, request: &mut Request, context: &mut A) -> DispatchResult<Parameters> {
        let mut chain = Vec::new();
        self.resolve(request, Parameters::new(), &mut chain)?;

        let method = request.method();
        let Some(((leaf, merged), parents)) = chain.split_last() else {
            return Err(RouterError::NoMatch {
                path: request.path().to_string(),
            }
            .into());
        };
        let leaf_controller = leaf.controller_for_method(method)?;

        for (route, parameters) in parents {
            if let Ok(controller) = route.controller_for_method(method) {
                invoke(controller, parameters, context);
            }
        }
        invoke(leaf_controller, merged, context);

        tracing::debug!(
            method = %method,
            path = %request.path(),
            route = %leaf.name(),
            depth = chain.len(),
            "Request dispatched"
        );
        Ok(merged.clone())
    }

    fn resolve<'r>(
        &'r self,
        request: &mut Request,
        inherited: Parameters,
        chain: &mut Vec<(&'r Route<A>, Parameters)>,
    ) -> Result<(), RouterError> {
        let matched = self.match_route(request)?;
        let mut merged = inherited;
        merged
            .merge(matched.parameters())
            .map_err(|DuplicateParameter(name)| RouterError::DuplicateParameters {
                path: request.path().to_string(),
                name,
            })?;

        let route = matched.route();
        chain.push((route, merged.clone()));

        match route.sub_router() {
            Some(sub_router) if !request.is_exhausted() => sub_router.resolve(request, merged, chain),
            _ => Ok(()),
        }
    }
}

fn invoke<A>(controller: &Controller<A>, parameters: &Parameters, context: &mut A) {
    (controller.as_ref())(parameters, context)
}

impl<A> Default for Router<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Router<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("invalid", &self.invalid)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;
    use crate::params::Value;
    use crate::routing::request::Method;

    fn route(name: &str, template: &str) -> Route<Vec<String>> {
        let label = name.to_string();
        Route::builder(name, template)
            .controller(Method::Get, move |_, calls: &mut Vec<String>| calls.push(label.clone()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_match_selects_single_full_match() {
        let mut router = Router::new();
        router
            .push(route("should_run", "/user/{id: integer}/name/{name: string}"))
            .push(route("should_not_run_1", "/foo"))
            .push(route("should_not_run_2", "/bar"));

        let mut request = Request::new("/user/21/name/foo", Method::Get);
        let matched = router.match_route(&mut request).unwrap();
        assert_eq!(matched.name(), "should_run");
        assert!(!matched.has_sub_router());
        assert_eq!(matched.parameters().value("id"), Some(&Value::Integer(21)));
        assert_eq!(matched.parameters().get("name").map(|p| p.type_name.as_str()), Some("string"));
        assert!(request.is_exhausted());
    }

    #[test]
    fn test_failed_attempts_leave_cursor_alone() {
        let mut router = Router::new();
        router.push(route("foo", "/foo"));

        let mut request = Request::new("/bar", Method::Get);
        assert!(router.match_route(&mut request).is_err());
        assert_eq!(request.remaining(), "/bar");
    }

    #[test]
    fn test_no_routes() {
        let router: Router = Router::new();
        let mut request = Request::new("/user/21", Method::Get);
        let err = router.match_route(&mut request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No match for request '/user/21' - No routes were specified."
        );
    }

    #[test]
    fn test_ambiguity_lists_candidates() {
        let mut router = Router::new();
        router.push(route("a", "/foo")).push(route("b", "/foo"));
        let mut request = Request::new("/foo", Method::Get);
        let err = router.match_route(&mut request).unwrap_err();
        assert_eq!(
            err,
            RouterError::Ambiguous {
                path: "/foo".into(),
                routes: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn test_two_incomplete_routes_is_plain_no_match() {
        let mut router = Router::new();
        router.push(route("a", "/foo")).push(route("b", "/fo"));
        let mut request = Request::new("/foobar", Method::Get);
        let err = router.match_route(&mut request).unwrap_err();
        assert_eq!(err, RouterError::NoMatch { path: "/foobar".into() });
    }

    #[test]
    fn test_invalid_characters_rejected_before_matching() {
        let mut router = Router::new();
        router.push(route("foo", "/foo"));
        let mut request = Request::new("/foo bar", Method::Get);
        let err = router.match_route(&mut request).unwrap_err();
        assert!(matches!(
            err,
            RouterError::Scan { ref source, .. } if source.kind == TokenKind::Space
        ));
    }

    #[test]
    fn test_run_invokes_parent_then_leaf() {
        let mut sub_router = Router::new();
        sub_router.push(route("child", "/{id: integer}"));

        let mut router = Router::new();
        router.push(
            Route::builder("parent", "/user")
                .controller(Method::Get, |params: &Parameters, calls: &mut Vec<String>| {
                    calls.push(format!("parent:{}", params.len()))
                })
                .sub_router(sub_router)
                .build()
                .unwrap(),
        );

        let mut calls = Vec::new();
        let mut request = Request::new("/user/21", Method::Get);
        let params = router.run(&mut request, &mut calls).unwrap();

        assert_eq!(calls, vec!["parent:0".to_string(), "child".to_string()]);
        assert_eq!(params.value("id"), Some(&Value::Integer(21)));
    }

    #[test]
    fn test_run_without_leaf_controller_invokes_nothing() {
        let mut router = Router::new();
        router.push(route("foo", "/foo"));

        let mut calls = Vec::new();
        let mut request = Request::new("/foo", Method::Post);
        let err = router.run(&mut request, &mut calls).unwrap_err();
        assert!(err.to_string().contains("no controller for method POST"));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_sub_router_parent_is_leaf_when_input_exhausted() {
        let mut sub_router = Router::new();
        sub_router.push(route("child", "/{id: integer}"));
        let mut router = Router::new();
        router.push(
            Route::builder("parent", "/user")
                .controller(Method::Get, |_, calls: &mut Vec<String>| calls.push("parent".into()))
                .sub_router(sub_router)
                .build()
                .unwrap(),
        );

        let mut calls = Vec::new();
        let mut request = Request::new("/user", Method::Get);
        let params = router.run(&mut request, &mut calls).unwrap();
        assert_eq!(calls, vec!["parent".to_string()]);
        assert!(params.is_empty());
    }
}
