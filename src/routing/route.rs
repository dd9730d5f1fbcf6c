//! A single route: compiled pattern, controllers, optional sub-router.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::lexer::{Cursor, ScanError, Scanner, TokenKinds};
use crate::params::{Parameter, ParameterType, ParameterTypes, Parameters};
use crate::routing::error::{NoControllerError, RouteConfigError};
use crate::routing::matcher::{MatchState, Pattern, Step};
use crate::routing::request::Method;
use crate::routing::router::Router;

/// Request handler. Receives the parameters extracted so far and the caller's context.
pub type Controller<A> = Arc<dyn Fn(&Parameters, &mut A) + Send + Sync>;

/// How far one route got over the remaining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Pattern consumed and the rest is empty or can go to the sub-router.
    Full,
    /// Pattern consumed but input remains and nothing can take it.
    Incomplete,
    Mismatch,
}

/// Result of driving a route over an independent view of the input.
#[derive(Debug, Clone)]
pub(crate) struct Attempt {
    pub outcome: Outcome,
    pub cursor: Cursor,
    pub parameters: Vec<Parameter>,
}

pub struct Route<A = ()> {
    name: String,
    pattern: Pattern,
    types: ParameterTypes,
    controllers: HashMap<Method, Controller<A>>,
    sub_router: Option<Router<A>>,
    state: MatchState,
    /// Position of the first token not yet fed to `state`.
    next_position: usize,
}

impl<A> Route<A> {
    pub fn builder(name: impl Into<String>, template: impl Into<String>) -> RouteBuilder<A> {
        RouteBuilder::new(name, template)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Types this route's template was compiled against.
    pub fn parameter_types(&self) -> &ParameterTypes {
        &self.types
    }

    /// Feed the scanner's current token to this route's own match state.
    ///
    /// Call once per token, accepting the token in between. A mismatch
    /// resets the state; a completed pattern answers `false` to any
    /// further token but keeps its parameters. A token from before the
    /// last one fed starts a new run, so a fresh scanner needs no `reset`.
    pub fn match_token(&mut self, scanner: &Scanner<'_>) -> bool {
        let token = scanner.current();
        if token.position < self.next_position {
            self.reset();
        }

        let step = self.state.step(&self.pattern, token);
        match step {
            Step::Consumed => self.next_position = token.position + 1,
            Step::Boundary => self.next_position = token.position,
            Step::Mismatch => self.next_position = 0,
            Step::Exhausted => {}
        }
        step.is_match()
    }

    /// Parameters finalized by the current or most recent match run.
    pub fn parameters(&self) -> &[Parameter] {
        self.state.parameters()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete(&self.pattern)
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.next_position = 0;
    }

    pub fn has_controller_for_method(&self, method: Method) -> bool {
        self.controllers.contains_key(&method)
    }

    pub fn controller_for_method(&self, method: Method) -> Result<&Controller<A>, NoControllerError> {
        self.controllers.get(&method).ok_or_else(|| NoControllerError {
            route: self.name.clone(),
            method,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.controllers.keys().copied()
    }

    pub fn has_sub_router(&self) -> bool {
        self.sub_router.is_some()
    }

    pub fn sub_router(&self) -> Option<&Router<A>> {
        self.sub_router.as_ref()
    }

    /// Drive a fresh match state over a copy of `scanner`.
    pub(crate) fn attempt(&self, scanner: &Scanner<'_>) -> Result<Attempt, ScanError> {
        let mut view = scanner.clone();
        let mut state = MatchState::new();

        while !state.is_complete(&self.pattern) {
            match state.step(&self.pattern, view.current()) {
                Step::Consumed => view.accept()?,
                Step::Boundary | Step::Exhausted => {}
                Step::Mismatch => {
                    return Ok(Attempt {
                        outcome: Outcome::Mismatch,
                        cursor: scanner.cursor(),
                        parameters: Vec::new(),
                    })
                }
            }
        }

        let outcome = if view.is_end() || self.sub_router.is_some() {
            Outcome::Full
        } else {
            Outcome::Incomplete
        };
        Ok(Attempt {
            outcome,
            cursor: view.cursor(),
            parameters: state.into_parameters(),
        })
    }
}

impl<A> fmt::Debug for Route<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.controllers.keys().map(|m| m.as_str()).collect();
        methods.sort_unstable();
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("template", &self.pattern.template())
            .field("methods", &methods)
            .field("sub_router", &self.sub_router)
            .finish()
    }
}

/// Collects route configuration; compiles the template in [`RouteBuilder::build`].
pub struct RouteBuilder<A = ()> {
    name: String,
    template: String,
    types: ParameterTypes,
    controllers: HashMap<Method, Controller<A>>,
    sub_router: Option<Router<A>>,
    invalid: TokenKinds,
}

impl<A> RouteBuilder<A> {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            types: ParameterTypes::builtin(),
            controllers: HashMap::new(),
            sub_router: None,
            invalid: TokenKinds::template_invalid(),
        }
    }

    pub fn controller<F>(mut self, method: Method, controller: F) -> Self
    where
        F: Fn(&Parameters, &mut A) + Send + Sync + 'static,
    {
        self.controllers.insert(method, Arc::new(controller));
        self
    }

    /// Register a parameter type for this route, overriding a built-in of the same name.
    pub fn parameter_type(mut self, ty: ParameterType) -> Self {
        self.types.register(ty);
        self
    }

    pub fn sub_router(mut self, router: Router<A>) -> Self {
        self.sub_router = Some(router);
        self
    }

    /// Token kinds rejected in the template text.
    pub fn invalid_kinds(mut self, invalid: impl Into<TokenKinds>) -> Self {
        self.invalid = invalid.into();
        self
    }

    pub fn build(self) -> Result<Route<A>, RouteConfigError> {
        let pattern = Pattern::compile(&self.template, &self.types, self.invalid).map_err(
            |source| RouteConfigError {
                route: self.name.clone(),
                template: self.template.clone(),
                source,
            },
        )?;

        tracing::trace!(
            route = %self.name,
            template = %self.template,
            segments = pattern.segments().len(),
            "Route compiled"
        );

        Ok(Route {
            name: self.name,
            pattern,
            types: self.types,
            controllers: self.controllers,
            sub_router: self.sub_router,
            state: MatchState::new(),
            next_position: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;
    use crate::params::Value;

    fn user_route() -> Route {
        Route::builder("test_route", "/user/{id: int}/name/{name: string}")
            .controller(Method::Get, |_, _| {})
            .build()
            .unwrap()
    }

    #[test]
    fn test_matching_route() {
        let mut route = user_route();
        let mut request = Scanner::new("/user/12/name/luther", TokenKinds::request_invalid());

        loop {
            assert!(route.match_token(&request));
            if request.is_end() {
                break;
            }
            request.accept().unwrap();
        }

        assert!(route.is_complete());
        assert_eq!(
            route.parameters(),
            &[
                Parameter::new("id", "int", 12),
                Parameter::new("name", "string", "luther"),
            ]
        );
        assert_eq!(route.parameters()[0].value.as_integer(), Some(12));
    }

    #[test]
    fn test_unmatching_route() {
        let mut route = user_route();
        let mut request = Scanner::new("/foo", TokenKinds::request_invalid());

        assert!(route.match_token(&request));
        request.accept().unwrap();
        assert!(!route.match_token(&request));

        assert!(route.parameters().is_empty());
        assert_eq!(route.state().segment_index(), 0);
        assert_eq!(route.state().accumulated(), "");
    }

    #[test]
    fn test_failure_discards_finalized_parameters() {
        let mut route = user_route();
        let mut request = Scanner::new("/user/12/nick", TokenKinds::request_invalid());
        while route.match_token(&request) {
            request.accept().unwrap();
        }
        assert!(route.parameters().is_empty());
        assert_eq!(*route.state(), MatchState::new());
    }

    #[test]
    fn test_new_scan_starts_a_new_run() {
        let mut route: Route = Route::builder("foo", "/foo").build().unwrap();

        for _ in 0..2 {
            let mut request = Scanner::new("/foo", TokenKinds::request_invalid());
            while !request.is_end() {
                assert!(route.match_token(&request));
                request.accept().unwrap();
            }
            assert!(route.is_complete());
            assert!(!route.match_token(&request));
        }
    }

    #[test]
    fn test_boundary_token_keeps_parameters_when_fed_again() {
        let mut route = user_route();
        let mut request = Scanner::new("/user/12/name/luther", TokenKinds::request_invalid());
        while !request.is_end() {
            assert!(route.match_token(&request));
            request.accept().unwrap();
        }
        assert!(route.match_token(&request));
        assert!(!route.match_token(&request));
        assert_eq!(route.parameters().len(), 2);
    }

    #[test]
    fn test_controller_lookup() {
        let route = user_route();
        assert!(route.has_controller_for_method(Method::Get));
        assert!(!route.has_controller_for_method(Method::Post));
        let Err(err) = route.controller_for_method(Method::Post) else {
            panic!("expected NoControllerError");
        };
        assert_eq!(err.route, "test_route");
        assert_eq!(err.method, Method::Post);
        assert!(!route.has_sub_router());
    }

    #[test]
    fn test_custom_type_and_template_scanner() {
        let label = ParameterType::with_named_cast(
            "label",
            [TokenKind::Alpha, TokenKind::OpenBracket, TokenKind::CloseBracket],
            "string",
        )
        .unwrap();
        let route: Route = Route::builder("labels", "/name/{name: label}")
            .parameter_type(label)
            .build()
            .unwrap();
        let attempt = route
            .attempt(&Scanner::new("/name/foo[]", TokenKinds::request_invalid()))
            .unwrap();
        assert_eq!(attempt.outcome, Outcome::Full);
        assert_eq!(attempt.parameters[0].value, Value::from("foo[]"));
        assert_eq!(attempt.parameters[0].type_name, "label");

        let err = Route::<()>::builder("spaced", "/{id: int}")
            .invalid_kinds([TokenKind::Space])
            .build()
            .unwrap_err();
        assert_eq!(err.route, "spaced");
    }

    #[test]
    fn test_attempt_outcomes() {
        let route: Route = Route::builder("foo", "/foo").build().unwrap();
        let scan = |path: &'static str| Scanner::new(path, TokenKinds::request_invalid());

        assert_eq!(route.attempt(&scan("/foo")).unwrap().outcome, Outcome::Full);
        assert_eq!(route.attempt(&scan("/foobar")).unwrap().outcome, Outcome::Incomplete);
        assert_eq!(route.attempt(&scan("/bar")).unwrap().outcome, Outcome::Mismatch);
        assert_eq!(route.attempt(&scan("/fo")).unwrap().outcome, Outcome::Mismatch);
    }
}
