//! Typed URL-path routing engine.
//!
//! Templates such as `/user/{id: int}/name/{name: string}` are compiled into
//! routes; a [`Router`] resolves exactly one route per request, descends into
//! nested routers for the rest of the path, and hands the typed parameters to
//! the matched controllers.
//!
//! ```
//! use pathway::{Method, Request, Route, Router, Value};
//!
//! let mut router: Router<Vec<i64>> = Router::new();
//! router.push(
//!     Route::builder("user", "/user/{id: int}")
//!         .controller(Method::Get, |params, ids: &mut Vec<i64>| {
//!             ids.extend(params.value("id").and_then(Value::as_integer));
//!         })
//!         .build()
//!         .unwrap(),
//! );
//!
//! let mut ids = Vec::new();
//! router.run(&mut Request::new("/user/12", Method::Get), &mut ids).unwrap();
//! assert_eq!(ids, vec![12]);
//! ```

pub mod config;
pub mod lexer;
pub mod observability;
pub mod params;
pub mod routing;

pub use lexer::{ScanError, Scanner, Token, TokenKind, TokenKinds, Tokenizer};
pub use params::{Parameter, ParameterType, ParameterTypes, Parameters, Value};
pub use routing::{
    DispatchError, Method, NoControllerError, Request, Route, RouteConfigError, RouteMatch,
    Router, RouterError,
};
