//! Shared utilities for integration testing.

use pathway::{Method, Route, Router};

/// Controller context that records the name of every route it is invoked for.
pub type Calls = Vec<String>;

/// A GET route whose controller records its own name.
pub fn recording_route(name: &str, template: &str) -> Route<Calls> {
    recording_builder(name, template).build().unwrap()
}

/// Like [`recording_route`], with a sub-router attached.
#[allow(dead_code)]
pub fn recording_parent(name: &str, template: &str, sub_router: Router<Calls>) -> Route<Calls> {
    recording_builder(name, template)
        .sub_router(sub_router)
        .build()
        .unwrap()
}

/// A router holding the given routes, in order.
pub fn router_of(routes: impl IntoIterator<Item = Route<Calls>>) -> Router<Calls> {
    let mut router = Router::new();
    for route in routes {
        router.push(route);
    }
    router
}

fn recording_builder(name: &str, template: &str) -> pathway::routing::RouteBuilder<Calls> {
    let label = name.to_string();
    Route::builder(name, template)
        .controller(Method::Get, move |_, calls: &mut Calls| calls.push(label.clone()))
}
