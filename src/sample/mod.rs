//! Example resource.
//!
//! A controller registers its own routes so tests can build the same router
//! without going through the full server bootstrap.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::hello;

/// Add this controller's routes to `router`.
pub fn register<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route("/v1/hello", get(hello))
}
