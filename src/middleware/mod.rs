//! Middleware layer.
//!
//! Middleware runs before the handler and is the place for cross-cutting
//! concerns: request logging, authentication-header inspection, payload
//! validation. Each stage looks at the request and answers with a [`Flow`]:
//!
//! - [`Flow::Continue`] hands control to the next stage.
//! - [`Flow::Respond`] short-circuits with a finished response.
//! - [`Flow::Fail`] short-circuits with a typed error, which goes to the
//!   terminal error stage like any handler failure.
//!
//! The router drives the stages in a fixed order: global and path-scoped
//! stages in registration order, then the matched route's guard, then the
//! handler. See [`Router::wrap`](crate::Router::wrap).
//!
//! Built-in stages:
//! - [`RequestLogger`]: one log line per request
//! - [`ApiKeyAuth`]: shared-secret header check

mod api_key;
mod logger;

use std::sync::Arc;

pub use api_key::{ApiKeyAuth, API_KEY_HEADER};
pub use logger::RequestLogger;

use crate::error::ApiError;
use crate::request::Request;
use crate::response::Response;

/// What a middleware stage decided.
#[derive(Debug)]
pub enum Flow {
    Continue,
    Respond(Response),
    Fail(ApiError),
}

/// A request interceptor.
///
/// Stages never mutate the request. Nothing here is async: every stage the
/// service needs finishes without waiting on I/O.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: &Request) -> Flow;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// Runs `stages` in order and stops at the first one that does not continue.
///
/// The loop itself is silent: a `Fail` is logged by the error stage, a
/// `Respond` by nobody.
pub(crate) fn run<'a>(
    stages: impl IntoIterator<Item = &'a BoxedMiddleware>,
    req: &Request,
) -> Flow {
    for stage in stages {
        match stage.handle(req) {
            Flow::Continue => {}
            other => return other,
        }
    }
    Flow::Continue
}
