//! Radix-tree request router and the pipeline driver.
//!
//! One tree per HTTP method, O(path-length) lookup. Static segments win
//! over parameters, so `/products/search` is never captured by
//! `/products/{id}` whatever the registration order.
//!
//! Every request runs through the same fixed sequence:
//!
//! ```text
//! global / scoped middleware  →  route lookup  →  route guard  →  handler
//!            │                       │                │             │
//!            └──── Respond ──────────┼────────────────┼─────────────┼──→ response
//!            └──── Fail ─────────────┴── not found ───┴── Fail ─────┴──→ error::render
//! ```

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bytes::Bytes;
use futures::FutureExt;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use matchit::Router as MatchitRouter;
use tracing::error;

use crate::error::{self, ApiError};
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{self, BoxedMiddleware, Flow, Middleware};
use crate::request::Request;
use crate::response::Response;

struct Route<S> {
    handler: BoxedHandler<S>,
    guard: Option<BoxedMiddleware>,
}

/// A middleware stage plus the path prefix it is limited to, if any.
struct Layer {
    scope: Option<String>,
    stage: BoxedMiddleware,
}

impl Layer {
    /// `/api` covers `/api` and `/api/...`, never `/apiary`.
    fn applies_to(&self, path: &str) -> bool {
        match &self.scope {
            None => true,
            Some(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
                None => false,
            },
        }
    }
}

/// Largest request body [`Router::dispatch`] reads by default: 100 KiB.
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// The application router.
///
/// Holds the shared state `S` handed to every handler, the middleware
/// stages, and one radix tree per method. Build it once at startup and pass
/// it to [`Server::serve`](crate::Server::serve). Every builder method
/// returns `self` so registrations chain naturally.
pub struct Router<S> {
    state: S,
    body_limit: usize,
    layers: Vec<Layer>,
    routes: HashMap<Method, MatchitRouter<Arc<Route<S>>>>,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S) -> Self {
        Self { state, body_limit: DEFAULT_BODY_LIMIT, layers: Vec::new(), routes: HashMap::new() }
    }

    /// Caps the request body at `bytes`. Longer bodies are answered with
    /// `413` before any middleware runs.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Adds a stage that runs for every request, after the stages already added.
    pub fn wrap(mut self, stage: impl Middleware) -> Self {
        self.layers.push(Layer { scope: None, stage: Arc::new(stage) });
        self
    }

    /// Adds a stage that runs only for paths under `prefix`.
    ///
    /// Scoped stages run before route lookup, so unknown paths under the
    /// prefix are still subject to them.
    pub fn wrap_scope(mut self, prefix: &str, stage: impl Middleware) -> Self {
        self.layers.push(Layer { scope: Some(prefix.to_owned()), stage: Arc::new(stage) });
        self
    }

    /// Register a handler for a method + path pair. Path parameters use
    /// `{name}` syntax; `req.param("name")` retrieves them.
    pub fn on(self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.add(method, path, None, handler)
    }

    /// Like [`on`](Router::on), with a stage that runs after the route
    /// matched and before the handler.
    pub fn on_guarded(
        self,
        method: Method,
        path: &str,
        guard: impl Middleware,
        handler: impl Handler<S>,
    ) -> Self {
        self.add(method, path, Some(Arc::new(guard)), handler)
    }

    fn add(
        mut self,
        method: Method,
        path: &str,
        guard: Option<BoxedMiddleware>,
        handler: impl Handler<S>,
    ) -> Self {
        let route = Route { handler: handler.into_boxed_handler(), guard };
        self.routes
            .entry(method)
            .or_default()
            .insert(path, Arc::new(route))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    fn lookup(&self, method: &str, path: &str) -> Option<(Arc<Route<S>>, HashMap<String, String>)> {
        let method: Method = method.parse().ok()?;
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let route = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((route, params))
    }

    /// Collects the body of a hyper request, up to the body limit, and runs
    /// it through the pipeline.
    pub async fn dispatch<B>(&self, req: http::Request<B>) -> http::Response<Full<Bytes>>
    where
        B: hyper::body::Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (parts, body) = req.into_parts();
        let body = match Limited::new(body, self.body_limit).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.is::<LengthLimitError>() => {
                let err = ApiError::PayloadTooLarge("request entity too large".to_owned());
                return error::render(&err).into_http();
            }
            Err(e) => {
                error!("failed to read request body: {e}");
                let err = ApiError::MalformedBody("request body could not be read".to_owned());
                return error::render(&err).into_http();
            }
        };
        self.handle(Request::new(parts, body)).await.into_http()
    }

    /// Runs one request through middleware, routing and the handler.
    pub async fn handle(&self, mut req: Request) -> Response {
        let stages = self.layers.iter()
            .filter(|layer| layer.applies_to(req.path()))
            .map(|layer| &layer.stage);
        match middleware::run(stages, &req) {
            Flow::Continue => {}
            Flow::Respond(res) => return res,
            Flow::Fail(err) => return error::render(&err),
        }

        let Some((route, params)) = self.lookup(req.method(), req.path()) else {
            let err = ApiError::not_found(format!("Cannot {} {}", req.method(), req.path()));
            return error::render(&err);
        };
        req.set_params(params);

        match route.guard.as_ref().map(|guard| guard.handle(&req)) {
            None | Some(Flow::Continue) => {}
            Some(Flow::Respond(res)) => return res,
            Some(Flow::Fail(err)) => return error::render(&err),
        }

        let outcome = AssertUnwindSafe(route.handler.call(req, self.state.clone()))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ApiError::internal("handler panicked")));

        match outcome {
            Ok(res) => res,
            Err(err) => error::render(&err),
        }
    }
}
