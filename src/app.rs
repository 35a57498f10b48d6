//! The catalog application: middleware order and route table.

use crate::config::Config;
use crate::error::ApiError;
use crate::health;
use crate::method::Method;
use crate::middleware::{ApiKeyAuth, RequestLogger};
use crate::products::{self, Store};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Builds the full router over `store`.
///
/// Order matters: the logger sees every request, the key check runs for
/// everything under the API prefix before any route is matched.
pub fn app(config: &Config, store: Store) -> Router<Store> {
    let router = Router::new(store)
        .wrap(RequestLogger)
        .wrap_scope(&config.api_prefix, ApiKeyAuth::new(config.api_key.clone()))
        .on(Method::Get, "/", hello)
        .on(Method::Get, "/healthz", health::liveness::<Store>)
        .on(Method::Get, "/readyz", health::readiness::<Store>);

    let base = format!("{}/products", config.api_prefix.trim_end_matches('/'));
    products::routes(router, &base)
}

// GET /
async fn hello(_req: Request, _store: Store) -> Result<Response, ApiError> {
    Ok(Response::html("Hello World"))
}
