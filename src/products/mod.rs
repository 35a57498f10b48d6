//! The product resource: model, store, query helpers, validation and handlers.

pub mod handlers;
pub mod query;

mod model;
mod store;
mod validate;

pub use model::{Product, ProductFields, ProductId};
pub use store::Store;
pub use validate::{ValidateProduct, INVALID_PRODUCT};

use crate::method::Method;
use crate::router::Router;

/// Mounts the product routes under `base` (e.g. `/api/products`).
///
/// The literal `search` and `stats` routes go in before `{id}`.
pub fn routes(router: Router<Store>, base: &str) -> Router<Store> {
    let item = format!("{base}/{{id}}");
    router
        .on(Method::Get, &format!("{base}/search"), handlers::search)
        .on(Method::Get, &format!("{base}/stats"), handlers::stats)
        .on(Method::Get, base, handlers::list)
        .on_guarded(Method::Post, base, ValidateProduct, handlers::create)
        .on(Method::Get, &item, handlers::read)
        .on_guarded(Method::Put, &item, ValidateProduct, handlers::update)
        .on(Method::Delete, &item, handlers::delete)
}
