//! Route handlers for `/api/products`.
//!
//! Handlers read or mutate the [`Store`] and either return a body or a typed
//! [`ApiError`]. They never format errors themselves.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;

use super::model::{Product, ProductId};
use super::query::{self, PageWindow};
use super::store::Store;
use super::validate::product_fields;
use crate::error::ApiError;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

pub const PRODUCT_NOT_FOUND: &str = "Product not found.";
pub const SEARCH_NAME_REQUIRED: &str = "Please provide a name to search.";

#[derive(Debug, Serialize)]
pub struct ProductPage {
    /// Matches before pagination.
    pub total: usize,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub total: usize,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub count_by_category: IndexMap<String, usize>,
}

/// Path ids are read leniently; anything that is not a positive integer
/// cannot name a product.
fn product_id(req: &Request) -> Result<ProductId, ApiError> {
    req.param("id")
        .and_then(query::parse_leading_int)
        .and_then(|id| ProductId::try_from(id).ok())
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
}

// GET /api/products?category=&page=&limit=
pub async fn list(req: Request, store: Store) -> Result<Json<ProductPage>, ApiError> {
    let mut products = store.list().await;
    if let Some(category) = req.query("category").filter(|c| !c.is_empty()) {
        products = query::filter_by_category(products, &category);
    }

    let page = req.query("page");
    let limit = req.query("limit");
    let window = PageWindow::from_query(page.as_deref(), limit.as_deref());

    Ok(Json(ProductPage {
        total: products.len(),
        page: window.page,
        limit: window.limit,
        products: window.apply(&products).to_vec(),
    }))
}

// POST /api/products
pub async fn create(req: Request, store: Store) -> Result<(Status, Json<Product>), ApiError> {
    let fields = product_fields(&req)?;
    let product = store.create(fields).await;
    Ok((Status::Created, Json(product)))
}

// GET /api/products/{id}
pub async fn read(req: Request, store: Store) -> Result<Json<Product>, ApiError> {
    let id = product_id(&req)?;
    store
        .find_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
}

// PUT /api/products/{id}
pub async fn update(req: Request, store: Store) -> Result<Json<Product>, ApiError> {
    let id = product_id(&req)?;
    let fields = product_fields(&req)?;
    store
        .update(id, fields)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
}

// DELETE /api/products/{id}
pub async fn delete(req: Request, store: Store) -> Result<Json<Product>, ApiError> {
    let id = product_id(&req)?;
    store
        .delete(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
}

// GET /api/products/search?name=
//
// A missing name is answered directly with `{ "error": ... }`, not through
// the error stage.
pub async fn search(req: Request, store: Store) -> Result<Response, ApiError> {
    let Some(name) = req.query("name").filter(|n| !n.is_empty()) else {
        let body = Json(json!({ "error": SEARCH_NAME_REQUIRED }));
        return Ok((Status::BadRequest, body).into_response());
    };

    let products = query::search_by_name(store.list().await, &name);
    Ok(Json(SearchResults { total: products.len(), products }).into_response())
}

// GET /api/products/stats
pub async fn stats(_req: Request, store: Store) -> Result<Json<CategoryStats>, ApiError> {
    let products = store.list().await;
    Ok(Json(CategoryStats { count_by_category: query::count_by_category(&products) }))
}
