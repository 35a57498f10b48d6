//! # catalog
//!
//! An in-memory product catalog served over HTTP.
//!
//! One resource, `/api/products`, with list (category filter plus
//! page/limit), search by name, per-category stats, and the usual
//! create/read/update/delete. Everything lives in process memory and is gone
//! on restart.
//!
//! ## How a request flows
//!
//! ```text
//! logger → api-key check (under /api) → route → validator (POST/PUT) → handler
//!                    │                                 │                  │
//!                 401 body                       ApiError ────────────────┴──→ error::render
//! ```
//!
//! Handlers return `Result<impl IntoResponse, ApiError>`. Only the terminal
//! error stage ([`error::render`]) turns an [`ApiError`] into a response, so
//! every failure has the same `{ "error", "message" }` shape.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use catalog::{app, Config, Server, Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), catalog::Error> {
//!     let config = Config::from_env();
//!     Server::bind(&config.addr)?
//!         .serve(app(&config, Store::new()))
//!         .await
//! }
//! ```

mod app;
mod config;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod error;
pub mod health;
pub mod middleware;
pub mod products;
pub mod telemetry;

pub use app::app;
pub use config::Config;
pub use error::{ApiError, Error};
pub use handler::Handler;
pub use method::Method;
pub use products::{Product, ProductFields, ProductId, Store};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response};
pub use router::{Router, DEFAULT_BODY_LIMIT};
pub use server::{serve_with_shutdown, Server};
pub use status::Status;
