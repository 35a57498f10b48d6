//! HTTP status codes as a typed enum.
//!
//! Only the codes the catalog actually sends. Use [`Status`] anywhere a
//! status code is accepted: `Response::status()`, `Response::with_status()`,
//! or paired with a body in a `(Status, body)` handler return.
//!
//! ```rust
//! use catalog::{Json, Response, Status};
//!
//! Response::status(Status::Unauthorized);
//! let _created = (Status::Created, Json(serde_json::json!({ "id": 1 })));
//! ```

#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                            // 200
    Created,                       // 201

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,                    // 400
    Unauthorized,                  // 401
    NotFound,                      // 404
    PayloadTooLarge,               // 413

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,           // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::BadRequest          => 400,
            Status::Unauthorized        => 401,
            Status::NotFound            => 404,
            Status::PayloadTooLarge     => 413,
            Status::InternalServerError => 500,
        }
    }
}
