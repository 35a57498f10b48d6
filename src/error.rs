//! Error types.
//!
//! Two families live here. [`Error`] covers infrastructure failures: binding
//! to a port or accepting a connection. [`ApiError`] covers everything a
//! request can fail with; handlers and middleware return it and only the
//! terminal stage in [`render`] ever turns it into bytes.

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::response::Response;
use crate::status::Status;

/// The error type returned by the server's fallible operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// A handled request failure.
///
/// Each variant maps to one status code and one kind name. The kind name is
/// what clients see in the `error` field of the body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// The body was present but was not JSON.
    #[error("{0}")]
    MalformedBody(String),

    /// The body ran past the router's size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Anything unclassified. The detail is logged, never sent.
    #[error("{0}")]
    Internal(String),
}

const FALLBACK_MESSAGE: &str = "Something went wrong";

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            Self::Validation(_) | Self::MalformedBody(_) => Status::BadRequest,
            Self::PayloadTooLarge(_) => Status::PayloadTooLarge,
            Self::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFoundError",
            Self::Validation(_) => "ValidationError",
            Self::MalformedBody(_) => "SyntaxError",
            Self::PayloadTooLarge(_) => "PayloadTooLargeError",
            Self::Internal(_) => "InternalServerError",
        }
    }

    /// The message exposed to the client.
    fn public_message(&self) -> &str {
        match self {
            Self::Internal(_) => FALLBACK_MESSAGE,
            Self::NotFound(m)
            | Self::Validation(m)
            | Self::MalformedBody(m)
            | Self::PayloadTooLarge(m)
                if !m.is_empty() =>
            {
                m.as_str()
            }
            _ => FALLBACK_MESSAGE,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedBody(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

/// Terminal stage of the pipeline: logs the error and formats the uniform
/// `{ "error", "message" }` body. Nothing runs after this.
pub fn render(err: &ApiError) -> Response {
    let status = err.status();
    error!(
        kind = err.kind(),
        status = u16::from(status),
        detail = %err,
        "request failed"
    );

    let body = ErrorBody { error: err.kind(), message: err.public_message() };
    match serde_json::to_vec(&body) {
        Ok(bytes) => Response::json(bytes).with_status(status),
        Err(_) => Response::status(Status::InternalServerError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(res: &Response) -> serde_json::Value {
        serde_json::from_slice(&res.body).unwrap()
    }

    #[test]
    fn not_found_renders_404_with_kind_and_message() {
        let res = render(&ApiError::not_found("Product not found."));
        assert_eq!(res.status, 404);
        assert_eq!(
            body_of(&res),
            serde_json::json!({ "error": "NotFoundError", "message": "Product not found." })
        );
    }

    #[test]
    fn validation_renders_400() {
        let res = render(&ApiError::validation("bad"));
        assert_eq!(res.status, 400);
        assert_eq!(body_of(&res)["error"], "ValidationError");
    }

    #[test]
    fn internal_hides_detail_behind_fallback_message() {
        let res = render(&ApiError::internal("db exploded at 0xdeadbeef"));
        assert_eq!(res.status, 500);
        assert_eq!(
            body_of(&res),
            serde_json::json!({ "error": "InternalServerError", "message": "Something went wrong" })
        );
    }

    #[test]
    fn empty_message_falls_back() {
        let res = render(&ApiError::validation(""));
        assert_eq!(body_of(&res)["message"], "Something went wrong");
    }

    #[test]
    fn oversized_bodies_render_413() {
        let res = render(&ApiError::PayloadTooLarge("request entity too large".into()));
        assert_eq!(res.status, 413);
        assert_eq!(body_of(&res)["error"], "PayloadTooLargeError");
    }

    #[test]
    fn json_errors_become_syntax_errors() {
        let err: ApiError = serde_json::from_slice::<serde_json::Value>(b"{nope").unwrap_err().into();
        assert_eq!(err.kind(), "SyntaxError");
        assert_eq!(u16::from(err.status()), 400);
    }
}
