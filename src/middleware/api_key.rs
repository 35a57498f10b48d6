use super::{Flow, Middleware};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Header carrying the caller's shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `x-api-key` header is not exactly the configured
/// secret. A missing header counts as a mismatch.
///
/// The rejection is a direct `401 {"error":"Unauthorized"}` response rather
/// than a typed error; it does not pass through the error stage and logs
/// nothing of its own.
#[derive(Clone, Debug)]
pub struct ApiKeyAuth {
    key: String,
}

impl ApiKeyAuth {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Middleware for ApiKeyAuth {
    fn handle(&self, req: &Request) -> Flow {
        match req.header(API_KEY_HEADER) {
            Some(given) if given == self.key => Flow::Continue,
            _ => Flow::Respond(unauthorized()),
        }
    }
}

fn unauthorized() -> Response {
    Response::json(br#"{"error":"Unauthorized"}"#.to_vec()).with_status(Status::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::test_support::request;

    fn auth() -> ApiKeyAuth { ApiKeyAuth::new("s3cret") }

    fn status_of(flow: Flow) -> Option<u16> {
        match flow {
            Flow::Respond(res) => Some(res.status_code()),
            _ => None,
        }
    }

    #[test]
    fn matching_key_continues() {
        let req = request("GET", "/api/products", &[("x-api-key", "s3cret")], "");
        assert!(matches!(auth().handle(&req), Flow::Continue));
    }

    #[test]
    fn missing_key_is_unauthorized() {
        let req = request("GET", "/api/products", &[], "");
        let Flow::Respond(res) = auth().handle(&req) else { panic!("expected a response") };
        assert_eq!(res.status_code(), 401);
        assert_eq!(res.body(), br#"{"error":"Unauthorized"}"#);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let req = request("GET", "/api/products", &[("x-api-key", "S3CRET")], "");
        assert_eq!(status_of(auth().handle(&req)), Some(401));
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let req = request("GET", "/api/products", &[("X-API-KEY", "s3cret")], "");
        assert!(matches!(auth().handle(&req), Flow::Continue));
    }
}
