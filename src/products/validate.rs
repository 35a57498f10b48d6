use serde_json::Value;
use validator::Validate;

use super::model::ProductFields;
use crate::error::ApiError;
use crate::middleware::{Flow, Middleware};
use crate::request::Request;

pub const INVALID_PRODUCT: &str = "Invalid or missing product field.";

/// Guards create and update: the body must carry a complete, well-typed set
/// of product fields.
///
/// `name`, `description` and `category` must be non-empty strings, `price`
/// any JSON number, `inStock` a boolean. Extra fields are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateProduct;

impl Middleware for ValidateProduct {
    fn handle(&self, req: &Request) -> Flow {
        match product_fields(req) {
            Ok(_) => Flow::Continue,
            Err(err) => Flow::Fail(err),
        }
    }
}

/// Reads the body as a complete, valid [`ProductFields`].
///
/// Unparseable JSON stays a syntax error. A non-object body, a missing or
/// mistyped field, and an empty text field are all the same validation error.
pub(crate) fn product_fields(req: &Request) -> Result<ProductFields, ApiError> {
    let body: Value = req.json()?;
    if !body.is_object() {
        return Err(ApiError::validation(INVALID_PRODUCT));
    }
    let fields: ProductFields =
        serde_json::from_value(body).map_err(|_| ApiError::validation(INVALID_PRODUCT))?;
    fields.validate().map_err(|_| ApiError::validation(INVALID_PRODUCT))?;
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::test_support::request;

    fn check(body: &str) -> Flow {
        ValidateProduct.handle(&request("POST", "/api/products", &[], body))
    }

    const VALID: &str =
        r#"{"name":"Lamp","description":"Desk lamp","price":0,"category":"Home","inStock":false}"#;

    #[test]
    fn accepts_complete_product() {
        assert!(matches!(check(VALID), Flow::Continue));
    }

    #[test]
    fn accepts_negative_price() {
        let body = VALID.replace(r#""price":0"#, r#""price":-4.5"#);
        assert!(matches!(check(&body), Flow::Continue));
    }

    #[test]
    fn rejects_missing_or_string_price() {
        let missing = r#"{"name":"Lamp","description":"d","category":"Home","inStock":true}"#;
        let string = VALID.replace(r#""price":0"#, r#""price":"10""#);
        for body in [missing, string.as_str()] {
            let Flow::Fail(err) = check(body) else { panic!("expected failure for {body}") };
            assert_eq!(err.kind(), "ValidationError");
            assert_eq!(err.to_string(), INVALID_PRODUCT);
        }
    }

    #[test]
    fn rejects_empty_strings_and_non_boolean_stock() {
        let empty_name = VALID.replace(r#""name":"Lamp""#, r#""name":"""#);
        let stock_string = VALID.replace(r#""inStock":false"#, r#""inStock":"yes""#);
        assert!(matches!(check(&empty_name), Flow::Fail(ApiError::Validation(_))));
        assert!(matches!(check(&stock_string), Flow::Fail(ApiError::Validation(_))));
    }

    #[test]
    fn rejects_empty_and_non_object_bodies() {
        assert!(matches!(check(""), Flow::Fail(ApiError::Validation(_))));
        assert!(matches!(check("[1,2]"), Flow::Fail(ApiError::Validation(_))));
        let as_array = r#"["Lamp","Desk lamp",1,"Home",true]"#;
        assert!(matches!(check(as_array), Flow::Fail(ApiError::Validation(_))));
    }

    #[test]
    fn rejects_non_string_text_fields() {
        let numeric_name = VALID.replace(r#""name":"Lamp""#, r#""name":7"#);
        let null_category = VALID.replace(r#""category":"Home""#, r#""category":null"#);
        for body in [numeric_name, null_category] {
            assert!(matches!(check(&body), Flow::Fail(ApiError::Validation(_))));
        }
    }

    #[test]
    fn parses_the_fields_it_accepts() {
        let fields = product_fields(&request("PUT", "/api/products/1", &[], VALID)).unwrap();
        assert_eq!(fields.name, "Lamp");
        assert!(!fields.in_stock);
    }

    #[test]
    fn malformed_json_is_a_syntax_error() {
        assert!(matches!(check("{oops"), Flow::Fail(ApiError::MalformedBody(_))));
    }
}
