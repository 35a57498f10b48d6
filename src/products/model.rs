use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::Validate;

/// Identifier assigned by the store. Starts at 1, never reused.
pub type ProductId = u64;

/// One catalog item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Kept as the number the client sent, so `10` stays `10`.
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// Every field of a product except its id. Create and update both take a
/// complete set; update overwrites, it never merges.
///
/// Deserialising checks the JSON types; [`Validate`] checks that the text
/// fields are not empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub price: Number,
    #[validate(length(min = 1))]
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub(crate) fn from_fields(id: ProductId, fields: ProductFields) -> Self {
        let ProductFields { name, description, price, category, in_stock } = fields;
        Self { id, name, description, price, category, in_stock }
    }

    pub(crate) fn overwrite(&mut self, fields: ProductFields) {
        let id = self.id;
        *self = Self::from_fields(id, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_with_camel_case_keys() {
        let product = Product {
            id: 1,
            name: "Lamp".into(),
            description: "Desk lamp".into(),
            price: Number::from(19),
            category: "Home".into(),
            in_stock: true,
        };
        let v = serde_json::to_value(&product).unwrap();
        assert_eq!(v["inStock"], true);
        assert_eq!(v["price"], 19);
        assert!(v.get("in_stock").is_none());
    }

    #[test]
    fn empty_text_fields_fail_validation() {
        let fields = |name: &str, category: &str| ProductFields {
            name: name.into(),
            description: "d".into(),
            price: Number::from(1),
            category: category.into(),
            in_stock: true,
        };
        assert!(fields("Lamp", "Home").validate().is_ok());

        let errors = fields("", "").validate().unwrap_err();
        let mut failed: Vec<_> = errors.field_errors().into_keys().collect();
        failed.sort();
        assert_eq!(failed, ["category", "name"]);
    }
}
