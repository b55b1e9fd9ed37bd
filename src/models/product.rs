use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

/// Free-form product attributes as supplied by clients (`name`, `price`, ...).
pub type Fields = Map<String, Value>;

/// Store-assigned product identifier. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    /// The id immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid product id {0:?}")]
pub struct InvalidProductId(pub String);

/// Path segments must be plain decimal digits; signs, whitespace and
/// fractional forms never name a product.
impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidProductId(s.to_string()));
        }
        s.parse::<u64>()
            .map(ProductId)
            .map_err(|_| InvalidProductId(s.to_string()))
    }
}

/// A catalog record: the store-owned `id` plus whatever fields the client sent.
///
/// `fields` never contains an `id` key; the struct field is the only source
/// of truth for identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Product {
    pub fn new(id: ProductId, mut fields: Fields) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    /// Shallow merge: every supplied field replaces the field of the same
    /// name wholesale. A supplied `id` is ignored.
    pub fn merge(&mut self, fields: Fields) {
        for (key, value) in fields {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    // ── ProductId parsing ──────────────────────────────────────────────────────

    #[test]
    fn parses_plain_digits() {
        assert_eq!("1".parse::<ProductId>().unwrap(), ProductId(1));
        assert_eq!("007".parse::<ProductId>().unwrap(), ProductId(7));
    }

    #[test]
    fn rejects_non_digit_segments() {
        for raw in ["", "abc", "-1", "+1", "1.0", " 1", "1e3"] {
            assert!(raw.parse::<ProductId>().is_err(), "{raw:?} must not parse");
        }
    }

    #[test]
    fn rejects_overflowing_ids() {
        assert!("99999999999999999999999".parse::<ProductId>().is_err());
    }

    // ── Serialization ──────────────────────────────────────────────────────────

    #[test]
    fn serializes_id_alongside_fields() {
        let product = Product::new(ProductId(1), fields(json!({"name": "Book", "price": 10})));
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"id": 1, "name": "Book", "price": 10})
        );
    }

    #[test]
    fn new_drops_client_supplied_id() {
        let product = Product::new(ProductId(5), fields(json!({"id": 999, "name": "Pen"})));
        assert_eq!(product.id, ProductId(5));
        assert!(!product.fields.contains_key("id"));
    }

    #[test]
    fn extra_fields_are_kept_verbatim() {
        let product = Product::new(
            ProductId(3),
            fields(json!({"name": "Lamp", "tags": ["desk", "led"], "dims": {"h": 40}})),
        );
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["tags"], json!(["desk", "led"]));
        assert_eq!(value["dims"], json!({"h": 40}));
    }

    // ── Merge ──────────────────────────────────────────────────────────────────

    #[test]
    fn merge_overwrites_only_supplied_fields() {
        let mut product = Product::new(ProductId(1), fields(json!({"name": "Book", "price": 10})));
        product.merge(fields(json!({"price": 5})));
        assert_eq!(product.fields, fields(json!({"name": "Book", "price": 5})));
    }

    #[test]
    fn merge_replaces_nested_values_wholesale() {
        let mut product =
            Product::new(ProductId(1), fields(json!({"dims": {"h": 1, "w": 2}})));
        product.merge(fields(json!({"dims": {"h": 3}})));
        assert_eq!(product.fields["dims"], json!({"h": 3}));
    }

    #[test]
    fn merge_ignores_id() {
        let mut product = Product::new(ProductId(1), fields(json!({"name": "Book"})));
        product.merge(fields(json!({"id": 42, "name": "Novel"})));
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.name(), Some("Novel"));
        assert!(!product.fields.contains_key("id"));
    }
}
