use serde_json::json;

use crate::models::{Fields, Product, ProductId};

/// `(id, name, price)` for the records every fresh process starts with.
static INITIAL: &[(u64, &str, u64)] = &[(1, "Book", 10), (2, "Pen", 2)];

/// The fixed catalog loaded at startup.
pub fn initial_products() -> Vec<Product> {
    INITIAL
        .iter()
        .map(|&(id, name, price)| {
            let mut fields = Fields::new();
            fields.insert("name".to_string(), json!(name));
            fields.insert("price".to_string(), json!(price));
            Product::new(ProductId(id), fields)
        })
        .collect()
}
