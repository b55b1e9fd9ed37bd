pub mod ids;

use indexmap::IndexMap;

use crate::error::{AppError, AppResult};
use crate::models::{Fields, Product, ProductId};

pub use ids::{IdAllocator, IdStrategy};

/// Authoritative in-memory product collection.
///
/// Records live in an `IndexMap` keyed by id: lookups are O(1) and iteration
/// follows insertion order. Removal uses `shift_remove` so the order of the
/// survivors is kept.
pub struct ProductStore {
    records: IndexMap<ProductId, Product>,
    /// Largest id ever stored, live or deleted.
    high_water: ProductId,
    allocator: Box<dyn IdAllocator>,
}

impl ProductStore {
    pub fn new(allocator: Box<dyn IdAllocator>) -> Self {
        Self {
            records: IndexMap::new(),
            high_water: ProductId::default(),
            allocator,
        }
    }

    /// Build a store pre-populated with `products`, kept in the given order.
    /// A later product with a repeated id replaces the earlier one.
    pub fn seeded(
        allocator: Box<dyn IdAllocator>,
        products: impl IntoIterator<Item = Product>,
    ) -> Self {
        let mut store = Self::new(allocator);
        for product in products {
            store.insert_record(product);
        }
        store
    }

    fn insert_record(&mut self, product: Product) {
        self.high_water = self.high_water.max(product.id);
        self.records.insert(product.id, product);
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    pub fn list(&self) -> impl ExactSizeIterator<Item = &Product> {
        self.records.values()
    }

    pub fn get(&self, id: ProductId) -> AppResult<&Product> {
        self.records
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    // ── Writes ────────────────────────────────────────────────────────────────

    /// Append a new record built from `fields` under a freshly allocated id.
    /// Any `id` among the fields is discarded.
    pub fn create(&mut self, fields: Fields) -> &Product {
        let id = self.allocator.allocate(self.high_water);
        debug_assert!(id > self.high_water, "allocator returned a stale id");
        debug_assert!(!self.records.contains_key(&id));

        self.insert_record(Product::new(id, fields));
        &self.records[&id]
    }

    /// Shallow-merge `fields` over the record with `id`. Nothing changes when
    /// the record is absent.
    pub fn update(&mut self, id: ProductId, fields: Fields) -> AppResult<&Product> {
        let product = self
            .records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
        product.merge(fields);
        Ok(&*product)
    }

    /// Remove the record with `id` if there is one. Returns whether anything
    /// was removed; deleting an absent id is not an error.
    pub fn delete(&mut self, id: ProductId) -> bool {
        self.records.shift_remove(&id).is_some()
    }
}
