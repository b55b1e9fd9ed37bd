use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    handlers::JsonFields,
    models::{Product, ProductId},
    AppState,
};

/// Parse a path segment into an id. A segment that is not a plain decimal
/// number cannot name any record, so it reads as not found.
fn parse_id(raw: &str) -> AppResult<ProductId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Product {:?} not found", raw)))
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let products: Vec<Product> = state.store.read().await.list().cloned().collect();
    debug!(count = products.len(), "Listed products");
    Json(products)
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    JsonFields(fields): JsonFields,
) -> (StatusCode, Json<Product>) {
    let product = state.store.write().await.create(fields).clone();

    info!(id = %product.id, name = ?product.name(), "Created product");

    (StatusCode::CREATED, Json(product))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Product>> {
    let id = parse_id(&raw_id).inspect_err(|err| debug!(%err, "Lookup missed"))?;
    let product = state
        .store
        .read()
        .await
        .get(id)
        .inspect_err(|err| debug!(%err, "Lookup missed"))?
        .clone();
    Ok(Json(product))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonFields(fields): JsonFields,
) -> AppResult<Json<Product>> {
    let id = parse_id(&raw_id).inspect_err(|err| debug!(%err, "Update missed"))?;
    let product = state
        .store
        .write()
        .await
        .update(id, fields)
        .inspect_err(|err| debug!(%err, "Update missed"))?
        .clone();

    info!(id = %id, "Updated product");

    Ok(Json(product))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> StatusCode {
    match raw_id.parse::<ProductId>() {
        Ok(id) => {
            let mut store = state.store.write().await;
            let removed = store.delete(id);
            info!(id = %id, removed, remaining = store.len(), "Deleted product");
        }
        Err(err) => debug!(%err, "Delete ignored"),
    }
    StatusCode::NO_CONTENT
}
