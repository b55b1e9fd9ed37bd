pub mod products;

use axum::{extract::FromRequest, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, models::Fields, AppState};

/// JSON object request body. Any rejection (syntax error, non-object JSON,
/// wrong content type) becomes a 400 `AppError::BadRequest`.
///
/// A body sent without `Content-Type: application/json` is rejected rather
/// than treated as an empty object, so a create never stores a record made
/// of nothing but its id.
#[derive(Debug, Deserialize, FromRequest)]
#[serde(transparent)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonFields(pub Fields);

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let products = state.store.read().await.len();
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "catalog-service", "products": products })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header::CONTENT_TYPE, Request},
    };
    use serde_json::Value;

    fn request(content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/products");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn extracts_object_fields() {
        let req = request(Some("application/json"), r#"{"name":"Book","price":10}"#);
        let JsonFields(fields) = JsonFields::from_request(req, &()).await.unwrap();
        assert_eq!(fields.get("name"), Some(&Value::from("Book")));
        assert_eq!(fields.get("price"), Some(&Value::from(10)));
    }

    #[tokio::test]
    async fn rejects_syntax_errors_as_bad_request() {
        let req = request(Some("application/json"), r#"{"name": "#);
        let err = JsonFields::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_non_object_json_as_bad_request() {
        let req = request(Some("application/json"), "[1, 2]");
        let err = JsonFields::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rejects_missing_content_type_as_bad_request() {
        let req = request(None, r#"{"name":"Pen"}"#);
        let err = JsonFields::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
