//! Axum extractors for typed request input
//!
//! `JsonBody<T>` replaces `axum::Json<T>` so that every malformed body is
//! reported through [`ApiError`] (and therefore carries the
//! `VALIDATION_ERROR` code) instead of axum's plain-text rejection.

use crate::core::error::{ApiError, ApiResult, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Axum extractor that decodes a JSON body into a request schema
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(state): State<InvoiceAppState>,
///     JsonBody(payload): JsonBody<NewInvoice>,
/// ) -> ApiResult<(StatusCode, Json<Value>)> {
///     // payload has the right shape; rules are checked by the service
/// }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> =
            Json::from_request(req, state)
                .await
                .map_err(|rejection| ValidationError::InvalidJson {
                    message: rejection.body_text(),
                })?;

        let body = serde_json::from_value(payload).map_err(|e| ValidationError::InvalidBody {
            message: e.to_string(),
        })?;

        Ok(JsonBody(body))
    }
}

/// Parse the `{id}` path segment of the invoice routes
///
/// Non-numeric text is a validation failure. A well-formed integer outside the
/// `i32` range cannot name a stored invoice, so it is reported as not found.
pub fn parse_invoice_id(raw: &str) -> ApiResult<i32> {
    if let Ok(id) = raw.parse::<i32>() {
        return Ok(id);
    }

    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::not_found("invoice", raw));
    }

    Err(ValidationError::InvalidId {
        entity_type: "invoice",
        value: raw.to_string(),
    }
    .into())
}
