//! Invoice HTTP handlers

use super::model::{InvoiceChanges, NewInvoice};
use super::service::InvoiceService;
use crate::core::error::ApiResult;
use crate::core::validation::{JsonBody, parse_invoice_id};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

/// Invoice-specific AppState
#[derive(Clone)]
pub struct InvoiceAppState {
    pub service: InvoiceService,
}

pub async fn list_invoices(State(state): State<InvoiceAppState>) -> ApiResult<Json<Value>> {
    let invoices = state.service.list().await?;
    Ok(Json(json!({ "invoices": invoices })))
}

pub async fn get_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_invoice_id(&id)?;
    let invoice = state.service.get(id).await?;
    Ok(Json(json!({ "invoice": invoice })))
}

pub async fn create_invoice(
    State(state): State<InvoiceAppState>,
    JsonBody(payload): JsonBody<NewInvoice>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let invoice = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

pub async fn update_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<InvoiceChanges>,
) -> ApiResult<Json<Value>> {
    let id = parse_invoice_id(&id)?;
    let invoice = state.service.update(id, payload).await?;
    Ok(Json(json!({ "invoice": invoice })))
}

pub async fn delete_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_invoice_id(&id)?;
    state.service.delete(id).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
