//! Company HTTP handlers

use super::model::{CompanyChanges, NewCompany};
use super::service::CompanyService;
use crate::core::error::ApiResult;
use crate::core::validation::JsonBody;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

/// Company-specific AppState
#[derive(Clone)]
pub struct CompanyAppState {
    pub service: CompanyService,
}

pub async fn list_companies(State(state): State<CompanyAppState>) -> ApiResult<Json<Value>> {
    let companies = state.service.list().await?;
    Ok(Json(json!({ "companies": companies })))
}

pub async fn get_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    let company = state.service.get(&code).await?;
    Ok(Json(json!({ "company": company })))
}

pub async fn create_company(
    State(state): State<CompanyAppState>,
    JsonBody(payload): JsonBody<NewCompany>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let company = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

pub async fn update_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
    JsonBody(payload): JsonBody<CompanyChanges>,
) -> ApiResult<Json<Value>> {
    let company = state.service.update(&code, payload).await?;
    Ok(Json(json!({ "company": company })))
}

pub async fn delete_company(
    State(state): State<CompanyAppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    state.service.delete(&code).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
