//! Industry HTTP handlers

use super::model::{AssignCompany, NewIndustry};
use super::service::IndustryService;
use crate::core::error::ApiResult;
use crate::core::validation::JsonBody;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

/// Industry-specific AppState
#[derive(Clone)]
pub struct IndustryAppState {
    pub service: IndustryService,
}

pub async fn list_industries(State(state): State<IndustryAppState>) -> ApiResult<Json<Value>> {
    let industries = state.service.list().await?;
    Ok(Json(json!({ "industries": industries })))
}

pub async fn get_industry(
    State(state): State<IndustryAppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    let industry = state.service.get(&code).await?;
    Ok(Json(json!({ "industry": industry })))
}

pub async fn create_industry(
    State(state): State<IndustryAppState>,
    JsonBody(payload): JsonBody<NewIndustry>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let industry = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "industry": industry }))))
}

pub async fn assign_company(
    State(state): State<IndustryAppState>,
    Path(industry_code): Path<String>,
    JsonBody(payload): JsonBody<AssignCompany>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let assignment = state.service.assign_company(&industry_code, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "company_industry": assignment })),
    ))
}

pub async fn delete_industry(
    State(state): State<IndustryAppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    state.service.delete(&code).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
