use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::company::presets;
use crate::company::search::{search_company, CompanySearchRequest};
use crate::errors::AppError;
use crate::models::company::Company;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

#[derive(Deserialize)]
pub struct PresetQuery {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
}

/// POST /api/v1/companies/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<CompanySearchRequest>,
) -> Result<Json<CompanyResponse>, AppError> {
    let company = search_company(
        state.llm.as_ref(),
        &state.config.interview_language,
        &request,
    )
    .await?;
    Ok(Json(CompanyResponse { company }))
}

/// GET /api/v1/companies
///
/// With a non-blank `?name=`, only the first preset whose name contains it.
pub async fn handle_list_presets(Query(query): Query<PresetQuery>) -> Json<CompanyListResponse> {
    let name = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let companies = match name {
        Some(name) => presets::find_by_name(name).into_iter().collect(),
        None => presets::all(),
    };
    Json(CompanyListResponse { companies })
}

/// GET /api/v1/companies/:id
pub async fn handle_get_preset(Path(id): Path<String>) -> Result<Json<CompanyResponse>, AppError> {
    presets::find_by_id(&id)
        .map(|company| Json(CompanyResponse { company }))
        .ok_or_else(|| AppError::NotFound(format!("Company preset '{id}' not found")))
}
