//! Axum route handlers for the Portfolio API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::portfolio::analysis::analyze_portfolio;
use crate::portfolio::document::{document_set, prepare_source, UploadedFile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub file: Option<UploadedFile>,
    #[serde(default)]
    pub files: Option<Vec<UploadedFile>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub portfolio_analysis: String,
    pub document_count: usize,
    pub image_count: usize,
}

/// POST /api/v1/portfolio/analyze
///
/// Runs only the analysis step so a client can cache the summary before the
/// first interview turn.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let documents = document_set(request.file.as_ref(), request.files.as_deref());
    let source = prepare_source(&documents).await?;
    let portfolio_analysis = analyze_portfolio(state.llm.as_ref(), &source).await?;

    Ok(Json(AnalyzeResponse {
        portfolio_analysis,
        document_count: documents.len(),
        image_count: source.images.len(),
    }))
}
