use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::Message;
use crate::models::record::{InterviewRecord, RecordCompany, SaveRecordRequest};
use crate::records::evaluation::{self, EvaluationCategory, ScoreRequest, ScoreResult};
use crate::records::review::{difficult_questions, mark_difficult, sanitize_difficult_ids};
use crate::records::store::{self, clamp_limit, NewRecord};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct RecordListResponse {
    pub records: Vec<InterviewRecord>,
}

#[derive(Serialize)]
pub struct DifficultQuestionsResponse {
    pub questions: Vec<Message>,
}

#[derive(Serialize)]
pub struct CriteriaResponse {
    pub categories: &'static [EvaluationCategory],
    #[serde(rename = "maxScore")]
    pub max_score: u32,
}

/// POST /api/v1/interviews
pub async fn handle_save_record(
    State(state): State<AppState>,
    Json(req): Json<SaveRecordRequest>,
) -> Result<(StatusCode, Json<InterviewRecord>), AppError> {
    if !req.user_consent {
        return Err(AppError::Validation(
            "Saving an interview requires the user's consent".to_string(),
        ));
    }
    if req.company.name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    let difficult = sanitize_difficult_ids(&req.messages, &req.difficult_questions);
    let mut messages = req.messages;
    mark_difficult(&mut messages, &difficult);

    let company = serde_json::to_value(RecordCompany::from(&req.company))
        .map_err(|e| AppError::Internal(e.into()))?;
    let messages = serde_json::to_value(&messages).map_err(|e| AppError::Internal(e.into()))?;
    let file_count = i32::try_from(req.file_count)
        .map_err(|_| AppError::Validation("fileCount is out of range".to_string()))?;

    let row = store::insert_record(
        &state.db,
        NewRecord {
            company: &company,
            position: req.position.as_str(),
            experience: req.experience.as_str(),
            messages: &messages,
            difficult_questions: &difficult,
            file_count,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(InterviewRecord::try_from(row)?)))
}

/// GET /api/v1/interviews
pub async fn handle_list_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RecordListResponse>, AppError> {
    let rows = store::list_records(&state.db, clamp_limit(query.limit)).await?;
    let records = rows
        .into_iter()
        .map(InterviewRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(RecordListResponse { records }))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewRecord>, AppError> {
    Ok(Json(load_record(&state, id).await?))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if store::delete_record(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Interview record {id} not found")))
    }
}

/// GET /api/v1/interviews/:id/difficult
pub async fn handle_difficult_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DifficultQuestionsResponse>, AppError> {
    let record = load_record(&state, id).await?;
    let questions = difficult_questions(&record.messages, &record.difficult_questions)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DifficultQuestionsResponse { questions }))
}

/// GET /api/v1/evaluation/criteria
pub async fn handle_evaluation_criteria() -> Json<CriteriaResponse> {
    Json(CriteriaResponse {
        categories: evaluation::CRITERIA,
        max_score: evaluation::max_score(),
    })
}

/// POST /api/v1/evaluation/score
pub async fn handle_evaluation_score(
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResult>, AppError> {
    Ok(Json(evaluation::score(&req.checked_items)?))
}

async fn load_record(state: &AppState, id: Uuid) -> Result<InterviewRecord, AppError> {
    let row = store::get_record(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview record {id} not found")))?;
    Ok(InterviewRecord::try_from(row)?)
}
