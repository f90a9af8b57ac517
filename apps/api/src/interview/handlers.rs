use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::interview::turn::{run_turn, TurnRequest, TurnResponse};
use crate::state::AppState;

/// POST /api/v1/interviews/turn
pub async fn handle_turn(
    State(state): State<AppState>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let response = run_turn(
        state.llm.as_ref(),
        &state.config.interview_language,
        request,
    )
    .await?;
    Ok(Json(response))
}
