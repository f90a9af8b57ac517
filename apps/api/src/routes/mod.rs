pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::company::handlers as company;
use crate::interview::handlers as interview;
use crate::portfolio::handlers as portfolio;
use crate::records::handlers as records;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Interview
        .route("/api/v1/interviews/turn", post(interview::handle_turn))
        .route("/api/v1/portfolio/analyze", post(portfolio::handle_analyze))
        // Companies
        .route("/api/v1/companies", get(company::handle_list_presets))
        .route("/api/v1/companies/search", post(company::handle_search))
        .route("/api/v1/companies/:id", get(company::handle_get_preset))
        // Records
        .route(
            "/api/v1/interviews",
            post(records::handle_save_record).get(records::handle_list_records),
        )
        .route(
            "/api/v1/interviews/:id",
            get(records::handle_get_record).delete(records::handle_delete_record),
        )
        .route(
            "/api/v1/interviews/:id/difficult",
            get(records::handle_difficult_questions),
        )
        .route(
            "/api/v1/evaluation/criteria",
            get(records::handle_evaluation_criteria),
        )
        .route(
            "/api/v1/evaluation/score",
            post(records::handle_evaluation_score),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
