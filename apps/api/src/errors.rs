use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::portfolio::document::DocumentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider's safety filter or the model itself declined the material.
    #[error("Content rejected: {0}")]
    ContentRejected(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::ImageTooLarge { .. }
            | DocumentError::TotalTooLarge { .. }
            | DocumentError::PdfTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            DocumentError::EmptyPdf { .. } | DocumentError::PdfExtraction { .. } => {
                AppError::UnprocessableEntity(err.to_string())
            }
            _ => AppError::Validation(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::CompanyNotFound(name) => (
                StatusCode::NOT_FOUND,
                "COMPANY_NOT_FOUND",
                format!("Could not find a company named \"{name}\""),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ContentRejected(msg) => {
                tracing::warn!("Content rejected: {msg}");
                (StatusCode::BAD_REQUEST, "CONTENT_REJECTED", msg.clone())
            }
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_size_errors_map_to_413() {
        let err: AppError = DocumentError::TotalTooLarge { bytes: 5_000_000 }.into();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);

        let err: AppError = DocumentError::PdfTooLarge {
            name: "cv.pdf".to_string(),
            bytes: 21 * 1024 * 1024,
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_empty_pdf_maps_to_422() {
        let err: AppError = DocumentError::EmptyPdf {
            name: "cv.pdf".to_string(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_missing_payload_maps_to_400() {
        let err: AppError = DocumentError::MissingPayload {
            name: "shot.png".to_string(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_company_not_found_is_404() {
        let response = AppError::CompanyNotFound("Nowhere Inc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
