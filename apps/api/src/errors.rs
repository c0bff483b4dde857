use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enhance::EnhancementError;
use crate::export::ExportError;
use crate::render::RenderFault;
use crate::wizard::draft::DraftError;
use crate::wizard::WizardError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Enhancement error: {0}")]
    Enhancement(#[from] EnhancementError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Render fault: {0}")]
    Render(#[from] RenderFault),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::UnknownRoute(_) | WizardError::UnknownTemplate(_) => {
                AppError::NotFound(e.to_string())
            }
            WizardError::Draft(DraftError::ItemNotFound(_)) => AppError::NotFound(e.to_string()),
            WizardError::StepOutOfRange { .. }
            | WizardError::Draft(_)
            | WizardError::Validation(_) => AppError::Validation(e.to_string()),
        }
    }
}

impl From<DraftError> for AppError {
    fn from(e: DraftError) -> Self {
        WizardError::from(e).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut retryable = None;
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Enhancement(EnhancementError::EmptyInput) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                EnhancementError::EmptyInput.to_string(),
            ),
            AppError::Enhancement(e) => {
                tracing::warn!("Enhancement error: {e}");
                (StatusCode::BAD_GATEWAY, "ENHANCEMENT_ERROR", e.to_string())
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                retryable = Some(true);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    e.to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render fault: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAULT",
                    e.to_string(),
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

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(retryable) = retryable {
            error["retryable"] = json!(retryable);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = body_json(AppError::NotFound("Session x not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Session x not found");
        assert!(body["error"].get("retryable").is_none());
    }

    #[tokio::test]
    async fn test_export_error_is_retryable() {
        let (status, body) = body_json(AppError::Export(ExportError::FontUnavailable)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "EXPORT_ERROR");
        assert_eq!(body["error"]["retryable"], true);
    }

    #[tokio::test]
    async fn test_enhancement_errors_map_to_bad_gateway() {
        let (status, body) = body_json(AppError::Enhancement(EnhancementError::Empty)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "ENHANCEMENT_ERROR");

        let (status, _) = body_json(AppError::Enhancement(EnhancementError::EmptyInput)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_wizard_errors_map_to_status_kinds() {
        assert!(matches!(
            AppError::from(WizardError::UnknownTemplate("x".into())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(WizardError::StepOutOfRange { index: 9, total: 6 }),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(DraftError::ItemNotFound("i".into())),
            AppError::NotFound(_)
        ));
    }
}
