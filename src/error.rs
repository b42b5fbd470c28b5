use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::StoreError;
use crate::services::assembler::FieldError;
use crate::services::gateway::PersistError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Error loading history: {0}")]
    Read(#[from] StoreError),
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone(), None),
            AppError::Persist(e) => {
                tracing::error!(date = %e.date, error = %e, "Save failed");
                (
                    StatusCode::BAD_GATEWAY,
                    self.to_string(),
                    Some(json!({
                        "date": e.date,
                        "daily_logs": e.daily_logs,
                        "biometrics": e.biometrics,
                    })),
                )
            }
            AppError::Read(e) => {
                tracing::error!(error = %e, "Store read failed");
                (StatusCode::BAD_GATEWAY, self.to_string(), None)
            }
        };

        let mut error = json!({
            "message": message,
            "code": status.as_u16(),
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
