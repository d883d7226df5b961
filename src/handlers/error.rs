use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use strum_macros::AsRefStr;
use thiserror::Error;

use crate::{storage::StoreError, validation::ValidationError};

/// Everything a survey endpoint can fail with. Both validation and store
/// failures are reported as 400 so the caller sees one error shape.
#[derive(Debug, Error, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    MalformedBody(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl AppError {
    /// Field messages for validation failures, the raw message otherwise.
    fn details(&self) -> Value {
        match self {
            AppError::Validation(errors) => json!(errors),
            AppError::Store(e) => Value::String(e.to_string()),
            AppError::MalformedBody(message) => Value::String(message.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, kind = self.as_ref(), "AppError");

        let body = Json(json!({ "error": self.details() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
