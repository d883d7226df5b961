use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::storage::Survey;

pub(crate) const HEALTH_MESSAGE: &str = "API is working!";

/// Request body of `POST /surveys/submit/`. Documentation only: the handler
/// takes raw JSON so every field problem can be reported at once.
#[allow(dead_code)]
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SubmitSurvey {
    /// At most 255 characters.
    pub question: String,
    pub answer: String,
    /// ISO 8601 timestamp; assigned by the store when omitted.
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SubmitSurveyResponse {
    pub message: String,
    /// Rows exactly as the store returned them.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SurveysResponse {
    pub surveys: Vec<Survey>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    /// Field messages for validation failures, the store's message otherwise.
    #[schema(value_type = Object)]
    pub error: Value,
}
