use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// A validated question/answer pair. Stored rows are never updated or deleted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Survey {
    pub question: String,
    pub answer: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_created_at"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Survey {
    #[cfg(test)]
    pub(crate) fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_owned(),
            answer: answer.to_owned(),
            created_at: None,
        }
    }
}

/// Whole seconds when there is no sub-second part, six fractional digits
/// otherwise, UTC written as `Z`.
fn serialize_created_at<S: Serializer>(
    created_at: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match created_at {
        Some(created_at) => {
            let precision = if created_at.timestamp_subsec_micros() == 0 {
                SecondsFormat::Secs
            } else {
                SecondsFormat::Micros
            };
            serializer.serialize_str(&created_at.to_rfc3339_opts(precision, true))
        }
        None => serializer.serialize_none(),
    }
}
