use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde_json::{Map, Value};

use super::error::AppError;

/// Same ceiling axum applies to its own body extractors.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

const FORM_MIME: &str = "application/x-www-form-urlencoded";

/// Submission body as loose JSON. Accepts JSON and urlencoded forms; an
/// empty body reads as an empty object so every missing field gets reported.
pub(crate) struct SurveyPayload(pub(crate) Value);

impl<S> FromRequest<S> for SurveyPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|e| AppError::MalformedBody(e.to_string()))?;

        if bytes.is_empty() {
            return Ok(Self(Value::Object(Map::new())));
        }

        let is_form = is_form(&parts.headers);
        let req = Request::from_parts(parts, Body::from(bytes));

        if is_form {
            let Form(fields) = Form::<Map<String, Value>>::from_request(req, state).await?;
            Ok(Self(Value::Object(fields)))
        } else {
            let Json(value) = Json::<Value>::from_request(req, state).await?;
            Ok(Self(value))
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_MIME))
}
