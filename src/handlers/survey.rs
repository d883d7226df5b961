use super::error::AppError;
use super::payload::SurveyPayload;
use super::types::*;
use crate::{handlers::Service, utils::RootSpan, validation::validate_submission};
use axum::{
    extract::State,
    response::IntoResponse,
    Extension, Json,
};

use crate::service::survey::SUBMITTED_MESSAGE;

#[utoipa::path(
    post,
    path = "/surveys/submit/",
    request_body(
        description = "New survey answer",
        content(
            (SubmitSurvey = "application/json"),
            (SubmitSurvey = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Survey stored", body = SubmitSurveyResponse),
        (status = 400, description = "Invalid survey or store failure", body = ErrorResponse),
    ),
    tag = "surveys"
)]
#[tracing::instrument(name = "handlers::survey::submit", skip_all)]
pub(crate) async fn submit(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    payload: Result<SurveyPayload, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let SurveyPayload(payload) = payload.inspect_err(|_| {
        root_span.record().error_kind("malformed_body");
    })?;

    let survey = validate_submission(&payload).inspect_err(|e| {
        root_span.record().error_kind(e.as_ref());
    })?;

    let data = service.survey().submit(&survey).await.inspect_err(|e| {
        root_span.record().error_kind(e.as_ref());
    })?;

    root_span.record().survey_count(data.len());

    Ok(Json(SubmitSurveyResponse {
        message: SUBMITTED_MESSAGE.to_string(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/surveys/",
    responses(
        (status = 200, description = "Every stored survey", body = SurveysResponse),
        (status = 400, description = "Store failure or invalid stored row", body = ErrorResponse),
    ),
    tag = "surveys"
)]
#[tracing::instrument(name = "handlers::survey::list", skip_all)]
pub(crate) async fn list(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
) -> Result<impl IntoResponse, AppError> {
    let surveys = service.survey().list().await.inspect_err(|e| {
        root_span.record().error_kind(e.as_ref());
    })?;

    root_span.record().survey_count(surveys.len());

    Ok(Json(SurveysResponse { surveys }))
}
