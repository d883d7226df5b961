pub(crate) mod error;
pub(crate) mod payload;
pub(crate) mod survey;
pub mod types;

pub(crate) use crate::service::Service;
use axum::{response::IntoResponse, Json};
pub(crate) use types::*;

#[utoipa::path(
    get,
    path = "/test/",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse),
    ),
    tag = "health"
)]
#[tracing::instrument(name = "health", skip_all)]
pub(crate) async fn health() -> impl IntoResponse {
    Json(MessageResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}
