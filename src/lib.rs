mod app;
mod config;
mod docs;
pub(crate) mod handlers;
mod init;
pub(crate) mod middleware;
pub(crate) mod service;
pub(crate) mod storage;
pub(crate) mod utils;
pub(crate) mod validation;

pub use config::Settings;
pub use handlers::error::AppError;
pub use init::{init_logging, StartupError};
pub use service::admin::AdminError;

use axum::Router;
use tracing::{info, instrument};

pub use app::build_app;

#[cfg(feature = "integration_tests")]
pub use init::init_storage;

#[cfg(feature = "integration_tests")]
pub use service::Service;

#[cfg(feature = "integration_tests")]
pub use storage::{test_util::TestServiceBuilder, AdminUser, StoreError, Survey, SurveyStore};

#[cfg(feature = "integration_tests")]
pub use handlers::types::{ErrorResponse, MessageResponse, SubmitSurveyResponse, SurveysResponse};

#[instrument(name = "init_app", skip_all)]
pub async fn init_app(settings: &Settings) -> Result<Router, StartupError> {
    info!(settings = ?settings, "init_app with settings");

    let service = init::init_storage(settings).await?;

    Ok(app::build_app(service, settings))
}
