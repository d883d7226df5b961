use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    handlers::error::AppError,
    storage::{Survey, SurveyStore},
    validation::validate_listing,
};

pub(crate) const SUBMITTED_MESSAGE: &str = "Survey submitted successfully!";

pub struct ServiceSurveyRef {
    store: Arc<dyn SurveyStore>,
}

impl ServiceSurveyRef {
    pub(crate) fn new(store: Arc<dyn SurveyStore>) -> Self {
        Self { store }
    }

    /// Forwards an already validated survey and relays the stored rows.
    #[instrument(name = "Service::survey::submit", skip_all)]
    pub(crate) async fn submit(&self, survey: &Survey) -> Result<Vec<Value>, AppError> {
        let rows = self.store.insert(survey).await?;

        info!(rows = rows.len(), "survey stored");

        Ok(rows)
    }

    /// Reads every stored row and re-validates it before handing it out.
    #[instrument(name = "Service::survey::list", skip_all)]
    pub(crate) async fn list(&self) -> Result<Vec<Survey>, AppError> {
        let rows = self.store.select_all().await?;

        let surveys = validate_listing(&rows)?;

        info!(count = surveys.len(), "listed surveys");

        Ok(surveys)
    }
}
