pub(crate) mod admin;
pub(crate) mod password;
pub(crate) mod survey;

use std::sync::Arc;

use admin::ServiceAdminRef;
use survey::ServiceSurveyRef;
use tracing::instrument;

use crate::storage::{AdminStorage, SurveyStore};

/// Request-independent state shared by every handler. Cloning only bumps
/// reference counts; the store client inside is built once at startup.
#[derive(Clone)]
pub struct Service {
    survey_store: Arc<dyn SurveyStore>,
    admin_storage: Arc<dyn AdminStorage>,
}

impl Service {
    #[instrument(name = "Service::new", skip_all)]
    pub fn new(survey_store: Arc<dyn SurveyStore>, admin_storage: Arc<dyn AdminStorage>) -> Self {
        Self {
            survey_store,
            admin_storage,
        }
    }

    pub fn survey(&self) -> ServiceSurveyRef {
        ServiceSurveyRef::new(self.survey_store.clone())
    }

    pub fn admin(&self) -> ServiceAdminRef {
        ServiceAdminRef::new(self.admin_storage.clone())
    }
}
