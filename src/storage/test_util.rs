#![allow(dead_code)]
use std::sync::Arc;

use serde_json::Value;

use super::{AdminStorage, MemoryAdminStorage, MemoryStore, SurveyStore};
use crate::{service::Service, Settings};

/// Builds a [`Service`] over in-memory storage, optionally pre-filled with raw rows.
pub struct TestServiceBuilder {
    rows: Vec<Value>,
    survey_store: Option<Arc<dyn SurveyStore>>,
}

impl TestServiceBuilder {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            survey_store: None,
        }
    }

    pub fn with_rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn SurveyStore>) -> Self {
        self.survey_store = Some(store);
        self
    }

    pub async fn build(self) -> Service {
        let survey_store = self
            .survey_store
            .unwrap_or_else(|| Arc::new(MemoryStore::with_rows(self.rows)) as Arc<dyn SurveyStore>);
        let admin_storage = Arc::new(MemoryAdminStorage::new()) as Arc<dyn AdminStorage>;

        let service = Service::new(survey_store, admin_storage);
        service
            .admin()
            .create_admins(&test_settings().auth)
            .await
            .unwrap();
        service
    }
}

impl Default for TestServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_settings() -> Settings {
    Settings::from_file("test").unwrap()
}
