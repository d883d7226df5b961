use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    config::StoreKind,
    service::Service,
    storage::{AdminStorage, MemoryAdminStorage, MemoryStore, PostgrestStore, SurveyStore},
    Settings,
};

use super::StartupError;

#[instrument(name = "init_storage", skip_all, fields(backend = settings.store.backend.as_ref()))]
pub async fn init_storage(settings: &Settings) -> Result<Service, StartupError> {
    let survey_store: Arc<dyn SurveyStore> = match settings.store.backend {
        StoreKind::Postgrest => Arc::new(PostgrestStore::new(&settings.store)?),
        StoreKind::Memory => {
            info!("using in-memory survey store, rows are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let service = Service::new(
        survey_store,
        Arc::new(MemoryAdminStorage::new()) as Arc<dyn AdminStorage>,
    );

    service.admin().create_admins(&settings.auth).await?;

    Ok(service)
}
