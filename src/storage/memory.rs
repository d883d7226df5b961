use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{AdminStorage, AdminUser, StoreError, Survey, SurveyStore};

/// Process-local stand-in for the hosted table. Fills `id` and `created_at`
/// the way the hosted table's column defaults do.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Value>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table with rows as-is, bypassing validation.
    #[cfg(any(test, feature = "integration_tests"))]
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            next_id: AtomicU64::new(rows.len() as u64),
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    #[instrument(name = "MemoryStore::insert", skip_all)]
    async fn insert(&self, survey: &Survey) -> Result<Vec<Value>, StoreError> {
        let mut row = match serde_json::to_value(survey).map_err(StoreError::Encode)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        row.insert("id".into(), Value::from(id));
        row.entry("created_at").or_insert_with(|| {
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        });

        let row = Value::Object(row);
        self.rows.write().await.push(row.clone());

        debug!(id, "inserted survey row");

        Ok(vec![row])
    }

    #[instrument(name = "MemoryStore::select_all", skip_all)]
    async fn select_all(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.rows.read().await.clone())
    }
}

#[derive(Default)]
pub struct MemoryAdminStorage {
    admins: DashMap<String, AdminUser>,
}

impl MemoryAdminStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStorage for MemoryAdminStorage {
    async fn get_by_username(&self, username: &str) -> Option<AdminUser> {
        self.admins.get(username).map(|admin| admin.clone())
    }

    async fn put(&self, admin: AdminUser) -> bool {
        match self.admins.entry(admin.identity.username.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(admin);
                true
            }
        }
    }
}
