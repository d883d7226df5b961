mod admin;
mod error;
mod memory;
mod postgrest;
mod survey;

#[cfg(any(test, feature = "integration_tests"))]
pub mod test_util;

use async_trait::async_trait;
use serde_json::Value;

pub use admin::{AdminUser, HashedPassword, Identity};
pub use error::StoreError;
pub(crate) use memory::{MemoryAdminStorage, MemoryStore};
pub(crate) use postgrest::PostgrestStore;
pub use survey::Survey;

/// Table-oriented survey store. Rows come back as raw JSON because the store
/// owns the schema; callers validate them before use.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    async fn insert(&self, survey: &Survey) -> Result<Vec<Value>, StoreError>;
    async fn select_all(&self) -> Result<Vec<Value>, StoreError>;
}

#[async_trait]
pub trait AdminStorage: Send + Sync {
    async fn get_by_username(&self, username: &str) -> Option<AdminUser>;
    /// Returns `false` when the username is already taken.
    async fn put(&self, admin: AdminUser) -> bool;
}
