use std::sync::Arc;

use strum_macros::AsRefStr;
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::password::{create_password_hash, verify_password};
use crate::{
    config::AuthSettings,
    storage::{AdminStorage, AdminUser, Identity},
};

#[derive(Debug, Error, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AdminError {
    #[error("No admin with this username")]
    UnknownAdmin,

    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("Account is inactive")]
    Inactive,

    #[error("Account is not an admin")]
    NotAdmin,

    #[error("Hashing password failed")]
    HashingPassword(#[from] argon2::password_hash::Error),

    #[error("Invalid argon2 config")]
    InvalidArgon2Config(#[from] argon2::Error),

    #[error("Failed joining tokio task")]
    JoinTask(#[from] tokio::task::JoinError),
}

pub struct ServiceAdminRef {
    storage: Arc<dyn AdminStorage>,
}

impl ServiceAdminRef {
    pub(crate) fn new(storage: Arc<dyn AdminStorage>) -> Self {
        Self { storage }
    }

    /// Seeds the admins listed in config. Usernames that already exist are kept as they are.
    #[instrument(name = "Service::admin::create_admins", skip_all, fields(count = auth.admins.len()))]
    pub async fn create_admins(&self, auth: &AuthSettings) -> Result<(), AdminError> {
        for admin in &auth.admins {
            if self.storage.get_by_username(&admin.username).await.is_some() {
                info!(username = %admin.username, "admin already exists");
                continue;
            }

            let password = create_password_hash(&admin.password, &auth.argon2).await?;
            let identity = Identity::new(&admin.username, &admin.email, password);

            if self.storage.put(AdminUser::new(identity)).await {
                info!(username = %admin.username, "created admin");
            }
        }
        Ok(())
    }

    #[instrument(name = "Service::admin::get", skip(self))]
    pub async fn get(&self, username: &str) -> Option<AdminUser> {
        self.storage.get_by_username(username).await
    }

    /// Gate for administrative access: the account must exist, be active,
    /// carry the admin flag and match the password.
    /// No route calls this yet; admin endpoints would sit behind it.
    #[instrument(name = "Service::admin::verify_credentials", skip(self, password, auth))]
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
        auth: &AuthSettings,
    ) -> Result<AdminUser, AdminError> {
        let admin = self
            .storage
            .get_by_username(username)
            .await
            .ok_or(AdminError::UnknownAdmin)?;

        verify_password(password, &admin.identity.password, &auth.argon2).await?;

        if !admin.identity.is_active {
            warn!(%admin, "inactive account");
            return Err(AdminError::Inactive);
        }

        if !admin.is_admin {
            warn!(%admin, "account without admin flag");
            return Err(AdminError::NotAdmin);
        }

        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Settings,
        service::password::create_password_hash,
        storage::{MemoryAdminStorage, AdminStorage},
    };

    fn auth() -> AuthSettings {
        Settings::from_file("test").unwrap().auth
    }

    async fn service() -> (ServiceAdminRef, Arc<MemoryAdminStorage>) {
        let storage = Arc::new(MemoryAdminStorage::new());
        let service = ServiceAdminRef::new(storage.clone());
        service.create_admins(&auth()).await.unwrap();
        (service, storage)
    }

    #[tokio::test]
    async fn seeds_configured_admins() {
        let (service, _) = service().await;

        let admin = service.get("root").await.unwrap();

        assert!(admin.is_admin);
        assert_eq!(admin.identity.email, "root@example.com");
        assert_ne!(admin.identity.password.0, "admin-password");
    }

    #[tokio::test]
    async fn seeding_twice_keeps_existing_admin() {
        let (service, _) = service().await;
        let before = service.get("root").await.unwrap();

        service.create_admins(&auth()).await.unwrap();

        assert_eq!(service.get("root").await.unwrap(), before);
    }

    #[tokio::test]
    async fn verifies_valid_credentials() {
        let (service, _) = service().await;

        let admin = service
            .verify_credentials("root", "admin-password", &auth())
            .await
            .unwrap();

        assert_eq!(admin.to_string(), "root");
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let (service, _) = service().await;

        let result = service.verify_credentials("root", "nope", &auth()).await;

        assert!(matches!(result, Err(AdminError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn rejects_unknown_username() {
        let (service, _) = service().await;

        let result = service.verify_credentials("ghost", "x", &auth()).await;

        assert!(matches!(result, Err(AdminError::UnknownAdmin)));
    }

    #[tokio::test]
    async fn rejects_account_without_admin_flag() {
        let (service, storage) = service().await;
        let password = create_password_hash("pw", &auth().argon2).await.unwrap();
        let mut user = AdminUser::new(Identity::new("staff", "staff@example.com", password));
        user.is_admin = false;
        storage.put(user).await;

        let result = service.verify_credentials("staff", "pw", &auth()).await;

        assert!(matches!(result, Err(AdminError::NotAdmin)));
    }

    #[tokio::test]
    async fn rejects_inactive_account() {
        let (service, storage) = service().await;
        let password = create_password_hash("pw", &auth().argon2).await.unwrap();
        let mut user = AdminUser::new(Identity::new("former", "former@example.com", password));
        user.identity.is_active = false;
        storage.put(user).await;

        let result = service.verify_credentials("former", "pw", &auth()).await;

        assert!(matches!(result, Err(AdminError::Inactive)));
    }
}
