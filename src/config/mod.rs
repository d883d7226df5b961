pub(crate) mod types;

use std::net::SocketAddr;

use config::{Config, Environment, File};
use serde::Deserialize;
pub(crate) use types::{
    Argon2Config, AuthSettings, CorsConfig, LogFormat, LoggingConfig, ServerConfig, StoreKind,
    StoreSettings,
};

use crate::{init::StartupError, trace_err};

pub(crate) static STORE_URL_ENV: &str = "SUPABASE_URL";
pub(crate) static STORE_KEY_ENV: &str = "SUPABASE_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub(crate) store: StoreSettings,
    pub(crate) logging: LoggingConfig,
    pub(crate) server: ServerConfig,
    pub(crate) cors: CorsConfig,
    pub(crate) auth: AuthSettings,
}

impl Settings {
    pub fn new() -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or("development".into());

        Settings::from_file(&run_mode)
    }

    /// Layers `config/default`, `config/{file_name}` and `APP__*` variables.
    /// The hosted store's own `SUPABASE_URL`/`SUPABASE_KEY` variables win over all of them.
    pub fn from_file(file_name: &str) -> Result<Self, StartupError> {
        trace_err!(
            Config::builder()
                .add_source(File::with_name("config/default"))
                .add_source(File::with_name(&format!("config/{file_name}")).required(false))
                .add_source(Environment::with_prefix("APP").separator("__"))
                .set_override_option("store.url", std::env::var(STORE_URL_ENV).ok())?
                .set_override_option("store.api_key", std::env::var(STORE_KEY_ENV).ok())?
                .build()?
                .try_deserialize(),
            "failed to build app settings"
        )
        .map_err(Into::into)
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server.addr
    }

    pub fn store_backend(&self) -> StoreKind {
        self.store.backend
    }

    #[cfg(feature = "integration_tests")]
    pub fn with_postgrest_store(mut self, url: &str, api_key: &str) -> Self {
        self.store.backend = StoreKind::Postgrest;
        self.store.url = Some(url.to_string());
        self.store.api_key = Some(api_key.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const TABLE_ENV: &str = "APP__STORE__TABLE";

    /// Sets the variables for the duration of `f`, then removes them.
    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let result = f();
        for (key, _) in vars {
            std::env::remove_var(key);
        }
        result
    }

    #[test]
    #[serial]
    fn loads_test_settings() {
        let settings = Settings::from_file("test").unwrap();

        assert_eq!(settings.store.backend, StoreKind::Memory);
        assert_eq!(settings.store.table, "surveys");
        assert_eq!(settings.server_addr().ip().to_string(), "127.0.0.1");
        assert_eq!(settings.auth.admins.len(), 1);
    }

    #[test]
    #[serial]
    fn missing_override_file_falls_back_to_defaults() {
        let settings = Settings::from_file("no_such_mode").unwrap();

        assert_eq!(settings.store.table, "surveys");
        assert!(settings.auth.admins.is_empty());
    }

    #[test]
    #[serial]
    fn debug_output_hides_secrets() {
        let mut settings = Settings::from_file("test").unwrap();
        settings.store.api_key = Some("super-secret-key".into());

        let rendered = format!("{settings:?}");

        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("admin-password"));
    }

    #[test]
    #[serial]
    fn store_credentials_come_from_environment() {
        let settings = with_env(
            &[
                (STORE_URL_ENV, "https://abc.supabase.co"),
                (STORE_KEY_ENV, "service-key"),
            ],
            || Settings::from_file("test").unwrap(),
        );

        assert_eq!(settings.store.url.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(settings.store.api_key.as_deref(), Some("service-key"));
    }

    #[test]
    #[serial]
    fn prefixed_environment_wins_over_files() {
        let settings = with_env(&[(TABLE_ENV, "answers")], || {
            Settings::from_file("test").unwrap()
        });

        assert_eq!(settings.store.table, "answers");
        assert_eq!(settings.store.backend, StoreKind::Memory);
    }

    #[test]
    #[serial]
    fn store_variables_win_over_prefixed_ones() {
        let settings = with_env(
            &[
                ("APP__STORE__URL", "http://from-app-prefix"),
                (STORE_URL_ENV, "http://from-store-variable"),
            ],
            || Settings::from_file("test").unwrap(),
        );

        assert_eq!(settings.store.url.as_deref(), Some("http://from-store-variable"));
    }
}
