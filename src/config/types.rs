use std::net::SocketAddr;

use serde::Deserialize;
use strum_macros::AsRefStr;

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreKind {
    Postgrest,
    Memory,
}

#[derive(Clone, Deserialize)]
pub struct StoreSettings {
    pub backend: StoreKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub table: String,
}

impl std::fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings")
            .field("backend", &self.backend)
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("table", &self.table)
            .finish()
    }
}

#[derive(Debug, Deserialize, Copy, Clone, PartialEq, Eq, AsRefStr)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub argon2: Argon2Config,
    #[serde(default)]
    pub(crate) admins: Vec<AdminCredentials>,
}

#[derive(Clone, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("email", &self.email)
            .finish()
    }
}
