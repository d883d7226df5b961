mod logging;
mod storage;

use crate::{service::admin::AdminError, storage::StoreError};
use thiserror::Error;

pub use logging::init_logging;
pub use storage::init_storage;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load configs")]
    LoadConfig(#[from] config::ConfigError),

    #[error("Failed to build store client")]
    StoreClient(#[from] StoreError),

    #[error("Failed to create admins")]
    CreateAdmins(#[from] AdminError),

    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to redirect log records to tracing")]
    SetLogger(#[from] tracing_log::log::SetLoggerError),

    #[error("Failed to set global tracing subscriber")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}
