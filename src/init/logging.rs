use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::config::{LogFormat, Settings};

use super::StartupError;

/// Installs the global subscriber. `RUST_LOG` wins over `logging.filter`.
pub fn init_logging(settings: &Settings) -> Result<(), StartupError> {
    LogTracer::init()?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.logging.filter)?,
    };

    let subscriber = Registry::default().with(filter);

    match settings.logging.format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            subscriber.with(fmt::layer().pretty().with_target(true)),
        )?,
        LogFormat::Compact => tracing::subscriber::set_global_default(
            subscriber.with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_thread_ids(true),
            ),
        )?,
        LogFormat::Json => tracing::subscriber::set_global_default(
            subscriber.with(fmt::layer().json().with_current_span(true)),
        )?,
    }

    Ok(())
}
