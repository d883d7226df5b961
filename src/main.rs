use std::net::SocketAddr;

use survey_api::{init_logging, Settings, StartupError};

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

#[derive(Debug, Error)]
enum SurveyAppError {
    #[error("Startup error")]
    Startup(#[from] StartupError),

    #[error("Io error")]
    Io(#[from] std::io::Error),
}

fn main() -> Result<(), SurveyAppError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

#[cfg(unix)]
async fn shutdown_signal() {
    let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
        tracing::error!("failed to bind to SIGTERM, waiting for Ctrl+C only");
        let _ = signal::ctrl_c().await;
        return;
    };

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM received.");
        },
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("Ctrl+C received.");
}

async fn async_main() -> Result<(), SurveyAppError> {
    let settings = Settings::new()?;

    init_logging(&settings)?;

    let server_addr = settings.server_addr();
    let app = survey_api::init_app(&settings).await?;

    let listener = TcpListener::bind(&server_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}
