use reqwest::StatusCode;
use strum_macros::AsRefStr;
use thiserror::Error;

/// Failures talking to the external store. `Display` renders the raw
/// underlying message because it is relayed to the caller unchanged.
#[derive(Error, Debug, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum StoreError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{body}")]
    Api { status: StatusCode, body: String },

    #[error("Unexpected response from store: {0}")]
    UnexpectedShape(#[source] serde_json::Error),

    #[error("Failed to encode row: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Store misconfigured: {0}")]
    Config(String),
}
