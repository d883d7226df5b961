use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Response,
};
use serde_json::Value;
use tracing::{error, info, instrument};

use super::{StoreError, Survey, SurveyStore};
use crate::{config::StoreSettings, trace_err};

const REST_PATH: &str = "rest/v1";

/// Client for a hosted PostgREST endpoint. Built once at startup and shared.
pub struct PostgrestStore {
    client: Client,
    table_url: String,
}

impl PostgrestStore {
    pub fn new(settings: &StoreSettings) -> Result<Self, StoreError> {
        let url = settings
            .url
            .as_deref()
            .ok_or_else(|| StoreError::Config("store.url is not set".into()))?;
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or_else(|| StoreError::Config("store.api_key is not set".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", sensitive_header(api_key)?);
        headers.insert(AUTHORIZATION, sensitive_header(&format!("Bearer {api_key}"))?);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            table_url: format!(
                "{}/{REST_PATH}/{}",
                url.trim_end_matches('/'),
                settings.table
            ),
        })
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue, StoreError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| StoreError::Config("store.api_key is not a valid header value".into()))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Relays non-2xx responses as-is and expects a JSON array otherwise.
async fn read_rows(response: Response) -> Result<Vec<Value>, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) if !body.trim().is_empty() => body,
            _ => status.to_string(),
        };
        error!(status = %status, body = %body, "store rejected request");
        return Err(StoreError::Api { status, body });
    }

    let bytes = response.bytes().await?;
    trace_err!(
        serde_json::from_slice::<Vec<Value>>(&bytes).map_err(StoreError::UnexpectedShape),
        "store returned a non-array body"
    )
}

#[async_trait]
impl SurveyStore for PostgrestStore {
    #[instrument(name = "PostgrestStore::insert", skip_all, fields(url = %self.table_url))]
    async fn insert(&self, survey: &Survey) -> Result<Vec<Value>, StoreError> {
        let response = trace_err!(
            self.client
                .post(&self.table_url)
                .header("Prefer", "return=representation")
                .json(survey)
                .send()
                .await,
            "failed to send insert to store"
        )?;

        let rows = read_rows(response).await?;
        info!(rows = rows.len(), "store insert succeeded");
        Ok(rows)
    }

    #[instrument(name = "PostgrestStore::select_all", skip_all, fields(url = %self.table_url))]
    async fn select_all(&self) -> Result<Vec<Value>, StoreError> {
        let response = trace_err!(
            self.client
                .get(&self.table_url)
                .query(&[("select", "*")])
                .send()
                .await,
            "failed to send select to store"
        )?;

        let rows = read_rows(response).await?;
        info!(rows = rows.len(), "store select succeeded");
        Ok(rows)
    }
}
