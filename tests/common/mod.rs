#![allow(dead_code, unused_imports)]

mod client;
mod fake_store;
mod server;

use axum::Router;
pub use client::TestAppClient;
pub use fake_store::{spawn_fake_store, FakeStoreHandle, FAKE_API_KEY};
use survey_api::{build_app, init_storage, Settings, TestServiceBuilder};

pub use server::{spawn_test_app, TestAppHandle};

/// No process listens on the discard port, so every request fails to connect.
pub const UNREACHABLE_STORE_URL: &str = "http://127.0.0.1:9";

pub fn test_settings() -> Settings {
    Settings::from_file("test").unwrap()
}

/// App over the in-memory store.
pub async fn create_test_app() -> Router {
    let service = TestServiceBuilder::new().build().await;
    build_app(service, &test_settings())
}

/// App talking to a PostgREST endpoint, the same way production does.
pub async fn create_postgrest_app(url: &str, api_key: &str) -> Router {
    let settings = test_settings().with_postgrest_store(url, api_key);
    let service = init_storage(&settings).await.unwrap();
    build_app(service, &settings)
}
