use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const FAKE_API_KEY: &str = "test-service-key";

#[derive(Default)]
struct FakeStore {
    rows: Mutex<Vec<Value>>,
    broken: AtomicBool,
}

/// Minimal PostgREST stand-in serving `/rest/v1/surveys`.
pub struct FakeStoreHandle {
    pub address: Url,
    state: Arc<FakeStore>,
}

impl FakeStoreHandle {
    pub fn rows(&self) -> Vec<Value> {
        self.state.rows.lock().unwrap().clone()
    }

    pub fn push_raw_row(&self, row: Value) {
        self.state.rows.lock().unwrap().push(row);
    }

    /// Makes every following request fail the way a broken table does.
    pub fn break_table(&self) {
        self.state.broken.store(true, Ordering::SeqCst);
    }
}

fn check_auth(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());

    if api_key == Some(FAKE_API_KEY) && bearer == Some(format!("Bearer {FAKE_API_KEY}").as_str()) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid API key", "hint": "Double check your key"})),
        ))
    }
}

fn check_table(state: &FakeStore) -> Result<(), (StatusCode, Json<Value>)> {
    if state.broken.load(Ordering::SeqCst) {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "code": "42P01",
                "message": "relation \"public.surveys\" does not exist"
            })),
        ))
    } else {
        Ok(())
    }
}

async fn insert(
    State(state): State<Arc<FakeStore>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if let Err(rejection) = check_auth(&headers).and_then(|_| check_table(&state)) {
        return rejection.into_response();
    }

    let mut rows = state.rows.lock().unwrap();
    let mut row = body;
    row["id"] = json!(rows.len() + 1);
    if row.get("created_at").is_none() {
        row["created_at"] = json!("2024-06-01T09:00:00.000000+00:00");
    }
    rows.push(row.clone());

    let return_representation = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("return=representation"));

    if return_representation {
        (StatusCode::CREATED, Json(json!([row]))).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn select(State(state): State<Arc<FakeStore>>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(rejection) = check_auth(&headers).and_then(|_| check_table(&state)) {
        return rejection.into_response();
    }

    let rows = state.rows.lock().unwrap().clone();
    Json(Value::Array(rows)).into_response()
}

pub async fn spawn_fake_store() -> FakeStoreHandle {
    let state = Arc::new(FakeStore::default());
    let app = Router::new()
        .route("/rest/v1/surveys", get(select).post(insert))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeStoreHandle {
        address: Url::parse(&format!("http://{}", addr)).unwrap(),
        state,
    }
}
