use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, Response, StatusCode},
    middleware::Next,
};

use tracing::Instrument;

use crate::utils::RootSpan;

pub(crate) static REQUEST_ID_HEADER: &str = "x-request-id";

pub(crate) async fn trace_root(mut req: Request, next: Next) -> Result<Response<Body>, StatusCode> {
    let root_span = RootSpan::new(req.method().as_str(), req.uri().path());

    req.extensions_mut().insert(root_span.clone());

    let mut resp = next.run(req).instrument(root_span.span().clone()).await;

    root_span.record().http_status_code(&resp.status());

    if resp.status().is_client_error() || resp.status().is_server_error() {
        root_span.record().status("error");
    } else {
        root_span.record().status("ok");
    }

    if let Ok(value) = HeaderValue::from_str(&root_span.request_id().to_string()) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    Ok(resp)
}
