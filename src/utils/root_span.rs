use axum::http::StatusCode;
use tracing::{field, info_span, Span};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct RootSpan {
    span: Span,
    request_id: Uuid,
}

impl RootSpan {
    pub fn new(method: &str, uri: &str) -> Self {
        let request_id = Uuid::new_v4();
        Self {
            span: info_span!(
                "http_request",
                method = %method,
                uri    = %uri,
                request_id = %request_id,
                http_status_code = tracing::field::Empty,
                status = tracing::field::Empty,
                error_kind = tracing::field::Empty,
                survey_count = tracing::field::Empty,
            ),
            request_id,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn record(&self) -> RootSpanRecorder<'_> {
        RootSpanRecorder::new(&self.span)
    }
}

pub struct RootSpanRecorder<'a> {
    span: &'a Span,
}

impl<'a> RootSpanRecorder<'a> {
    pub fn new(span: &'a Span) -> Self {
        Self { span }
    }

    pub fn http_status_code(&self, status_code: &StatusCode) -> &Self {
        self.span.record("http_status_code", status_code.as_u16());
        self
    }

    pub fn status(&self, value: &str) -> &Self {
        self.span.record("status", field::display(value));
        self
    }

    pub fn error_kind(&self, kind: &str) -> &Self {
        self.span.record("error_kind", field::display(kind));
        self
    }

    pub fn survey_count(&self, count: usize) -> &Self {
        self.span.record("survey_count", count);
        self
    }
}
