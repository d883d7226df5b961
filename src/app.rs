use crate::config::Settings;
use crate::docs::openapi::ApiDoc;
use crate::service::Service;
use crate::{
    handlers,
    middleware::{cors::cors_layer, trace_root::trace_root},
};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};

use tower_http::trace::TraceLayer;
use tracing::instrument;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

fn survey_routes() -> OpenApiRouter<Service> {
    OpenApiRouter::new()
        .route("/surveys/", get(handlers::survey::list))
        .route("/surveys/submit/", post(handlers::survey::submit))
}

#[instrument(name = "build_app", skip_all)]
pub fn build_app(service: Service, settings: &Settings) -> Router {
    let app_router = OpenApiRouter::new()
        .merge(survey_routes())
        .route("/test/", get(handlers::health))
        .layer(from_fn(trace_root))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.cors))
        .with_state(service);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(app_router)
        .split_for_parts();

    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
}
