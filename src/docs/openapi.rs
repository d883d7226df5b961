use utoipa::OpenApi;

use crate::handlers::types::{
    ErrorResponse, MessageResponse, SubmitSurvey, SubmitSurveyResponse, SurveysResponse,
};
use crate::storage::Survey;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health,
        crate::handlers::survey::submit,
        crate::handlers::survey::list,
    ),
    components(
        schemas(
            Survey,
            SubmitSurvey,
            MessageResponse,
            SubmitSurveyResponse,
            SurveysResponse,
            ErrorResponse
        ),
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "surveys", description = "Submit and list survey answers")
    ),
    info(
        title = "Survey API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
