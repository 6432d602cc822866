//! OpenAPI document for the query routes.

use utoipa::OpenApi;

use super::handlers;
use crate::records::LabRecord;

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(title = "Lab Records API", description = "Read-only queries over lab records"),
    paths(
        handlers::list_root,
        handlers::list_records,
        handlers::list_names,
        handlers::search_records,
        handlers::records_by_lab_name,
        handlers::health,
    ),
    components(schemas(LabRecord)),
    tags(
        (name = "lab-records", description = "Lab record queries"),
        (name = "service", description = "Service status")
    )
)]
pub struct ApiDoc;
