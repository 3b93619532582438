use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    AddRecordRequest, CategoryResponse, ClientConfigResponse, MessageResponse, RecordResponse,
    UpdateRecordRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "accounting-service API",
        version = "1.0.0",
        description = "Personal bookkeeping records and categories backed by SQLite"
    ),
    paths(
        handlers::health::health_handler,
        handlers::add::add_record_handler,
        handlers::list::list_records_handler,
        handlers::update::update_record_handler,
        handlers::delete::delete_record_handler,
        handlers::categories::list_categories_handler,
        handlers::client_config::client_config_handler
    ),
    components(
        schemas(
            AddRecordRequest,
            UpdateRecordRequest,
            MessageResponse,
            RecordResponse,
            CategoryResponse,
            ClientConfigResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "records", description = "Bookkeeping record operations"),
        (name = "categories", description = "Record categories"),
        (name = "client", description = "Browser client settings")
    )
)]
pub struct ApiDoc;
