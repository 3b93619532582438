// Route path constants - single source of truth for all API paths.
// The record/category paths match what the browser client already calls.

pub const HEALTH: &str = "/health";
pub const ADD_RECORD: &str = "/api/add_record";
pub const GET_RECORDS: &str = "/api/get_records";
pub const DELETE_RECORD: &str = "/api/delete_record/{id}";
pub const UPDATE_RECORD: &str = "/api/update_record/{id}";
pub const GET_CATEGORIES: &str = "/api/get_categories";
pub const CLIENT_CONFIG: &str = "/api/client_config";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";
