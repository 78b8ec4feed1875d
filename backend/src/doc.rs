//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer (users,
//! batch creation, health) and the schema wrappers from
//! [`crate::inbound::http::schemas`], which describe domain types without
//! coupling them to utoipa.
//!
//! The generated document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    BatchItemResultSchema, BatchItemStatusSchema, BatchReportSchema, ErrorCodeSchema,
    ErrorSchema, NewUserSchema, UserSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "Create and list users, including partial-failure batch creation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::batch_create,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        NewUserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        BatchReportSchema,
        BatchItemResultSchema,
        BatchItemStatusSchema
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
