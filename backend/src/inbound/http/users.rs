//! Users API handlers.
//!
//! ```text
//! GET /users
//! POST /users {"name":"Ada","email":"ada@example.com"}
//! POST /batch-create [{"name":"Ada","email":"ada@example.com"}, ...]
//! ```
//!
//! Bodies are read as raw JSON so that shape errors surface as domain
//! validation messages instead of extractor rejections.

use actix_web::{get, post, web};
use serde_json::Value;
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::BatchReport;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BatchReportSchema, ErrorSchema, NewUserSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Parse a request body, treating an empty or malformed body as `null`.
fn parse_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|err| {
        debug!(error = %err, "request body is not valid JSON");
        Value::Null
    })
}

/// List every stored user ordered by identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Create a single user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUserSchema,
    responses(
        (status = 200, description = "Created user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let user = state.user_creation.create_user(parse_body(&body)).await?;
    Ok(web::Json(user))
}

/// Create users from an array, reporting a result per eligible item.
///
/// Items missing `name` or `email` are skipped without a result entry. A
/// failed insert is reported in its slot and does not affect other items.
#[utoipa::path(
    post,
    path = "/batch-create",
    request_body = Vec<NewUserSchema>,
    responses(
        (status = 200, description = "Per-item outcomes in input order", body = BatchReportSchema),
        (status = 400, description = "Body is not an array", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "batchCreateUsers"
)]
#[post("/batch-create")]
pub async fn batch_create(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<BatchReport>> {
    let report = state.user_batch.submit_batch(parse_body(&body)).await?;
    Ok(web::Json(report))
}
