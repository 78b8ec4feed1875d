//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The email address is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// The user store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "Request body should be an array")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i32,
    /// User name.
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Unique email address.
    #[schema(example = "ada@example.com")]
    email: String,
}

/// Candidate user submitted to `POST /users` or as a batch item.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewUserSchema {
    /// Required, non-empty.
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Required, non-empty and unique.
    #[schema(example = "ada@example.com")]
    email: String,
}

/// Outcome discriminator of a batch item.
#[derive(ToSchema)]
pub enum BatchItemStatusSchema {
    /// The user was stored.
    #[schema(rename = "success")]
    Success,
    /// The store rejected the user.
    #[schema(rename = "error")]
    Error,
}

/// OpenAPI schema for [`crate::domain::ports::BatchItemResult`].
///
/// `user` is present on success; `error` and `data` on failure.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BatchItemResult)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BatchItemResultSchema {
    status: BatchItemStatusSchema,
    user: Option<UserSchema>,
    #[schema(
        example = "duplicate key value violates unique constraint: email a@x.com already exists"
    )]
    error: Option<String>,
    /// The submitted item, echoed verbatim.
    data: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ports::BatchReport`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BatchReport)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BatchReportSchema {
    /// Number of entries in `results`.
    total: usize,
    /// One entry per eligible input item, in input order.
    results: Vec<BatchItemResultSchema>,
}
