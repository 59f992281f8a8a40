//! # API Error Type
//!
//! Every failure a handler can produce, rendered as one JSON shape.
//!
//! ## Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source                          Status   code                         │
//! │  ──────────────────────────────  ──────   ───────────────────────────  │
//! │  ValidationErrors                 400     VALIDATION_ERROR (+ fields)  │
//! │  JsonRejection / QueryRejection   400     INVALID_REQUEST              │
//! │  wrongly typed body field         400     VALIDATION_ERROR (+ fields)  │
//! │  PathRejection                    400     INVALID_REQUEST              │
//! │  DbError::ForeignKeyViolation     400     VALIDATION_ERROR             │
//! │  CoreError::*NotFound             404     NOT_FOUND                    │
//! │  DbError::NotFound                404     NOT_FOUND                    │
//! │  CoreError::CollectionHasProducts 409     CONFLICT                     │
//! │  DbError::HasDependents           409     CONFLICT                     │
//! │  any other DbError                500     INTERNAL_ERROR (logged)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Body
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "Invalid input",
//!   "fields": { "title": ["title is required"] }
//! }
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use storefront_core::{CoreError, ValidationError, ValidationErrors};
use storefront_db::DbError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An HTTP error response.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub fields: Option<ValidationErrors>,
}

/// Wire shape of an error.
#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a ValidationErrors>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
            fields: None,
        }
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: "Invalid input".to_string(),
            fields: Some(errors),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    /// Storage failure; the detail is logged, never returned.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Request failed with internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", message)
    }

    /// Maps a write failure where a foreign key points at `field` = `id`.
    ///
    /// The referenced row vanished between the existence check and the
    /// write, so it reports the same way as a failed existence check.
    pub fn from_reference(err: DbError, field: &str, id: i64) -> Self {
        match err {
            DbError::ForeignKeyViolation { .. } => ApiError::validation(
                ValidationError::DoesNotExist {
                    field: field.to_string(),
                    id,
                }
                .into(),
            ),
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: &self.message,
            fields: self.fields.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        warn!(%errors, "Rejected invalid input");
        ApiError::validation(errors)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) | CoreError::CollectionNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            CoreError::CollectionHasProducts { .. } => ApiError::conflict(err.to_string()),
            CoreError::Validation(errors) => errors.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if !err.is_client_error() {
            return ApiError::internal(err);
        }
        match err {
            DbError::NotFound { entity, id } => match entity.as_str() {
                "Product" => CoreError::ProductNotFound(id).into(),
                "Collection" => CoreError::CollectionNotFound(id).into(),
                _ => ApiError::not_found(format!("{} not found: {}", entity, id)),
            },
            DbError::HasDependents { id, label, .. } => {
                CoreError::CollectionHasProducts { id, title: label }.into()
            }
            DbError::ForeignKeyViolation { message } => {
                warn!(%message, "Write rejected by foreign key");
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Referenced record does not exist",
                )
            }
            other => ApiError::internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        warn!(error = %rejection.body_text(), "Rejected request body");
        ApiError::new(status, "INVALID_REQUEST", rejection.body_text())
    }
}

/// A well-formed body whose field at `path` has the wrong type.
impl From<serde_path_to_error::Error<serde_json::Error>> for ApiError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let field = err.path().to_string();
        let reason = err.inner().to_string();

        // "." is the body itself, e.g. a string where an object belongs
        if field == "." {
            warn!(error = %reason, "Rejected request body");
            return ApiError::bad_request(reason);
        }

        ApiError::from(ValidationErrors::from(ValidationError::InvalidFormat {
            field,
            reason,
        }))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}
