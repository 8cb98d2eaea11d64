// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, field_errors } => {
                let mut response = json!({
                    "error": true,
                    "message": message,
                    "code": "VALIDATION_ERROR"
                });

                if let Some(field_errors) = field_errors {
                    response["field_errors"] = json!(field_errors);
                }

                response
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(
        message: impl Into<String>,
        field_errors: Option<HashMap<String, String>>,
    ) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        use crate::database::manager::DatabaseError;
        match err {
            DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("Database configuration error: {}", err);
                ApiError::service_unavailable("Database not configured")
            }
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            DatabaseError::MigrationError(msg) => {
                tracing::error!("Migration error: {}", msg);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
        }
    }
}

impl From<crate::ordering::OrderingError> for ApiError {
    fn from(err: crate::ordering::OrderingError) -> Self {
        use crate::ordering::OrderingError;
        match err {
            OrderingError::ScopeNotFound(scope) => {
                ApiError::not_found(format!("Scope not found: {}", scope))
            }
            OrderingError::EmptyRequest => {
                ApiError::validation_error("Ordering request must not be empty", None)
            }
            OrderingError::DuplicateId(_)
            | OrderingError::UnknownId { .. }
            | OrderingError::IncompleteSet { .. } => ApiError::bad_request(err.to_string()),
            OrderingError::Database(e) => {
                tracing::error!("Ordering write failed: {}", e);
                ApiError::internal_server_error("An error occurred while updating order")
            }
        }
    }
}

impl From<crate::services::catalog_service::CatalogError> for ApiError {
    fn from(err: crate::services::catalog_service::CatalogError) -> Self {
        use crate::services::catalog_service::CatalogError;
        match err {
            CatalogError::CourseNotFound(id) => {
                ApiError::not_found(format!("Course not found: {}", id))
            }
            CatalogError::SubjectNotFound(id) => {
                ApiError::not_found(format!("Subject not found: {}", id))
            }
            CatalogError::TopicNotFound(id) => {
                ApiError::not_found(format!("Topic not found: {}", id))
            }
            CatalogError::Manager(e) => e.into(),
            CatalogError::Database(e) => {
                tracing::error!("Catalog query failed: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::content_service::ContentError> for ApiError {
    fn from(err: crate::services::content_service::ContentError) -> Self {
        use crate::services::content_service::ContentError;
        match err {
            ContentError::TopicNotFound(id) => {
                ApiError::not_found(format!("Topic not found: {}", id))
            }
            ContentError::LessonNotFound(id) => {
                ApiError::not_found(format!("Lesson not found: {}", id))
            }
            ContentError::PageNotFound(id) => {
                ApiError::not_found(format!("Page not found: {}", id))
            }
            ContentError::BlockNotFound(id) => {
                ApiError::not_found(format!("Block not found: {}", id))
            }
            ContentError::Ordering(e) => e.into(),
            ContentError::Manager(e) => e.into(),
            ContentError::Database(e) => {
                tracing::error!("Content query failed: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::OrderingError;
    use uuid::Uuid;

    #[test]
    fn ordering_errors_map_to_client_statuses() {
        let err: ApiError = OrderingError::ScopeNotFound("lesson x".to_string()).into();
        assert_eq!(err.status_code(), 404);

        let err: ApiError = OrderingError::EmptyRequest.into();
        assert_eq!(err.status_code(), 400);

        let err: ApiError = OrderingError::DuplicateId(Uuid::new_v4()).into();
        assert_eq!(err.status_code(), 400);

        let err: ApiError = OrderingError::IncompleteSet {
            scope: "page y".to_string(),
            missing: 2,
            total: 5,
        }
        .into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn validation_error_carries_field_errors() {
        let mut fields = HashMap::new();
        fields.insert("page_ids".to_string(), "must not be empty".to_string());
        let err = ApiError::validation_error("Invalid request", Some(fields));
        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["page_ids"], "must not be empty");
    }
}
