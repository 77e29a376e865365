//! Typed error handling for the BizTime API
//!
//! Every failure raised by a store, a request extractor or a resource service
//! is an [`ApiError`]. Callers can match on the concrete variant, or on the
//! coarse [`ErrorKind`] classification when they only care about the class of
//! failure (not found, constraint violation, validation failure, ...).
//!
//! # Error Categories
//!
//! - [`EntityError`]: the requested company/invoice/industry does not exist
//! - [`ValidationError`]: the request body or path is malformed or breaks a rule
//! - [`StorageError`]: the store rejected a statement or could not be reached
//! - [`ConfigError`]: configuration could not be loaded (startup only)
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get("apple").await {
//!     Ok(company) => println!("{:?}", company),
//!     Err(err) if err.kind() == ErrorKind::NotFound => println!("no such company"),
//!     Err(err) => eprintln!("{}", err),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Coarse classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    ConstraintViolation,
    ValidationFailure,
    Storage,
    Internal,
}

/// The main error type for the BizTime API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity lookups (get/update/delete on a missing row)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Malformed or rule-breaking input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store backend failures, including constraint violations
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Shorthand for a missing entity
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        ApiError::Entity(EntityError::NotFound {
            entity_type,
            key: key.to_string(),
        })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Entity(EntityError::NotFound { .. }) => ErrorKind::NotFound,
            ApiError::Validation(_) => ErrorKind::ValidationFailure,
            ApiError::Storage(StorageError::ConstraintViolation { .. }) => {
                ErrorKind::ConstraintViolation
            }
            ApiError::Storage(_) => ErrorKind::Storage,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ConstraintViolation => StatusCode::CONFLICT,
            ErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
            ErrorKind::Storage | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "ENTITY_NOT_FOUND",
            ErrorKind::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorKind::ValidationFailure => "VALIDATION_ERROR",
            ErrorKind::Storage => "STORAGE_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key,
                }))
            }
            ApiError::Storage(StorageError::ConstraintViolation { constraint, .. }) => {
                Some(serde_json::json!({ "constraint": constraint }))
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ApiError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({
                    "fields": [{ "field": field, "message": message }]
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("{entity_type} '{key}' not found")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not JSON at all
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Body is JSON but does not match the request schema
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    #[error("Invalid {entity_type} id: '{value}'")]
    InvalidId {
        entity_type: &'static str,
        value: String,
    },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldValidationError {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        // field_errors() is a HashMap; keep the output deterministic
        fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Which store rule rejected a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Unique,
    ForeignKey,
    Check,
}

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Uniqueness or referential-integrity rule rejected the statement
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        constraint: Constraint,
        message: String,
    },

    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// A previous writer panicked while holding the in-memory tables
    #[error("Store lock poisoned: {message}")]
    Poisoned { message: String },
}

impl StorageError {
    pub fn unique(message: impl Into<String>) -> Self {
        StorageError::ConstraintViolation {
            constraint: Constraint::Unique,
            message: message.into(),
        }
    }

    pub fn foreign_key(message: impl Into<String>) -> Self {
        StorageError::ConstraintViolation {
            constraint: Constraint::ForeignKey,
            message: message.into(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for BizTime operations
pub type ApiResult<T> = Result<T, ApiError>;
