//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

/// One field-level validation failure.
#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: &str) -> Self {
        FieldViolation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("product not found")]
    NotFound,
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("invalid price format")]
    InvalidPrice,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    fn plain(error: &str) -> Self {
        ErrorBody {
            error: error.to_string(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::plain("Internal Server Error"))
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::plain("Product not found")),
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Validation Error".to_string(),
                    details: serde_json::to_value(violations).ok(),
                },
            ),
            AppError::InvalidPrice => {
                (StatusCode::BAD_REQUEST, ErrorBody::plain("Invalid price format"))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::plain(msg)),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, ErrorBody::plain("Product not found"))
                } else if let Some(message) = constraint_violation(e) {
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorBody {
                            error: "Database Validation Error".to_string(),
                            details: Some(serde_json::Value::String(message)),
                        },
                    )
                } else {
                    tracing::error!(error = %e, "unexpected database error");
                    (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::plain("Internal Server Error"))
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

/// SQLSTATE class 23 is an integrity constraint violation (check, not-null,
/// unique). Those surface as a 400 rather than a generic 500.
fn constraint_violation(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) => {
            let code = db.code()?;
            if code.starts_with("23") {
                Some(db.message().to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}
