use std::collections::HashMap;
use std::error::Error as StdError;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Hotel not found with id: {0}")]
    HotelNotFound(i64),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::HotelNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidArgument(_) | Self::Validation(_) | Self::Database(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::HotelNotFound(_) => {
                HttpResponse::NotFound().json(json!({ "error": self.to_string() }))
            }
            Self::InvalidArgument(message) => {
                HttpResponse::BadRequest().json(json!({ "error": message }))
            }
            Self::Validation(errors) => HttpResponse::BadRequest().json(field_errors(errors)),
            // Outer wrappers are dropped in favour of the root cause text.
            Self::Database(err) => {
                HttpResponse::BadRequest().json(json!({ "error": root_cause_message(err) }))
            }
        }
    }
}

/// Flattens validator output into one `{field: message}` entry per violated
/// field, with nested fields keyed as `address.city`.
fn field_errors(errors: &ValidationErrors) -> HashMap<String, String> {
    let mut map = HashMap::new();
    collect_field_errors(errors, "", &mut map);
    map
}

fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut HashMap<String, String>) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(violations) => {
                if let Some(violation) = violations.first() {
                    let message = violation
                        .message
                        .as_ref()
                        .map_or_else(|| violation.code.to_string(), ToString::to_string);
                    out.insert(key, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, &key, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, &format!("{key}[{index}]"), out);
                }
            }
        }
    }
}

fn root_cause_message(err: &(dyn StdError + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
