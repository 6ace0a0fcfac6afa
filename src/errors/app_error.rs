use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use validator::ValidationError;

pub const MISSING_DATA_MESSAGE: &str = "The 'data' parameter is required to generate a QR code.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", MISSING_DATA_MESSAGE)]
    MissingData,

    #[error("Invalid query parameters")]
    Validation(Vec<FieldError>),

    #[error("QR code generation error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid rendering parameters: {0}")]
    Render(String),
}

/// One rejected query parameter under the strict policy
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl FieldError {
    pub fn from_validation(field: &str, err: &ValidationError) -> Self {
        let input = err
            .params
            .get("input")
            .and_then(|v| v.as_str())
            .map(String::from);
        let allowed = err.params.get("allowed").and_then(|v| v.as_array()).map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        });

        Self {
            field: field.to_string(),
            code: err.code.to_string(),
            message: err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for '{}'", field)),
            input,
            allowed,
        }
    }
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    errors: &'a [FieldError],
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingData => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Encode(_) | AppError::Image(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::MissingData => HttpResponse::NotFound()
                .content_type(ContentType::plaintext())
                .body(MISSING_DATA_MESSAGE),
            AppError::Validation(fields) => {
                HttpResponse::UnprocessableEntity().json(ValidationBody { errors: fields })
            }
            other => {
                log::error!("{}", other);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": other.to_string()
                }))
            }
        }
    }
}
