use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::app_error::{AppError, FieldError};
use crate::models::qr_params::{ErrorCorrection, parse_bool_strict, parse_int};

/// Raw `GET /qr` query string. Every field is kept as text so that the
/// active validation policy decides what a bad value means.
#[derive(Validate, Debug, Default, Clone)]
pub struct QrQuery {
    #[validate(
        required(message = "Field required"),
        length(min = 1, message = "The 'data' parameter must not be empty")
    )]
    pub data: Option<String>,
    #[validate(custom(function = "validate_integer"))]
    pub scale: Option<String>,
    #[validate(custom(function = "validate_integer"))]
    pub border: Option<String>,
    #[validate(custom(function = "validate_error_correction"))]
    pub error: Option<String>,
    #[validate(custom(function = "validate_boolean"))]
    pub micro: Option<String>,
}

/// Field order used when reporting errors
const FIELDS: [&str; 5] = ["data", "scale", "border", "error", "micro"];

impl QrQuery {
    /// Collect the known parameters from raw query pairs. A repeated key keeps
    /// its last value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "data" => &mut query.data,
                "scale" => &mut query.scale,
                "border" => &mut query.border,
                "error" => &mut query.error,
                "micro" => &mut query.micro,
                _ => continue,
            };
            *slot = Some(value);
        }
        query
    }

    /// Run the strict checks and flatten any failures into [`AppError::Validation`].
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|errors| AppError::Validation(field_errors(&errors)))
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    FIELDS
        .iter()
        .filter_map(|name| by_field.get(*name).map(|errs| (*name, errs)))
        .flat_map(|(name, errs)| errs.iter().map(move |e| FieldError::from_validation(name, e)))
        .collect()
}

fn validate_integer(value: &str) -> Result<(), ValidationError> {
    match parse_int(value) {
        Some(_) => Ok(()),
        None => Err(invalid("int_parsing", "Input should be a valid integer", value)),
    }
}

fn validate_error_correction(value: &str) -> Result<(), ValidationError> {
    if value.parse::<ErrorCorrection>().is_ok() {
        return Ok(());
    }
    let mut err = invalid("enum", "Input should be 'L', 'M', 'Q' or 'H'", value);
    err.add_param("allowed".into(), &ErrorCorrection::ALLOWED);
    Err(err)
}

fn validate_boolean(value: &str) -> Result<(), ValidationError> {
    match parse_bool_strict(value) {
        Some(_) => Ok(()),
        None => Err(invalid("bool_parsing", "Input should be a valid boolean", value)),
    }
}

fn invalid(code: &'static str, message: &'static str, input: &str) -> ValidationError {
    let mut err = ValidationError::new(code).with_message(message.into());
    err.add_param("input".into(), &input);
    err
}
