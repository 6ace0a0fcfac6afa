use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use qrcode::EcLevel;

use crate::errors::app_error::AppError;
use crate::models::validation_policy::ValidationPolicy;
use crate::structs::qr_request::QrQuery;

pub const DEFAULT_SCALE: i64 = 10;
pub const DEFAULT_BORDER: i64 = 4;

/// Error correction level of the generated symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrection {
    pub const ALLOWED: [&'static str; 4] = ["L", "M", "Q", "H"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        }
    }

    pub fn ec_level(&self) -> EcLevel {
        match self {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = ();

    // Case-sensitive: "m" is not a level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sanitized parameters of a single QR request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequestParams {
    pub data: String,
    pub scale: i64,
    pub border: i64,
    pub error_correction: ErrorCorrection,
    pub micro: bool,
}

impl QrRequestParams {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            scale: DEFAULT_SCALE,
            border: DEFAULT_BORDER,
            error_correction: ErrorCorrection::default(),
            micro: false,
        }
    }

    /// Build request parameters from the raw query using the deployment's policy.
    ///
    /// Under [`ValidationPolicy::Lenient`] a missing or empty `data` is the only
    /// rejection; every other bad value falls back to its default. Under
    /// [`ValidationPolicy::Strict`] every bad value is reported as a field error.
    pub fn from_query(query: QrQuery, policy: ValidationPolicy) -> Result<Self, AppError> {
        match policy {
            ValidationPolicy::Lenient => Self::from_query_lenient(query),
            ValidationPolicy::Strict => Self::from_query_strict(query),
        }
    }

    fn from_query_lenient(query: QrQuery) -> Result<Self, AppError> {
        let data = match query.data {
            Some(data) if !data.is_empty() => data,
            _ => return Err(AppError::MissingData),
        };

        Ok(Self {
            data,
            scale: parse_int_or(query.scale.as_deref(), DEFAULT_SCALE),
            border: parse_int_or(query.border.as_deref(), DEFAULT_BORDER),
            error_correction: query
                .error
                .as_deref()
                .and_then(|e| e.parse().ok())
                .unwrap_or_default(),
            micro: query.micro.as_deref().is_some_and(parse_bool_lenient),
        })
    }

    fn from_query_strict(query: QrQuery) -> Result<Self, AppError> {
        query.check()?;

        // check() guarantees every present value parses
        let data = query.data.unwrap_or_default();
        Ok(Self {
            data,
            scale: parse_int_or(query.scale.as_deref(), DEFAULT_SCALE),
            border: parse_int_or(query.border.as_deref(), DEFAULT_BORDER),
            error_correction: query
                .error
                .as_deref()
                .and_then(|e| e.parse().ok())
                .unwrap_or_default(),
            micro: query
                .micro
                .as_deref()
                .and_then(parse_bool_strict)
                .unwrap_or(false),
        })
    }
}

/// Integers outside the i64 range saturate rather than count as garbage,
/// so the renderer rejects them instead of the default quietly applying.
pub fn parse_int(value: &str) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn parse_int_or(value: Option<&str>, default: i64) -> i64 {
    value.and_then(parse_int).unwrap_or(default)
}

/// Only a case-insensitive "true" is true. "1" is false here.
pub fn parse_bool_lenient(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Accepts true/false/1/0 in any case, rejects everything else.
pub fn parse_bool_strict(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}
