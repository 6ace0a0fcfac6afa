use std::fmt;
use std::str::FromStr;

/// How bad optional query parameters are treated.
///
/// One policy is chosen per deployment and applies to every parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Coerce bad values to their defaults
    #[default]
    Lenient,
    /// Reject bad values with a 422 listing each offending field
    Strict,
}

impl FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ValidationPolicy::Lenient),
            "strict" => Ok(ValidationPolicy::Strict),
            other => Err(format!(
                "unknown validation policy '{}', expected 'lenient' or 'strict'",
                other
            )),
        }
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPolicy::Lenient => f.write_str("lenient"),
            ValidationPolicy::Strict => f.write_str("strict"),
        }
    }
}
