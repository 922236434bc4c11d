//! Error types for galaxy generation.
//!
//! Every failure in this crate is a validation failure: a parameter outside
//! its domain, a malformed color, or a preset that could not be read. Once a
//! [`Field`](crate::Field) exists, animating it cannot fail.

use thiserror::Error;

/// Errors raised by the parameter store, the generator and preset loading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GalaxyError {
    /// A parameter value lies outside its documented domain.
    #[error("invalid value for `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the schema.
        name: &'static str,
        /// Human readable description of the violated constraint.
        reason: String,
    },

    /// A value of the wrong kind was written to a parameter.
    #[error("`{name}` expects a {expected} value")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
    },

    /// No parameter with this name exists.
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    /// A color string is not `#rgb` or `#rrggbb`.
    #[error("invalid color `{0}`: expected #rrggbb")]
    InvalidColor(String),

    /// A parameter preset could not be read, written or parsed.
    #[error("preset error: {0}")]
    Preset(String),
}

impl GalaxyError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        GalaxyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for GalaxyError {
    fn from(e: std::io::Error) -> Self {
        GalaxyError::Preset(e.to_string())
    }
}

impl From<serde_json::Error> for GalaxyError {
    fn from(e: serde_json::Error) -> Self {
        GalaxyError::Preset(e.to_string())
    }
}
