//! Error types for value formatting and row rendering.
//!
//! This module provides [`RenderError`], the error type shared by the
//! formatter and the row-template engine. It is deliberately small: every
//! variant is a programmer/configuration mistake that should surface to the
//! integrator immediately, so there is no retry or fallback machinery.

use std::fmt;

/// Error type for formatting and template operations.
///
/// All variants abort the render call that produced them; the widget never
/// substitutes a fallback value for a row that failed to format.
#[derive(Debug)]
pub enum RenderError {
    /// The requested format kind is not known to the formatter.
    UnsupportedFormat(String),

    /// The value cannot be rendered in the requested format
    /// (e.g. `integer` applied to a non-numeric string).
    InvalidValue {
        /// Format kind that was requested.
        format: String,
        /// What went wrong with the value.
        message: String,
    },

    /// Row template syntax error (unclosed or empty token).
    Template(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedFormat(kind) => {
                write!(f, "unsupported format kind: {}", kind)
            }
            RenderError::InvalidValue { format, message } => {
                write!(f, "cannot format value as {}: {}", format, message)
            }
            RenderError::Template(msg) => write!(f, "template error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::UnsupportedFormat("spreadsheet".to_string());
        assert!(err.to_string().contains("unsupported format kind"));
        assert!(err.to_string().contains("spreadsheet"));

        let err = RenderError::InvalidValue {
            format: "integer".to_string(),
            message: "not a number".to_string(),
        };
        assert!(err.to_string().contains("integer"));
        assert!(err.to_string().contains("not a number"));
    }
}
