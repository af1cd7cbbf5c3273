//! Error types for widget configuration and the resolve/organize pipeline.

use thiserror::Error;

use factsheet_render::RenderError;

/// Errors raised while validating widget configuration and resolving
/// attribute specs.
///
/// Every variant is a construction-time failure: it aborts `build()` before
/// any markup is produced, and none of them are recoverable. They are
/// programmer/configuration mistakes meant to surface to the integrator.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A shorthand string did not match the `name`, `name:format` or
    /// `name:format:label` grammar.
    #[error(
        "attribute shorthand {spec:?} is not of the form \"name\", \"name:format\" or \"name:format:label\""
    )]
    BadShorthand {
        /// The offending shorthand string.
        spec: String,
    },

    /// A group declaration carried no label.
    #[error("group declaration at index {index} requires a label")]
    GroupWithoutLabel {
        /// Zero-based index of the entry in the attribute list.
        index: usize,
    },

    /// An entry had neither an attribute name nor both a label and a value,
    /// leaving no way to derive what to display.
    #[error(
        "attribute at index {index} needs an attribute name, or both a label and a value"
    )]
    MissingAttribute {
        /// Zero-based index of the entry in the attribute list.
        index: usize,
    },

    /// The record has no value under the configured primary-key name.
    #[error("record has no {key:?} attribute to use as the primary key")]
    MissingPrimaryKey {
        /// The configured primary-key attribute name.
        key: String,
    },
}

/// Composite error for call sites that build and render in one chain.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Construction-time configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Render-time formatting or template failure.
    #[error(transparent)]
    Render(#[from] RenderError),
}
