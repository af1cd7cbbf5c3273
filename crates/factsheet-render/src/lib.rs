//! # Factsheet Render - Markup and Formatting Foundation
//!
//! `factsheet-render` provides the rendering primitives used by the
//! `factsheet` detail-view widget: HTML assembly helpers, display formatting
//! for raw values, and the token-substitution engine for row templates.
//!
//! This crate is the rendering foundation for `factsheet`, but it has no
//! knowledge of records or attribute specs and can be used on its own for
//! any small markup-assembly job.
//!
//! ## Core Concepts
//!
//! - [`Formatter`]: converts a raw value + [`FormatSpec`] into display markup
//! - [`ValueFormatter`]: the default formatter (text/raw/boolean/decimal/...)
//! - [`Attrs`]: ordered, escaped markup attribute map
//! - [`substitute`]: `{token}` substitution for row templates
//! - [`RenderError`]: the single error type for all of the above
//!
//! ## Quick Start
//!
//! ```rust
//! use factsheet_render::{html, substitute, FormatSpec, Formatter, ValueFormatter};
//! use serde_json::json;
//!
//! let formatter = ValueFormatter::default();
//! let value = formatter
//!     .format(&json!("hello & goodbye"), &FormatSpec::text())
//!     .unwrap();
//!
//! let row = substitute(
//!     "<th{captionOptions}>{label}</th><td{contentOptions}>{value}</td>",
//!     &[
//!         ("label", "Greeting"),
//!         ("value", &value),
//!         ("captionOptions", ""),
//!         ("contentOptions", &html::Attrs::with_class("view-data").render()),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     row,
//!     "<th>Greeting</th><td class=\"view-data\">hello &amp; goodbye</td>"
//! );
//! ```

mod error;
pub mod format;
pub mod html;
pub mod template;

pub use error::RenderError;
pub use format::{FormatSpec, Formatter, ValueFormatter};
pub use html::Attrs;
pub use template::substitute;
