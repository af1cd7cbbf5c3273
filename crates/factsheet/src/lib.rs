//! # Factsheet - Detail View Widget
//!
//! Factsheet renders a labeled key/value view of a single data record into
//! HTML: each attribute becomes a row, rows can be gathered into labeled
//! sections, values go through a pluggable formatter, and an optional action
//! bar (back/update/delete) sits in the header.
//!
//! The interesting part is the normalization pipeline. Attributes are
//! described as a heterogeneous list — shorthand strings or full
//! descriptors — and resolved against the record:
//!
//! - [`resolve`](resolve::resolve_attributes): shorthand parsing, label and
//!   value derivation, visibility filtering
//! - [`organize`](organize::organize): reshaping the flat list into sections;
//!   the first ungrouped attribute implicitly heads a section that holds
//!   everything after it
//!
//! Rendering is thin glue over `factsheet-render`.
//!
//! ## Quick Start
//!
//! ```rust
//! use factsheet::{detail_view, FieldSpec};
//! use serde_json::json;
//!
//! let record = json!({
//!     "id": 7,
//!     "title": "Annual report",
//!     "pages": 42,
//!     "author": {"name": "Ada"},
//! });
//!
//! let html = detail_view(&record)
//!     .title("document")
//!     .attributes([
//!         factsheet::AttrSpec::from("title"),
//!         "pages:integer".into(),
//!         FieldSpec::new("author.name").label("Author").into(),
//!     ])
//!     .build()
//!     .unwrap()
//!     .render()
//!     .unwrap();
//!
//! assert!(html.contains("Annual report"));
//! assert!(html.contains("Ada"));
//! ```
//!
//! ## Grouping
//!
//! By default the first attribute heads an implicit section wrapping the
//! whole list. Explicit sections are declared inline and absorb the fields
//! that follow them:
//!
//! ```rust
//! use factsheet::{detail_view, FieldSpec};
//! use serde_json::json;
//!
//! let record = json!({"id": 1, "street": "Main St 1", "city": "Utrecht"});
//! let view = detail_view(&record)
//!     .attributes([
//!         FieldSpec::group("Address").into(),
//!         factsheet::AttrSpec::from("street"),
//!         "city".into(),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let section = view.descriptors()[0].as_group().unwrap();
//! assert_eq!(section.label, "Address");
//! assert_eq!(section.columns.len(), 2);
//! ```

pub mod actions;
pub mod attr;
mod error;
pub mod organize;
pub mod record;
pub mod resolve;
mod view;

pub use attr::{
    AttrSpec, CanonicalField, Descriptor, FieldSpec, GroupContainer, ValueSource, ViewContext,
};
pub use error::{ConfigError, ViewError};
pub use record::{humanize, LabeledRecord, Record};
pub use view::{
    detail_view, DetailView, DetailViewBuilder, RowFn, RowTemplate, DEFAULT_ROW_TEMPLATE,
};

// Re-exported rendering foundation, so integrators rarely need a direct
// dependency on factsheet-render.
pub use factsheet_render::{Attrs, FormatSpec, Formatter, RenderError, ValueFormatter};
