//! Attribute specifications and the descriptors they resolve into.
//!
//! Callers describe what to display as a list of [`AttrSpec`] entries: either
//! shorthand strings (`"title"`, `"price:decimal"`, `"dob:text:Born"`) or
//! full [`FieldSpec`] descriptors. Resolution turns each entry into a
//! [`CanonicalField`]; organization reshapes the flat list into the final
//! [`Descriptor`] sequence of leaf fields and [`GroupContainer`] sections.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use factsheet_render::{Attrs, FormatSpec};

use crate::record::Record;

/// Context handed to computed-value callbacks alongside the record.
#[derive(Clone, Debug)]
pub struct ViewContext {
    /// The widget title.
    pub title: String,
    /// The configured primary-key attribute name.
    pub primary_key: String,
    /// Noun used in user-facing action text ("item", "invoice", ...).
    pub item_name: String,
}

/// Callback that produces a display value from the record at resolve time.
pub type ValueFn = Rc<dyn Fn(&dyn Record, &ViewContext) -> Value>;

/// Where a field's value comes from: a literal, or a callback resolved once
/// during widget construction.
#[derive(Clone)]
pub enum ValueSource {
    /// A literal value used as-is.
    Literal(Value),
    /// A deferred callback, invoked exactly once with (record, context).
    /// Never invoked for group declarations.
    Computed(ValueFn),
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ValueSource::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

impl From<Value> for ValueSource {
    fn from(value: Value) -> Self {
        ValueSource::Literal(value)
    }
}

/// One attribute entry: shorthand string or full descriptor.
///
/// `From` impls let callers mix forms in a single list:
///
/// ```rust
/// use factsheet::attr::{AttrSpec, FieldSpec};
///
/// let attrs: Vec<AttrSpec> = vec![
///     "title".into(),
///     "price:decimal".into(),
///     FieldSpec::new("owner").label("Owner").into(),
/// ];
/// ```
#[derive(Clone, Debug)]
pub enum AttrSpec {
    /// `name`, `name:format` or `name:format:label`.
    Shorthand(String),
    /// A full descriptor.
    Field(FieldSpec),
}

impl From<&str> for AttrSpec {
    fn from(spec: &str) -> Self {
        AttrSpec::Shorthand(spec.to_string())
    }
}

impl From<String> for AttrSpec {
    fn from(spec: String) -> Self {
        AttrSpec::Shorthand(spec)
    }
}

impl From<FieldSpec> for AttrSpec {
    fn from(spec: FieldSpec) -> Self {
        AttrSpec::Field(spec)
    }
}

/// A full attribute descriptor.
///
/// Everything is optional; resolution fills in defaults and rejects
/// combinations that leave the display underdetermined (see
/// [`ConfigError`](crate::ConfigError)).
#[derive(Clone, Debug)]
pub struct FieldSpec {
    /// Attribute name to look up on the record.
    pub attribute: Option<String>,
    /// Explicit display label.
    pub label: Option<String>,
    /// Explicit value, literal or computed.
    pub value: Option<ValueSource>,
    /// Format token; defaults to `text`.
    pub format: Option<FormatSpec>,
    /// When false the entry is dropped entirely.
    pub visible: bool,
    /// Declares this entry as a group header rather than a field.
    pub group: bool,
    /// Markup attributes for the group heading tag.
    pub group_options: Attrs,
    /// Pre-supplied nested column specs (groups only).
    pub columns: Vec<AttrSpec>,
    /// Column css class; a group's class is shared with its columns.
    pub css_class: Option<String>,
    /// Markup attributes for the value tag. Unset means the per-format
    /// default class is applied at render time.
    pub content_options: Option<Attrs>,
    /// Markup attributes for the label tag.
    pub caption_options: Attrs,
}

impl Default for FieldSpec {
    fn default() -> Self {
        FieldSpec {
            attribute: None,
            label: None,
            value: None,
            format: None,
            visible: true,
            group: false,
            group_options: Attrs::new(),
            columns: Vec::new(),
            css_class: None,
            content_options: None,
            caption_options: Attrs::new(),
        }
    }
}

impl FieldSpec {
    /// A descriptor for a named record attribute.
    pub fn new(attribute: impl Into<String>) -> Self {
        FieldSpec {
            attribute: Some(attribute.into()),
            ..Default::default()
        }
    }

    /// A descriptor with an explicit label and literal value, detached from
    /// any record attribute.
    pub fn custom(label: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldSpec {
            label: Some(label.into()),
            value: Some(ValueSource::Literal(value.into())),
            ..Default::default()
        }
    }

    /// A descriptor whose value is computed from the record at build time.
    pub fn computed(
        label: impl Into<String>,
        value: impl Fn(&dyn Record, &ViewContext) -> Value + 'static,
    ) -> Self {
        FieldSpec {
            label: Some(label.into()),
            value: Some(ValueSource::Computed(Rc::new(value))),
            ..Default::default()
        }
    }

    /// A group declaration with the mandatory label.
    pub fn group(label: impl Into<String>) -> Self {
        FieldSpec {
            label: Some(label.into()),
            group: true,
            ..Default::default()
        }
    }

    /// Sets the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets a literal value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(ValueSource::Literal(value.into()));
        self
    }

    /// Sets a computed value callback.
    pub fn value_fn(
        mut self,
        value: impl Fn(&dyn Record, &ViewContext) -> Value + 'static,
    ) -> Self {
        self.value = Some(ValueSource::Computed(Rc::new(value)));
        self
    }

    /// Sets the format token.
    pub fn format(mut self, format: impl Into<FormatSpec>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets visibility; invisible entries are dropped at resolve time.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the column css class.
    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Sets markup attributes for the group heading tag.
    pub fn group_options(mut self, options: Attrs) -> Self {
        self.group_options = options;
        self
    }

    /// Appends a pre-supplied column spec (groups only).
    pub fn column(mut self, column: impl Into<AttrSpec>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Sets markup attributes for the value tag.
    pub fn content_options(mut self, options: Attrs) -> Self {
        self.content_options = Some(options);
        self
    }

    /// Sets markup attributes for the label tag.
    pub fn caption_options(mut self, options: Attrs) -> Self {
        self.caption_options = options;
        self
    }
}

/// A fully-resolved leaf field: label, value and format are determined.
///
/// Invariant: when `name` is `None`, both `label` and `value` were supplied
/// explicitly (resolution rejects the alternative).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalField {
    /// The record attribute this field came from, when any.
    pub name: Option<String>,
    /// Display label.
    pub label: String,
    /// Resolved raw value (formatted only at render time).
    pub value: Value,
    /// Format token.
    pub format: FormatSpec,
    /// Column css class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    /// Markup attributes for the value tag; `None` means the per-format
    /// default is applied at render time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_options: Option<Attrs>,
    /// Markup attributes for the label tag.
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub caption_options: Attrs,
}

/// A labeled section holding an ordered run of columns.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupContainer {
    /// Section label. Rendered as the heading, except for the default group.
    pub label: String,
    /// Markup attributes for the heading tag.
    #[serde(skip_serializing_if = "Attrs::is_empty")]
    pub group_options: Attrs,
    /// True for the implicit section grown from the first ungrouped
    /// attribute; its heading is suppressed at render time.
    pub default_group: bool,
    /// Shared css class stamped onto absorbed columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    /// The section's columns, in absorption order.
    pub columns: Vec<Descriptor>,
}

/// A finalized entry of the organized sequence: leaf field or group section.
///
/// The organizer only ever creates one level of nesting from flat input, but
/// pre-supplied columns may themselves contain groups; rendering recurses.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Descriptor {
    /// A leaf field row.
    Field(CanonicalField),
    /// A grouped section.
    Group(GroupContainer),
}

impl Descriptor {
    /// The field, when this is a leaf.
    pub fn as_field(&self) -> Option<&CanonicalField> {
        match self {
            Descriptor::Field(field) => Some(field),
            Descriptor::Group(_) => None,
        }
    }

    /// The group, when this is a section.
    pub fn as_group(&self) -> Option<&GroupContainer> {
        match self {
            Descriptor::Group(group) => Some(group),
            Descriptor::Field(_) => None,
        }
    }

    /// The display label of either variant.
    pub fn label(&self) -> &str {
        match self {
            Descriptor::Field(field) => &field.label,
            Descriptor::Group(group) => &group.label,
        }
    }
}
