//! The detail-view widget.
//!
//! [`detail_view`] starts a builder; `build()` performs every
//! construction-time step (primary-key validation, attribute resolution,
//! group organization) and returns an immutable widget whose `render()` only
//! turns the finished descriptor sequence into markup.
//!
//! # Example
//!
//! ```rust
//! use factsheet::{detail_view, FieldSpec};
//! use serde_json::json;
//!
//! let record = json!({"id": 7, "title": "First post", "views": 1203});
//! let html = detail_view(&record)
//!     .title("post")
//!     .attributes(["title", "views:integer"])
//!     .build()
//!     .unwrap()
//!     .render()
//!     .unwrap();
//!
//! assert!(html.contains("First post"));
//! ```

use std::fmt;

use serde_json::Value;

use factsheet_render::html::{self, Attrs};
use factsheet_render::{substitute, FormatSpec, Formatter, RenderError, ValueFormatter};

use crate::actions::ActionBar;
use crate::attr::{AttrSpec, CanonicalField, Descriptor, FieldSpec, GroupContainer, ViewContext};
use crate::error::{ConfigError, ViewError};
use crate::organize::organize;
use crate::record::Record;
use crate::resolve::resolve_attributes;

/// The default leaf-row template.
pub const DEFAULT_ROW_TEMPLATE: &str = "<div class=\"{defaultColumn}\"><div class=\"form-group\"><label{captionOptions}>{label}</label><div{contentOptions}>{value}</div></div></div>";

/// Callback row renderer: receives the descriptor, its index in the final
/// sequence, and the view context.
pub type RowFn<'a> = Box<dyn Fn(&Descriptor, usize, &ViewContext) -> Result<String, RenderError> + 'a>;

/// How a single row becomes markup: a token template or a callback.
pub enum RowTemplate<'a> {
    /// `{label}` / `{value}` / `{captionOptions}` / `{contentOptions}` /
    /// `{defaultColumn}` substitution.
    Tokens(String),
    /// Full control per row.
    Func(RowFn<'a>),
}

impl Default for RowTemplate<'_> {
    fn default() -> Self {
        RowTemplate::Tokens(DEFAULT_ROW_TEMPLATE.to_string())
    }
}

impl fmt::Debug for RowTemplate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowTemplate::Tokens(template) => f.debug_tuple("Tokens").field(template).finish(),
            RowTemplate::Func(_) => f.write_str("Func(<fn>)"),
        }
    }
}

/// Starts building a detail view for one record.
pub fn detail_view(record: &dyn Record) -> DetailViewBuilder<'_> {
    DetailViewBuilder::new(record)
}

/// Builder for [`DetailView`].
///
/// Collaborators are injected here: the formatter (defaults to
/// [`ValueFormatter`]), the row template, and optionally an action bar.
pub struct DetailViewBuilder<'a> {
    record: &'a dyn Record,
    formatter: Box<dyn Formatter + 'a>,
    attributes: Option<Vec<AttrSpec>>,
    template: RowTemplate<'a>,
    options: Attrs,
    header_options: Attrs,
    title: String,
    primary_key: String,
    item_name: String,
    show_header: bool,
    actions: Option<ActionBar<'a>>,
}

impl<'a> DetailViewBuilder<'a> {
    /// Creates a builder with the default configuration.
    pub fn new(record: &'a dyn Record) -> Self {
        DetailViewBuilder {
            record,
            formatter: Box::new(ValueFormatter::default()),
            attributes: None,
            template: RowTemplate::default(),
            options: Attrs::with_class("detail-card"),
            header_options: Attrs::with_class("detail-card-header"),
            title: String::new(),
            primary_key: "id".to_string(),
            item_name: "item".to_string(),
            show_header: true,
            actions: None,
        }
    }

    /// Sets the attribute list. When never called, the record's own
    /// attribute names are used, lexicographically sorted.
    pub fn attributes<I>(mut self, attrs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AttrSpec>,
    {
        self.attributes = Some(attrs.into_iter().map(Into::into).collect());
        self
    }

    /// Injects a formatter to replace the default [`ValueFormatter`].
    pub fn formatter(mut self, formatter: impl Formatter + 'a) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Sets a token row template.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = RowTemplate::Tokens(template.into());
        self
    }

    /// Sets a callback row renderer.
    pub fn template_fn(
        mut self,
        template: impl Fn(&Descriptor, usize, &ViewContext) -> Result<String, RenderError> + 'a,
    ) -> Self {
        self.template = RowTemplate::Func(Box::new(template));
        self
    }

    /// Sets markup attributes for the container tag.
    pub fn options(mut self, options: Attrs) -> Self {
        self.options = options;
        self
    }

    /// Sets markup attributes for the header tag.
    pub fn header_options(mut self, options: Attrs) -> Self {
        self.header_options = options;
        self
    }

    /// Sets the header title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the primary-key attribute name (default `"id"`).
    pub fn primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = key.into();
        self
    }

    /// Sets the noun used in action text (default `"item"`).
    pub fn item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = name.into();
        self
    }

    /// Toggles the header row (title + action bar).
    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Attaches an action bar.
    pub fn actions(mut self, actions: ActionBar<'a>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Validates the configuration and runs the resolve/organize pipeline.
    ///
    /// All [`ConfigError`]s surface here; the returned widget can only fail
    /// with render-time errors.
    pub fn build(self) -> Result<DetailView<'a>, ConfigError> {
        let pk_value = self.record.get_value(&self.primary_key).ok_or_else(|| {
            ConfigError::MissingPrimaryKey {
                key: self.primary_key.clone(),
            }
        })?;

        let context = ViewContext {
            title: self.title,
            primary_key: self.primary_key,
            item_name: self.item_name,
        };

        let attributes = self.attributes.unwrap_or_else(|| {
            let mut names = self.record.attribute_names();
            names.sort();
            names
                .into_iter()
                .map(|name| FieldSpec::new(name).into())
                .collect()
        });

        let resolved = resolve_attributes(&attributes, self.record, &context)?;
        let descriptors = organize(resolved);

        Ok(DetailView {
            formatter: self.formatter,
            descriptors,
            template: self.template,
            options: self.options,
            header_options: self.header_options,
            show_header: self.show_header,
            context,
            pk_value,
            actions: self.actions,
        })
    }

    /// Builds and renders in one step, for call sites that keep no widget
    /// around.
    pub fn render(self) -> Result<String, ViewError> {
        Ok(self.build()?.render()?)
    }
}

/// A fully-constructed detail view.
///
/// Holds the organized, immutable descriptor sequence; nothing is mutated
/// after construction and `render()` can be called repeatedly.
pub struct DetailView<'a> {
    formatter: Box<dyn Formatter + 'a>,
    descriptors: Vec<Descriptor>,
    template: RowTemplate<'a>,
    options: Attrs,
    header_options: Attrs,
    show_header: bool,
    context: ViewContext,
    pk_value: Value,
    actions: Option<ActionBar<'a>>,
}

impl fmt::Debug for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailView")
            .field("formatter", &"<dyn Formatter>")
            .field("descriptors", &self.descriptors)
            .field("template", &self.template)
            .field("options", &self.options)
            .field("header_options", &self.header_options)
            .field("show_header", &self.show_header)
            .field("context", &self.context)
            .field("pk_value", &self.pk_value)
            .field("actions", &self.actions.as_ref().map(|_| "<ActionBar>"))
            .finish()
    }
}

impl<'a> DetailView<'a> {
    /// The organized descriptor sequence, for callers that want the shaped
    /// data without the markup.
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// The record's primary-key value.
    pub fn primary_key_value(&self) -> &Value {
        &self.pk_value
    }

    /// Renders the whole widget.
    pub fn render(&self) -> Result<String, RenderError> {
        let mut rows = Vec::with_capacity(self.descriptors.len());
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            rows.push(self.render_descriptor(descriptor, index)?);
        }
        let body = html::tag("div", &rows.join("\n"), &Attrs::new());

        let header = if self.show_header {
            self.render_header()?
        } else {
            String::new()
        };

        Ok(html::tag(
            "div",
            &format!("{}{}", header, body),
            &self.options,
        ))
    }

    fn render_header(&self) -> Result<String, RenderError> {
        let actions = match &self.actions {
            Some(bar) => bar.render(&self.pk_value, &self.context.item_name)?,
            None => String::new(),
        };
        let title = html::tag(
            "h2",
            &html::escape(&ucfirst(&self.context.title)),
            &Attrs::new(),
        );
        let actions = html::tag("div", &actions, &Attrs::with_class("actions"));
        Ok(html::tag(
            "div",
            &format!("{}{}", title, actions),
            &self.header_options,
        ))
    }

    fn render_descriptor(&self, descriptor: &Descriptor, index: usize) -> Result<String, RenderError> {
        if let RowTemplate::Func(row_fn) = &self.template {
            return row_fn(descriptor, index, &self.context);
        }

        match descriptor {
            Descriptor::Group(group) => self.render_group(group),
            Descriptor::Field(field) => self.render_field(field),
        }
    }

    fn render_group(&self, group: &GroupContainer) -> Result<String, RenderError> {
        // The implicit section has no heading of its own; its label lives on
        // in the duplicated first column.
        let heading = if group.default_group {
            String::new()
        } else {
            let mut options = group.group_options.clone();
            options.add_class("group-title");
            html::tag("div", &html::escape(&group.label), &options)
        };

        let mut columns = Vec::with_capacity(group.columns.len());
        for (index, column) in group.columns.iter().enumerate() {
            columns.push(self.render_descriptor(column, index)?);
        }
        let row = html::tag("div", &columns.join("\n"), &Attrs::with_class("row"));
        let body = html::tag("div", &row, &Attrs::with_class("detail-card-body"));

        Ok(format!("{}{}", heading, body))
    }

    fn render_field(&self, field: &CanonicalField) -> Result<String, RenderError> {
        let RowTemplate::Tokens(template) = &self.template else {
            unreachable!("callback templates short-circuit in render_descriptor");
        };

        let value = self.formatter.format(&field.value, &field.format)?;
        let content_options = field
            .content_options
            .clone()
            .unwrap_or_else(|| Attrs::with_class(default_content_class(&field.format)));

        substitute(
            template,
            &[
                ("label", field.label.as_str()),
                ("value", value.as_str()),
                ("captionOptions", &field.caption_options.render()),
                ("contentOptions", &content_options.render()),
                (
                    "defaultColumn",
                    field.css_class.as_deref().unwrap_or("col-md-4"),
                ),
            ],
        )
    }
}

fn default_content_class(format: &FormatSpec) -> &'static str {
    if format.is("image") {
        "image-preview"
    } else {
        "view-data"
    }
}

fn ucfirst(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_rejects_a_record_without_the_primary_key() {
        let record = json!({"title": "x"});
        let err = detail_view(&record).build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingPrimaryKey { key } if key == "id"));
    }

    #[test]
    fn custom_primary_key_is_honored() {
        let record = json!({"sku": "a-1", "title": "x"});
        let view = detail_view(&record)
            .primary_key("sku")
            .attributes(["title"])
            .build()
            .unwrap();
        assert_eq!(view.primary_key_value(), &json!("a-1"));
    }

    #[test]
    fn omitted_attributes_default_to_sorted_record_names() {
        let record = json!({"id": 1, "beta": 2, "alpha": 3});
        let view = detail_view(&record).build().unwrap();

        // One default group holding all three fields, alphabetical.
        let group = view.descriptors()[0].as_group().unwrap();
        let labels: Vec<&str> = group.columns.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Alpha", "Beta", "Id"]);
    }

    #[test]
    fn render_uses_the_token_template() {
        let record = json!({"id": 1, "title": "Hello & bye"});
        let html = detail_view(&record)
            .attributes(["title"])
            .show_header(false)
            .build()
            .unwrap()
            .render()
            .unwrap();

        assert!(html.contains("<label>Title</label>"));
        assert!(html.contains("<div class=\"view-data\">Hello &amp; bye</div>"));
        assert!(html.contains("class=\"col-md-4\""));
    }

    #[test]
    fn image_fields_get_the_preview_class() {
        let record = json!({"id": 1, "photo": "/p.png"});
        let html = detail_view(&record)
            .attributes(["photo:image"])
            .show_header(false)
            .build()
            .unwrap()
            .render()
            .unwrap();

        assert!(html.contains("class=\"image-preview\""));
        assert!(html.contains("<img src=\"/p.png\">"));
    }

    #[test]
    fn header_carries_the_capitalized_title() {
        let record = json!({"id": 1});
        let html = detail_view(&record)
            .attributes(["id"])
            .title("invoice")
            .build()
            .unwrap()
            .render()
            .unwrap();

        assert!(html.contains("<h2>Invoice</h2>"));
        assert!(html.contains("class=\"detail-card-header\""));
    }

    #[test]
    fn hidden_header_renders_no_title() {
        let record = json!({"id": 1});
        let html = detail_view(&record)
            .attributes(["id"])
            .title("invoice")
            .show_header(false)
            .build()
            .unwrap()
            .render()
            .unwrap();

        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn default_group_heading_is_suppressed() {
        let record = json!({"id": 1, "a": 1, "b": 2});
        let html = detail_view(&record)
            .attributes(["a", "b"])
            .show_header(false)
            .build()
            .unwrap()
            .render()
            .unwrap();

        assert!(!html.contains("group-title"));
        assert!(html.contains("detail-card-body"));
    }

    #[test]
    fn explicit_group_heading_is_rendered_and_escaped() {
        let record = json!({"id": 1, "a": 1});
        let html = detail_view(&record)
            .attributes([
                AttrSpec::from(FieldSpec::group("Meta & More")),
                "a".into(),
            ])
            .show_header(false)
            .build()
            .unwrap()
            .render()
            .unwrap();

        assert!(html.contains("<div class=\"group-title\">Meta &amp; More</div>"));
    }

    #[test]
    fn callback_template_controls_every_row() {
        let record = json!({"id": 1, "a": 1, "b": 2});
        let html = detail_view(&record)
            .attributes(["a", "b"])
            .show_header(false)
            .template_fn(|descriptor, index, _ctx| {
                Ok(format!("[{}:{}]", index, descriptor.label()))
            })
            .build()
            .unwrap()
            .render()
            .unwrap();

        // The whole list collapsed into one default group, so the callback
        // sees a single top-level descriptor.
        assert!(html.contains("[0:A]"));
        assert!(!html.contains("[1:"));
    }

    #[test]
    fn render_fails_on_an_unknown_format() {
        let record = json!({"id": 1, "a": 1});
        let view = detail_view(&record)
            .attributes(["a:spreadsheet"])
            .show_header(false)
            .build()
            .unwrap();
        let err = view.render().unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
    }

    #[test]
    fn one_shot_render_surfaces_both_error_kinds() {
        let record = json!({"title": "x"});
        let err = detail_view(&record).render().unwrap_err();
        assert!(matches!(err, ViewError::Config(_)));

        let record = json!({"id": 1, "a": 1});
        let err = detail_view(&record)
            .attributes(["a:spreadsheet"])
            .render()
            .unwrap_err();
        assert!(matches!(err, ViewError::Render(_)));
    }

    #[test]
    fn render_is_repeatable() {
        let record = json!({"id": 1, "a": 1});
        let view = detail_view(&record)
            .attributes(["a"])
            .show_header(false)
            .build()
            .unwrap();
        assert_eq!(view.render().unwrap(), view.render().unwrap());
    }
}
