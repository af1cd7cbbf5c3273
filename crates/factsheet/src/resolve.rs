//! Attribute resolution.
//!
//! This is the first half of the core pipeline: each raw [`AttrSpec`] becomes
//! a [`Resolved`] entry with its label, value and format determined. The
//! rules, applied per entry in order:
//!
//! 1. Shorthand strings parse with the strict `name(:format(:label)?)?`
//!    grammar; anything else is rejected rather than defaulted.
//! 2. `visible: false` drops the entry entirely (no group slot consumed).
//! 3. The format defaults to `text`.
//! 4. The first entry of the whole list, unless it declared `group` itself,
//!    is marked as the default-group candidate (see
//!    [`organize`](crate::organize::organize)).
//! 5. A named attribute derives its label from the record (falling back to
//!    [`humanize`]) and its value from a record lookup, unless either was
//!    given explicitly.
//! 6. An explicit group must carry a label; its pre-supplied columns are
//!    resolved recursively, with no default-group rule inside.
//! 7. Anything else must carry both a label and a value.
//! 8. Deferred value callbacks are invoked now, exactly once, with
//!    (record, context). Group declarations never evaluate their value.

use serde_json::Value;

use factsheet_render::Attrs;

use crate::attr::{
    AttrSpec, CanonicalField, Descriptor, FieldSpec, GroupContainer, ValueSource, ViewContext,
};
use crate::error::ConfigError;
use crate::record::{humanize, Record};

/// A resolved entry: a canonical leaf field or an explicit group declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// A leaf field. `default_group` marks the raw-index-0 candidate that the
    /// organizer turns into the implicit section.
    Field {
        /// The resolved field.
        field: CanonicalField,
        /// True only for the first entry of an attribute list that did not
        /// declare explicit grouping.
        default_group: bool,
    },
    /// An explicit group declaration, pre-supplied columns already resolved.
    Group {
        /// Mandatory section label.
        label: String,
        /// Markup attributes for the heading tag.
        group_options: Attrs,
        /// Shared css class for the section's columns.
        css_class: Option<String>,
        /// Resolved pre-supplied columns.
        columns: Vec<Descriptor>,
    },
}

/// Resolves a whole attribute list against a record.
///
/// Entry order is preserved; invisible entries are dropped. Fails on the
/// first malformed entry, aborting the whole construction.
pub fn resolve_attributes(
    attrs: &[AttrSpec],
    record: &dyn Record,
    ctx: &ViewContext,
) -> Result<Vec<Resolved>, ConfigError> {
    resolve_list(attrs, record, ctx, true)
}

fn resolve_list(
    attrs: &[AttrSpec],
    record: &dyn Record,
    ctx: &ViewContext,
    top_level: bool,
) -> Result<Vec<Resolved>, ConfigError> {
    let mut resolved = Vec::with_capacity(attrs.len());
    for (index, attr) in attrs.iter().enumerate() {
        if let Some(entry) = resolve_entry(attr, index, record, ctx, top_level)? {
            resolved.push(entry);
        }
    }
    Ok(resolved)
}

fn resolve_entry(
    attr: &AttrSpec,
    index: usize,
    record: &dyn Record,
    ctx: &ViewContext,
    top_level: bool,
) -> Result<Option<Resolved>, ConfigError> {
    let spec = match attr {
        AttrSpec::Shorthand(text) => parse_shorthand(text)?,
        AttrSpec::Field(spec) => spec.clone(),
    };

    if !spec.visible {
        return Ok(None);
    }

    let format = spec.format.clone().unwrap_or_default();
    // Raw index decides candidacy: if entry 0 is invisible, no default group
    // arises at all.
    let default_group = top_level && index == 0 && !spec.group;

    if let Some(name) = spec.attribute {
        let label = match spec.label {
            Some(label) => label,
            None => record
                .attribute_label(&name)
                .unwrap_or_else(|| humanize(&name)),
        };
        let value = match spec.value {
            Some(source) => evaluate(source, record, ctx),
            None => record.get_value(&name).unwrap_or(Value::Null),
        };
        Ok(Some(Resolved::Field {
            field: CanonicalField {
                name: Some(name),
                label,
                value,
                format,
                css_class: spec.css_class,
                content_options: spec.content_options,
                caption_options: spec.caption_options,
            },
            default_group,
        }))
    } else if spec.group {
        let label = spec
            .label
            .ok_or(ConfigError::GroupWithoutLabel { index })?;
        let mut columns: Vec<Descriptor> = resolve_list(&spec.columns, record, ctx, false)?
            .into_iter()
            .map(into_descriptor)
            .collect();
        // The group's class is shared with its pre-supplied columns.
        if let Some(class) = &spec.css_class {
            for column in &mut columns {
                if let Descriptor::Field(field) = column {
                    field.css_class = Some(class.clone());
                }
            }
        }
        Ok(Some(Resolved::Group {
            label,
            group_options: spec.group_options,
            css_class: spec.css_class,
            columns,
        }))
    } else {
        let (Some(label), Some(source)) = (spec.label, spec.value) else {
            return Err(ConfigError::MissingAttribute { index });
        };
        let value = evaluate(source, record, ctx);
        Ok(Some(Resolved::Field {
            field: CanonicalField {
                name: None,
                label,
                value,
                format,
                css_class: spec.css_class,
                content_options: spec.content_options,
                caption_options: spec.caption_options,
            },
            default_group,
        }))
    }
}

fn evaluate(source: ValueSource, record: &dyn Record, ctx: &ViewContext) -> Value {
    match source {
        ValueSource::Literal(value) => value,
        ValueSource::Computed(callback) => callback(record, ctx),
    }
}

fn into_descriptor(entry: Resolved) -> Descriptor {
    match entry {
        Resolved::Field { field, .. } => Descriptor::Field(field),
        Resolved::Group {
            label,
            group_options,
            css_class,
            columns,
        } => Descriptor::Group(GroupContainer {
            label,
            group_options,
            default_group: false,
            css_class,
            columns,
        }),
    }
}

/// Parses `name`, `name:format` or `name:format:label`.
///
/// `name` must be a dotted identifier, `format` a word token, `label`
/// non-empty; extra segments are rejected. A shorthand entry can never
/// declare a group.
fn parse_shorthand(text: &str) -> Result<FieldSpec, ConfigError> {
    let bad = || ConfigError::BadShorthand {
        spec: text.to_string(),
    };

    let mut segments = text.split(':');
    let name = segments.next().unwrap_or_default();
    let format = segments.next();
    let label = segments.next();
    if segments.next().is_some() {
        return Err(bad());
    }

    if !is_attribute_name(name) {
        return Err(bad());
    }
    let mut spec = FieldSpec::new(name);
    if let Some(format) = format {
        if !is_word(format) {
            return Err(bad());
        }
        spec = spec.format(format);
    }
    if let Some(label) = label {
        if label.is_empty() {
            return Err(bad());
        }
        spec = spec.label(label);
    }
    Ok(spec)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
