//! The record capability interface.
//!
//! The widget never inspects concrete record representations. Everything it
//! needs from the displayed object goes through [`Record`]: value lookup,
//! optional display labels, and the record's own attribute names (used when
//! the caller supplies no attribute list). Adapters for JSON objects and for
//! label-annotated records are provided; anything else implements the trait
//! directly.

use std::collections::HashMap;

use serde_json::Value;

/// A single displayable data record.
///
/// `get_value` is the only required lookup; the default `attribute_label`
/// reports no explicit label, which makes the widget fall back to
/// [`humanize`]d attribute names.
pub trait Record {
    /// Looks up the raw value for an attribute name.
    ///
    /// Dotted names (`"author.name"`) traverse nested structures where the
    /// representation supports it. Returns `None` when the record has no such
    /// attribute.
    fn get_value(&self, name: &str) -> Option<Value>;

    /// An explicit display label for the attribute, when the record carries
    /// one. The default implementation has none.
    fn attribute_label(&self, _name: &str) -> Option<String> {
        None
    }

    /// The record's own attribute names, in no particular order.
    fn attribute_names(&self) -> Vec<String>;
}

impl Record for Value {
    fn get_value(&self, name: &str) -> Option<Value> {
        let mut current = self;
        for part in name.split('.') {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => {
                    let index: usize = part.parse().ok()?;
                    items.get(index)?
                }
                _ => return None,
            };
        }
        Some(current.clone())
    }

    fn attribute_names(&self) -> Vec<String> {
        match self {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

/// Wraps any record with an explicit label table.
///
/// # Example
///
/// ```rust
/// use factsheet::record::{LabeledRecord, Record};
/// use serde_json::json;
///
/// let record = LabeledRecord::new(json!({"dob": "1990-01-01"}))
///     .label("dob", "Date of Birth");
/// assert_eq!(record.attribute_label("dob").as_deref(), Some("Date of Birth"));
/// ```
#[derive(Clone, Debug)]
pub struct LabeledRecord<R> {
    inner: R,
    labels: HashMap<String, String>,
}

impl<R: Record> LabeledRecord<R> {
    /// Wraps `inner` with an empty label table.
    pub fn new(inner: R) -> Self {
        LabeledRecord {
            inner,
            labels: HashMap::new(),
        }
    }

    /// Adds an explicit label for an attribute.
    pub fn label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(name.into(), label.into());
        self
    }
}

impl<R: Record> Record for LabeledRecord<R> {
    fn get_value(&self, name: &str) -> Option<Value> {
        self.inner.get_value(name)
    }

    fn attribute_label(&self, name: &str) -> Option<String> {
        self.labels
            .get(name)
            .cloned()
            .or_else(|| self.inner.attribute_label(name))
    }

    fn attribute_names(&self) -> Vec<String> {
        self.inner.attribute_names()
    }
}

/// Turns an attribute name into a presentable label.
///
/// Splits on underscores, dashes, dots and lower-to-upper camel boundaries,
/// then capitalizes each word: `created_at`, `createdAt` and `created-at`
/// all become `"Created At"`.
pub fn humanize(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_was_lower = false;

    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == '.' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_was_lower = false;
        } else {
            if ch.is_uppercase() && prev_was_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_was_lower = ch.is_lowercase() || ch.is_ascii_digit();
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
