//! Minimal HTML assembly helpers.
//!
//! The widget emits plain HTML strings; this module holds the small set of
//! helpers it needs: entity escaping, an ordered attribute map ([`Attrs`]),
//! and tag constructors. Nothing here knows about records or attribute specs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An ordered set of markup attributes.
///
/// Keys render in lexicographic order, which keeps output deterministic and
/// easy to assert on in tests. Values are escaped at render time, so raw user
/// data can be stored directly.
///
/// # Example
///
/// ```rust
/// use factsheet_render::html::Attrs;
///
/// let attrs = Attrs::with_class("view-data").set("data-method", "post");
/// assert_eq!(attrs.render(), " class=\"view-data\" data-method=\"post\"");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attrs {
    map: BTreeMap<String, String>,
}

impl Attrs {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an attribute set holding a single `class` attribute.
    pub fn with_class(class: impl Into<String>) -> Self {
        Attrs::new().set("class", class)
    }

    /// Sets an attribute, replacing any previous value (builder style).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Sets an attribute in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    /// Returns the value of an attribute, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_str())
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    /// Appends a class token to the `class` attribute, creating it if absent.
    pub fn add_class(&mut self, class: &str) {
        match self.map.get_mut("class") {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(class);
            }
            _ => {
                self.map.insert("class".to_string(), class.to_string());
            }
        }
    }

    /// True when no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Renders the attributes as ` key="value"` pairs with a leading space
    /// per attribute, ready to splice after a tag name.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.map {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attrs {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Renders a container tag with the given body.
///
/// The body is spliced verbatim; escape it first if it is user data.
pub fn tag(name: &str, body: &str, attrs: &Attrs) -> String {
    format!("<{}{}>{}</{}>", name, attrs.render(), body, name)
}

/// Renders a void tag (no body, no closing tag), e.g. `img`.
pub fn void_tag(name: &str, attrs: &Attrs) -> String {
    format!("<{}{}>", name, attrs.render())
}

/// Renders an anchor. The link text is escaped; the href is stored as an
/// attribute and escaped with the rest of them.
pub fn a(text: &str, href: &str, attrs: &Attrs) -> String {
    let attrs = attrs.clone().set("href", href);
    format!("<a{}>{}</a>", attrs.render(), escape(text))
}
