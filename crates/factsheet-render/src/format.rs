//! Value formatting.
//!
//! A [`FormatSpec`] names how a raw value becomes display text: a kind token
//! (`text`, `decimal`, `image`, ...) plus optional arguments. The widget
//! consumes formatting through the [`Formatter`] trait and is handed a
//! concrete implementation at construction time; [`ValueFormatter`] is the
//! default one.
//!
//! # Example
//!
//! ```rust
//! use factsheet_render::{FormatSpec, Formatter, ValueFormatter};
//! use serde_json::json;
//!
//! let formatter = ValueFormatter::default();
//! let spec = FormatSpec::with_args("decimal", vec![json!(1)]);
//! assert_eq!(formatter.format(&json!(12.35), &spec).unwrap(), "12.3");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RenderError;
use crate::html::{self, Attrs};

/// A format token: a kind name plus optional arguments.
///
/// In attribute shorthand the kind appears alone (`"price:decimal"`); the
/// argument form covers kinds that take parameters, e.g.
/// `FormatSpec::with_args("decimal", vec![json!(3)])` for a precision of 3.
/// Serialized as a bare string when there are no arguments, or as a
/// `[kind, arg, ...]` array otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FormatRaw", into = "FormatRaw")]
pub struct FormatSpec {
    /// Kind token, e.g. `"text"` or `"decimal"`.
    pub kind: String,
    /// Kind-specific arguments (e.g. precision for `decimal`).
    pub args: Vec<Value>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FormatRaw {
    Name(String),
    WithArgs(Vec<Value>),
}

impl From<FormatSpec> for FormatRaw {
    fn from(spec: FormatSpec) -> Self {
        if spec.args.is_empty() {
            FormatRaw::Name(spec.kind)
        } else {
            let mut parts = vec![Value::String(spec.kind)];
            parts.extend(spec.args);
            FormatRaw::WithArgs(parts)
        }
    }
}

impl TryFrom<FormatRaw> for FormatSpec {
    type Error = String;

    fn try_from(raw: FormatRaw) -> Result<Self, Self::Error> {
        match raw {
            FormatRaw::Name(kind) => Ok(FormatSpec::new(kind)),
            FormatRaw::WithArgs(parts) => {
                let mut parts = parts.into_iter();
                match parts.next() {
                    Some(Value::String(kind)) => Ok(FormatSpec {
                        kind,
                        args: parts.collect(),
                    }),
                    _ => Err("format array must start with a kind string".to_string()),
                }
            }
        }
    }
}

impl FormatSpec {
    /// Creates a spec with no arguments.
    pub fn new(kind: impl Into<String>) -> Self {
        FormatSpec {
            kind: kind.into(),
            args: Vec::new(),
        }
    }

    /// Creates a spec with arguments.
    pub fn with_args(kind: impl Into<String>, args: Vec<Value>) -> Self {
        FormatSpec {
            kind: kind.into(),
            args,
        }
    }

    /// The `text` kind, the default everywhere a format is omitted.
    pub fn text() -> Self {
        FormatSpec::new("text")
    }

    /// True when this spec is of the given kind.
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec::text()
    }
}

impl From<&str> for FormatSpec {
    fn from(kind: &str) -> Self {
        FormatSpec::new(kind)
    }
}

/// Converts a raw value plus a [`FormatSpec`] into display markup.
///
/// Implementations fail with [`RenderError::UnsupportedFormat`] on an unknown
/// kind and [`RenderError::InvalidValue`] on a value the kind cannot render.
/// The widget propagates both uncaught: a row that cannot format aborts the
/// whole render.
pub trait Formatter {
    /// Formats `value` according to `spec`.
    fn format(&self, value: &Value, spec: &FormatSpec) -> Result<String, RenderError>;
}

/// The default [`Formatter`].
///
/// Covers the common display kinds:
///
/// | kind      | behavior                                            |
/// |-----------|-----------------------------------------------------|
/// | `text`    | escaped plain text                                  |
/// | `ntext`   | escaped text, newlines become `<br>`                |
/// | `raw`     | spliced verbatim                                    |
/// | `html`    | trusted markup, spliced verbatim                    |
/// | `boolean` | truthiness as "Yes"/"No"                            |
/// | `integer` | whole number                                        |
/// | `decimal` | fixed precision (arg 0, default 2)                  |
/// | `percent` | value × 100 with `%` (precision arg 0, default 0)   |
/// | `email`   | `mailto:` anchor                                    |
/// | `url`     | anchor, `https://` prefixed when no scheme present  |
/// | `image`   | `<img>` tag (alt text arg 0)                        |
///
/// Null values render as [`null_display`](Self::null_display) regardless of
/// kind. The display strings are spliced verbatim so they may carry markup.
#[derive(Clone, Debug)]
pub struct ValueFormatter {
    /// Replacement markup for null values.
    pub null_display: String,
    /// Display text for boolean true.
    pub true_display: String,
    /// Display text for boolean false.
    pub false_display: String,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        ValueFormatter {
            null_display: "(not set)".to_string(),
            true_display: "Yes".to_string(),
            false_display: "No".to_string(),
        }
    }
}

impl ValueFormatter {
    /// Creates a formatter with the default display strings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the null replacement markup.
    pub fn null_display(mut self, display: impl Into<String>) -> Self {
        self.null_display = display.into();
        self
    }

    fn stringify(value: &Value, kind: &str) -> Result<String, RenderError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Array(_) | Value::Object(_) => Err(RenderError::InvalidValue {
                format: kind.to_string(),
                message: "structured values have no scalar rendering".to_string(),
            }),
            Value::Null => unreachable!("null handled before kind dispatch"),
        }
    }

    fn as_string(value: &Value, kind: &str) -> Result<String, RenderError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(RenderError::InvalidValue {
                format: kind.to_string(),
                message: "expected a string value".to_string(),
            }),
        }
    }

    fn as_f64(value: &Value, kind: &str) -> Result<f64, RenderError> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| RenderError::InvalidValue {
            format: kind.to_string(),
            message: format!("{} is not numeric", value),
        })
    }

    fn as_i64(value: &Value, kind: &str) -> Result<i64, RenderError> {
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| RenderError::InvalidValue {
            format: kind.to_string(),
            message: format!("{} is not a whole number", value),
        })
    }

    fn precision(spec: &FormatSpec, default: usize) -> Result<usize, RenderError> {
        match spec.args.first() {
            None => Ok(default),
            Some(arg) => arg
                .as_u64()
                .map(|p| p as usize)
                .ok_or_else(|| RenderError::InvalidValue {
                    format: spec.kind.clone(),
                    message: format!("precision argument {} is not a whole number", arg),
                }),
        }
    }

    fn truthy(value: &Value) -> Result<bool, RenderError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64().map(|f| f != 0.0).unwrap_or(true)),
            Value::String(s) => Ok(!s.is_empty() && s != "0"),
            _ => Err(RenderError::InvalidValue {
                format: "boolean".to_string(),
                message: "structured values have no truthiness".to_string(),
            }),
        }
    }
}

impl Formatter for ValueFormatter {
    fn format(&self, value: &Value, spec: &FormatSpec) -> Result<String, RenderError> {
        if value.is_null() {
            return Ok(self.null_display.clone());
        }

        let kind = spec.kind.as_str();
        match kind {
            "text" => Ok(html::escape(&Self::stringify(value, kind)?)),
            "ntext" => {
                let escaped = html::escape(&Self::stringify(value, kind)?);
                Ok(escaped.replace('\n', "<br>"))
            }
            "raw" => Self::stringify(value, kind),
            "html" => Self::as_string(value, kind),
            "boolean" => Ok(if Self::truthy(value)? {
                self.true_display.clone()
            } else {
                self.false_display.clone()
            }),
            "integer" => Ok(Self::as_i64(value, kind)?.to_string()),
            "decimal" => {
                let precision = Self::precision(spec, 2)?;
                Ok(format!("{:.*}", precision, Self::as_f64(value, kind)?))
            }
            "percent" => {
                let precision = Self::precision(spec, 0)?;
                let scaled = Self::as_f64(value, kind)? * 100.0;
                Ok(format!("{:.*}%", precision, scaled))
            }
            "email" => {
                let address = Self::as_string(value, kind)?;
                Ok(html::a(&address, &format!("mailto:{}", address), &Attrs::new()))
            }
            "url" => {
                let target = Self::as_string(value, kind)?;
                let href = if target.contains("://") {
                    target.clone()
                } else {
                    format!("https://{}", target)
                };
                Ok(html::a(&target, &href, &Attrs::new()))
            }
            "image" => {
                let src = Self::as_string(value, kind)?;
                let mut attrs = Attrs::new().set("src", src);
                if let Some(Value::String(alt)) = spec.args.first() {
                    attrs.insert("alt", alt.clone());
                }
                Ok(html::void_tag("img", &attrs))
            }
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}
