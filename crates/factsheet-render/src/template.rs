//! Token substitution for row templates.
//!
//! Leaf rows render through a format-string style template: `{label}`,
//! `{value}` and friends are replaced with the row's rendered parts. This is
//! deliberately not a full template language; there are no loops, filters or
//! conditionals, just substitution.
//!
//! # Syntax
//!
//! - `{token}` - replaced when a matching token is supplied
//! - `{{` and `}}` - escaped braces (render as `{` and `}`)
//! - an unknown `{token}` is left intact, which makes a typo visible in the
//!   output instead of silently vanishing
//!
//! # Example
//!
//! ```rust
//! use factsheet_render::template::substitute;
//!
//! let row = substitute(
//!     "<th>{label}</th><td>{value}</td>",
//!     &[("label", "Title"), ("value", "Hello")],
//! ).unwrap();
//! assert_eq!(row, "<th>Title</th><td>Hello</td>");
//! ```

use crate::error::RenderError;

/// Replaces `{token}` occurrences in `template` with the paired replacements.
///
/// Fails with [`RenderError::Template`] on an unclosed `{token` or an empty
/// `{}` token. Replacement values are spliced verbatim; escape them first
/// where they carry user data.
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> Result<String, RenderError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '{' {
            if chars.peek() == Some(&'{') {
                chars.next();
                result.push('{');
                continue;
            }

            let mut token = String::new();
            let mut found_close = false;
            for inner in chars.by_ref() {
                if inner == '}' {
                    found_close = true;
                    break;
                }
                token.push(inner);
            }

            if !found_close {
                return Err(RenderError::Template(format!(
                    "unclosed token: {{{}",
                    token
                )));
            }

            let token = token.trim();
            if token.is_empty() {
                return Err(RenderError::Template(
                    "empty token in template".to_string(),
                ));
            }

            match vars.iter().find(|(name, _)| *name == token) {
                Some((_, replacement)) => result.push_str(replacement),
                None => {
                    result.push('{');
                    result.push_str(token);
                    result.push('}');
                }
            }
        } else if ch == '}' {
            if chars.peek() == Some(&'}') {
                chars.next();
            }
            result.push('}');
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_all_tokens() {
        let out = substitute("{a} and {b}", &[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(out, "1 and 2");
    }

    #[test]
    fn repeated_token() {
        let out = substitute("{x}{x}", &[("x", "ha")]).unwrap();
        assert_eq!(out, "haha");
    }

    #[test]
    fn unknown_token_left_intact() {
        let out = substitute("{label}: {typo}", &[("label", "Name")]).unwrap();
        assert_eq!(out, "Name: {typo}");
    }

    #[test]
    fn escaped_braces() {
        let out = substitute("{{literal}} {x}", &[("x", "v")]).unwrap();
        assert_eq!(out, "{literal} v");
    }

    #[test]
    fn whitespace_in_token_is_trimmed() {
        let out = substitute("{ x }", &[("x", "v")]).unwrap();
        assert_eq!(out, "v");
    }

    #[test]
    fn unclosed_token_errors() {
        let err = substitute("start {label", &[]).unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn empty_token_errors() {
        let err = substitute("{}", &[]).unwrap_err();
        assert!(err.to_string().contains("empty token"));
    }

    #[test]
    fn plain_text_untouched() {
        let out = substitute("no tokens here", &[]).unwrap();
        assert_eq!(out, "no tokens here");
    }

    #[test]
    fn replacement_is_verbatim() {
        let out = substitute("{v}", &[("v", "<td class=\"x\">")]).unwrap();
        assert_eq!(out, "<td class=\"x\">");
    }
}
