//! The action bar: back/update/delete links in the widget header.
//!
//! Link targets and permissions are external concerns, consumed through the
//! [`LinkBuilder`] and [`AccessCheck`] collaborators. The bar itself is a
//! token template (`{back} {update} {delete}` by default) plus optional
//! custom buttons; unknown tokens are left intact just like in row templates.

use std::collections::BTreeMap;

use serde_json::Value;

use factsheet_render::html::{a, Attrs};
use factsheet_render::{substitute, RenderError};

/// Builds hrefs for action links.
///
/// `id` is the record's primary-key value for item-scoped actions (`update`,
/// `delete`) and `None` for collection-scoped ones (`index`).
pub trait LinkBuilder {
    /// Returns the href for the given action.
    fn build_link(&self, action: &str, id: Option<&Value>) -> String;
}

/// Answers permission checks for role-gated actions.
///
/// Implementations typically map `(action, role)` onto a permission name in
/// their own scheme (e.g. `"updateInvoice"`) and ask their authorization
/// layer.
pub trait AccessCheck {
    /// True when the current user may perform `action` on the given role.
    fn can_perform(&self, action: &str, role: &str) -> bool;
}

/// Configuration for the widget's action bar.
///
/// # Example
///
/// ```rust
/// use factsheet::actions::{ActionBar, LinkBuilder};
/// use serde_json::Value;
///
/// struct Routes;
/// impl LinkBuilder for Routes {
///     fn build_link(&self, action: &str, id: Option<&Value>) -> String {
///         match id {
///             Some(id) => format!("/items/{}?id={}", action, id),
///             None => "/items".to_string(),
///         }
///     }
/// }
///
/// let routes = Routes;
/// let bar = ActionBar::new(&routes).template("{back} {update}");
/// ```
pub struct ActionBar<'a> {
    template: String,
    buttons: BTreeMap<String, String>,
    links: &'a dyn LinkBuilder,
    access: Option<&'a dyn AccessCheck>,
    role: Option<String>,
}

impl<'a> ActionBar<'a> {
    /// Creates an action bar with the default `{back} {update} {delete}`
    /// template and no permission gating.
    pub fn new(links: &'a dyn LinkBuilder) -> Self {
        ActionBar {
            template: "{back} {update} {delete}".to_string(),
            buttons: BTreeMap::new(),
            links,
            access: None,
            role: None,
        }
    }

    /// Replaces the bar template.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Adds a custom button: the token `{name}` renders as `markup`.
    pub fn button(mut self, name: impl Into<String>, markup: impl Into<String>) -> Self {
        self.buttons.insert(name.into(), markup.into());
        self
    }

    /// Gates update/delete on `can_perform(action, role)`. Without an access
    /// check every action is allowed.
    pub fn access(mut self, check: &'a dyn AccessCheck, role: impl Into<String>) -> Self {
        self.access = Some(check);
        self.role = Some(role.into());
        self
    }

    fn allowed(&self, action: &str) -> bool {
        match (&self.access, &self.role) {
            (Some(check), Some(role)) => check.can_perform(action, role),
            _ => true,
        }
    }

    /// Renders the bar markup for the record with the given primary-key
    /// value. Denied actions render as empty strings.
    pub(crate) fn render(&self, id: &Value, item_name: &str) -> Result<String, RenderError> {
        let back = a("Back", &self.links.build_link("index", None), &Attrs::with_class("back"));

        let update = if self.allowed("update") {
            a(
                "Update",
                &self.links.build_link("update", Some(id)),
                &Attrs::with_class("edit"),
            )
        } else {
            String::new()
        };

        let delete = if self.allowed("delete") {
            let attrs = Attrs::with_class("delete")
                .set(
                    "data-confirm",
                    format!("Are you sure you want to delete this {}?", item_name),
                )
                .set("data-method", "post");
            a("Delete", &self.links.build_link("delete", Some(id)), &attrs)
        } else {
            String::new()
        };

        let mut vars: Vec<(&str, &str)> = vec![
            ("back", back.as_str()),
            ("update", update.as_str()),
            ("delete", delete.as_str()),
        ];
        for (name, markup) in &self.buttons {
            vars.push((name.as_str(), markup.as_str()));
        }

        substitute(&self.template, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Routes;

    impl LinkBuilder for Routes {
        fn build_link(&self, action: &str, id: Option<&Value>) -> String {
            match id {
                Some(Value::String(s)) => format!("/items/{}?id={}", action, s),
                Some(other) => format!("/items/{}?id={}", action, other),
                None => "/items".to_string(),
            }
        }
    }

    struct OnlyUpdate;

    impl AccessCheck for OnlyUpdate {
        fn can_perform(&self, action: &str, _role: &str) -> bool {
            action == "update"
        }
    }

    #[test]
    fn renders_the_three_default_links() {
        let routes = Routes;
        let bar = ActionBar::new(&routes);
        let out = bar.render(&json!(7), "invoice").unwrap();

        assert!(out.contains("<a class=\"back\" href=\"/items\">Back</a>"));
        assert!(out.contains("href=\"/items/update?id=7\""));
        assert!(out.contains("href=\"/items/delete?id=7\""));
        assert!(out.contains("data-confirm=\"Are you sure you want to delete this invoice?\""));
        assert!(out.contains("data-method=\"post\""));
    }

    #[test]
    fn denied_actions_render_empty() {
        let routes = Routes;
        let check = OnlyUpdate;
        let bar = ActionBar::new(&routes).access(&check, "invoice");
        let out = bar.render(&json!(7), "invoice").unwrap();

        assert!(out.contains("Update"));
        assert!(!out.contains("Delete"));
        // Back is never gated.
        assert!(out.contains("Back"));
    }

    #[test]
    fn the_configured_role_reaches_the_access_check() {
        struct Expects;
        impl AccessCheck for Expects {
            fn can_perform(&self, action: &str, role: &str) -> bool {
                assert_eq!(role, "invoice");
                matches!(action, "update" | "delete")
            }
        }

        let routes = Routes;
        let check = Expects;
        let bar = ActionBar::new(&routes)
            .template("{update}")
            .access(&check, "invoice");
        let out = bar.render(&json!(1), "invoice").unwrap();
        assert!(out.contains("Update"));
    }

    #[test]
    fn custom_buttons_substitute_into_the_template() {
        let routes = Routes;
        let bar = ActionBar::new(&routes)
            .template("{back} {archive}")
            .button("archive", "<a class=\"archive\" href=\"/a\">Archive</a>");
        let out = bar.render(&json!(1), "item").unwrap();

        assert!(out.contains("Archive"));
        assert!(!out.contains("Update"));
    }

    #[test]
    fn unknown_tokens_stay_visible() {
        let routes = Routes;
        let bar = ActionBar::new(&routes).template("{back} {typo}");
        let out = bar.render(&json!(1), "item").unwrap();
        assert!(out.contains("{typo}"));
    }

    #[test]
    fn string_primary_keys_render_in_links() {
        let routes = Routes;
        let bar = ActionBar::new(&routes).template("{update}");
        let out = bar.render(&json!("ab-12"), "item").unwrap();
        assert!(out.contains("href=\"/items/update?id=ab-12\""));
    }
}
