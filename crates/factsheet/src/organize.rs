//! Group organization.
//!
//! Second half of the core pipeline: the flat [`Resolved`] sequence becomes
//! the final [`Descriptor`] tree. A single pass tracks the currently open
//! group; fields that follow a group declaration are absorbed into it as
//! columns, and the first entry of the list, unless it declared grouping
//! itself, becomes the header of an implicit section that swallows everything
//! after it.
//!
//! The transform is pure: it builds a fresh contiguous sequence instead of
//! deleting and re-keying the input, so no re-index pass is needed.

use factsheet_render::Attrs;

use crate::attr::{Descriptor, GroupContainer};
use crate::resolve::Resolved;

/// Reshapes resolved entries into the final descriptor sequence.
///
/// Rules, in input order:
///
/// - The default-group candidate becomes an implicit [`GroupContainer`]
///   whose heading doubles as its first column. The container drops the
///   field's css class; the column copy keeps it.
/// - An explicit group declaration opens a new container (no column
///   duplication) that absorbs subsequent fields.
/// - A field with a group open is appended to that group's columns, taking
///   over the group's css class when the group declared one.
/// - A field with no group open stands alone at top level.
pub fn organize(entries: Vec<Resolved>) -> Vec<Descriptor> {
    let mut out: Vec<Descriptor> = Vec::with_capacity(entries.len());
    let mut open: Option<usize> = None;

    for entry in entries {
        match entry {
            Resolved::Group {
                label,
                group_options,
                css_class,
                columns,
            } => {
                out.push(Descriptor::Group(GroupContainer {
                    label,
                    group_options,
                    default_group: false,
                    css_class,
                    columns,
                }));
                open = Some(out.len() - 1);
            }
            Resolved::Field {
                mut field,
                default_group,
            } => {
                if default_group {
                    let container = GroupContainer {
                        label: field.label.clone(),
                        group_options: Attrs::new(),
                        default_group: true,
                        css_class: None,
                        columns: vec![Descriptor::Field(field)],
                    };
                    out.push(Descriptor::Group(container));
                    open = Some(out.len() - 1);
                } else if let Some(slot) = open {
                    // Absorbed columns share the group's css class.
                    let Descriptor::Group(group) = &mut out[slot] else {
                        unreachable!("open always points at a group");
                    };
                    if let Some(class) = &group.css_class {
                        field.css_class = Some(class.clone());
                    }
                    group.columns.push(Descriptor::Field(field));
                } else {
                    out.push(Descriptor::Field(field));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{AttrSpec, CanonicalField, FieldSpec, ViewContext};
    use crate::resolve::resolve_attributes;
    use factsheet_render::FormatSpec;
    use serde_json::{json, Value};

    fn ctx() -> ViewContext {
        ViewContext {
            title: String::new(),
            primary_key: "id".to_string(),
            item_name: "item".to_string(),
        }
    }

    fn pipeline(attrs: Vec<AttrSpec>, record: &Value) -> Vec<Descriptor> {
        organize(resolve_attributes(&attrs, record, &ctx()).unwrap())
    }

    fn leaf(name: &str) -> Resolved {
        Resolved::Field {
            field: CanonicalField {
                name: Some(name.to_string()),
                label: name.to_uppercase(),
                value: json!(name),
                format: FormatSpec::text(),
                css_class: None,
                content_options: None,
                caption_options: Attrs::new(),
            },
            default_group: false,
        }
    }

    fn column_labels(descriptor: &Descriptor) -> Vec<String> {
        descriptor
            .as_group()
            .expect("expected a group")
            .columns
            .iter()
            .map(|column| column.label().to_string())
            .collect()
    }

    #[test]
    fn ungrouped_list_collapses_into_one_default_section() {
        let record = json!({"a": 1, "b": 2, "c": 3});
        let out = pipeline(vec!["a".into(), "b".into(), "c".into()], &record);

        assert_eq!(out.len(), 1);
        let group = out[0].as_group().unwrap();
        assert!(group.default_group);
        assert_eq!(group.label, "A");
        assert_eq!(column_labels(&out[0]), vec!["A", "B", "C"]);
    }

    #[test]
    fn default_section_header_doubles_as_first_column() {
        let record = json!({"a": 1});
        let out = pipeline(
            vec![FieldSpec::new("a").css_class("col-md-8").into()],
            &record,
        );

        let group = out[0].as_group().unwrap();
        // Container drops the class, the column copy keeps it.
        assert_eq!(group.css_class, None);
        let first = group.columns[0].as_field().unwrap();
        assert_eq!(first.css_class.as_deref(), Some("col-md-8"));
        assert_eq!(first.label, group.label);
    }

    #[test]
    fn explicit_group_at_index_zero_has_no_duplicated_header() {
        let record = json!({"a": 1, "b": 2});
        let out = pipeline(
            vec![FieldSpec::group("Section").into(), "a".into(), "b".into()],
            &record,
        );

        assert_eq!(out.len(), 1);
        let group = out[0].as_group().unwrap();
        assert!(!group.default_group);
        assert_eq!(group.label, "Section");
        assert_eq!(column_labels(&out[0]), vec!["A", "B"]);
    }

    #[test]
    fn two_groups_split_the_fields() {
        let record = json!({"b": 1, "c": 2, "e": 3});
        let out = pipeline(
            vec![
                FieldSpec::group("First").into(),
                "b".into(),
                "c".into(),
                FieldSpec::group("Second").into(),
                "e".into(),
            ],
            &record,
        );

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label(), "First");
        assert_eq!(column_labels(&out[0]), vec!["B", "C"]);
        assert_eq!(out[1].label(), "Second");
        assert_eq!(column_labels(&out[1]), vec!["E"]);
    }

    #[test]
    fn dropped_entries_do_not_shift_membership() {
        let record = json!({"b": 1, "c": 2, "e": 3});
        let out = pipeline(
            vec![
                FieldSpec::group("First").into(),
                "b".into(),
                FieldSpec::new("hidden").visible(false).into(),
                "c".into(),
            ],
            &record,
        );

        assert_eq!(out.len(), 1);
        assert_eq!(column_labels(&out[0]), vec!["B", "C"]);
    }

    #[test]
    fn group_css_class_stamps_absorbed_columns() {
        let record = json!({"b": 1});
        let out = pipeline(
            vec![
                FieldSpec::group("Wide").css_class("col-md-12").into(),
                "b".into(),
            ],
            &record,
        );

        let column = out[0].as_group().unwrap().columns[0].as_field().unwrap();
        assert_eq!(column.css_class.as_deref(), Some("col-md-12"));
    }

    #[test]
    fn fields_without_any_group_stay_top_level() {
        // Only reachable when the first entry is dropped: candidacy is tied
        // to raw index 0.
        let record = json!({"a": 1, "b": 2});
        let out = pipeline(
            vec![
                FieldSpec::new("hidden").visible(false).into(),
                "a".into(),
                "b".into(),
            ],
            &record,
        );

        assert_eq!(out.len(), 2);
        assert!(out[0].as_field().is_some());
        assert!(out[1].as_field().is_some());
    }

    #[test]
    fn organize_is_a_pure_contiguous_transform() {
        let entries = vec![leaf("x"), leaf("y")];
        let twice = organize(entries.clone());
        assert_eq!(twice, organize(entries));
        assert_eq!(twice.len(), 2);
    }

    #[test]
    fn pre_supplied_columns_pass_through_unchanged() {
        let record = json!({"a": 1, "b": 2});
        let out = pipeline(
            vec![FieldSpec::group("Section")
                .column("a")
                .column("b")
                .into()],
            &record,
        );

        assert_eq!(column_labels(&out[0]), vec!["A", "B"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::attr::{AttrSpec, FieldSpec, ViewContext};
    use crate::resolve::resolve_attributes;
    use proptest::prelude::*;
    use serde_json::json;

    fn leaf_count(descriptors: &[Descriptor]) -> usize {
        descriptors
            .iter()
            .map(|d| match d {
                Descriptor::Field(_) => 1,
                Descriptor::Group(group) => leaf_count(&group.columns),
            })
            .sum()
    }

    proptest! {
        /// Organization moves fields around but never invents or loses one;
        /// explicit group headers are the only entries that add no leaf.
        #[test]
        fn no_field_is_lost_or_invented(
            names in proptest::collection::vec("[a-z][a-z0-9_]{0,6}", 1..8),
            group_mask in proptest::collection::vec(any::<bool>(), 1..8),
        ) {
            let record = json!({"id": 1});
            let ctx = ViewContext {
                title: String::new(),
                primary_key: "id".to_string(),
                item_name: "item".to_string(),
            };
            let attrs: Vec<AttrSpec> = names
                .iter()
                .zip(group_mask.iter().chain(std::iter::repeat(&false)))
                .map(|(name, &grouped)| {
                    if grouped {
                        FieldSpec::group(name.clone()).into()
                    } else {
                        AttrSpec::from(name.as_str())
                    }
                })
                .collect();

            let resolved = resolve_attributes(&attrs, &record, &ctx).unwrap();
            let fields_in = resolved
                .iter()
                .filter(|entry| matches!(entry, crate::resolve::Resolved::Field { .. }))
                .count();

            let organized = organize(resolved);
            prop_assert_eq!(leaf_count(&organized), fields_in);
        }
    }
}
