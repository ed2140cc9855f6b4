//! ui::render
//!
//! Text rendering of the schema forest.
//!
//! Two forms are produced: the field tree shown while editing, and the
//! serialized JSON preview. The preview is the tool's external contract:
//! pretty-printed with 2-space indentation, keys in sibling insertion order
//! at every depth.

use crate::core::forest::SchemaForest;

/// Render the field tree, one field per line.
///
/// Each line is `[id] name: kind`, indented two spaces per nesting depth,
/// with the id abbreviated to `id_width` characters. Fields appear in
/// insertion order, children directly beneath their parent.
pub fn tree(forest: &SchemaForest, id_width: usize) -> String {
    let lines: Vec<String> = forest
        .depth_first()
        .into_iter()
        .map(|(depth, field)| {
            format!(
                "{}[{}] {}: {}",
                "  ".repeat(depth),
                field.id().short(id_width),
                field.name(),
                field.kind()
            )
        })
        .collect();

    if lines.is_empty() {
        "(no fields)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Render the serialized schema preview.
///
/// # Errors
///
/// Returns the underlying serializer error if the preview cannot be
/// rendered (not expected for values the forest produces).
pub fn preview(forest: &SchemaForest) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&forest.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldKind;

    fn sample_forest() -> SchemaForest {
        let mut forest = SchemaForest::new();
        let field1 = forest.roots()[0].clone();
        forest.retype_field(&field1, FieldKind::Nested).unwrap();
        let street = forest.add_field(Some(&field1)).unwrap();
        forest.rename_field(&street, "street").unwrap();
        let count = forest.add_field(None).unwrap();
        forest.rename_field(&count, "count").unwrap();
        forest.retype_field(&count, FieldKind::Number).unwrap();
        forest.rename_field(&field1, "address").unwrap();
        forest
    }

    #[test]
    fn tree_shows_fields_in_order_with_nesting() {
        let forest = sample_forest();
        let rendered = tree(&forest, 8);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("] address: nested"));
        assert!(lines[1].starts_with("  ["));
        assert!(lines[1].ends_with("] street: string"));
        assert!(lines[2].ends_with("] count: number"));
    }

    #[test]
    fn tree_abbreviates_ids() {
        let forest = SchemaForest::new();
        let rendered = tree(&forest, 8);
        let id_part = rendered
            .split(']')
            .next()
            .unwrap()
            .trim_start_matches('[')
            .to_string();
        assert_eq!(id_part.len(), 8);
        assert!(forest.roots()[0].as_str().starts_with(&id_part));
    }

    #[test]
    fn tree_of_empty_forest() {
        let forest = SchemaForest::empty();
        assert_eq!(tree(&forest, 8), "(no fields)");
    }

    #[test]
    fn preview_is_pretty_printed_in_insertion_order() {
        let forest = sample_forest();
        insta::assert_snapshot!(preview(&forest).unwrap(), @r###"
        {
          "address": {
            "street": ""
          },
          "count": 0
        }
        "###);
    }

    #[test]
    fn preview_of_empty_forest() {
        let forest = SchemaForest::empty();
        assert_eq!(preview(&forest).unwrap(), "{}");
    }

    #[test]
    fn preview_of_fresh_forest() {
        let forest = SchemaForest::new();
        insta::assert_snapshot!(preview(&forest).unwrap(), @r###"
        {
          "field1": ""
        }
        "###);
    }
}
