#![deny(missing_docs)]

//! # Type Resolution
//!
//! Resolves a schema, parameter or response node into a canonical [`Type`]
//! descriptor: a base type name (primitive or referenced entity), an array
//! flag, a format and an optional length.

use crate::document::{ref_tail, Document, SchemaRef};
use crate::error::{AppError, AppResult};

/// Primitive name translation table.
///
/// Immutable by design; any name without an entry passes through unchanged,
/// so custom scalar names reach the downstream generator as-is. `number`
/// and `integer` deliberately collapse to the same base type.
const BASE_TYPES: &[(&str, &str)] = &[
    ("double", "float64"),
    ("integer", "int64"),
    ("number", "int64"),
    ("boolean", "bool"),
];

/// A resolved type descriptor. Immutable once resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Type {
    /// Canonical primitive name or referenced entity name.
    pub base: String,
    /// Whether the field is an array of `base`.
    pub array: bool,
    /// Declared format, empty when absent.
    pub format: String,
    /// Declared length, zero when absent.
    pub len: i64,
}

impl Type {
    /// The element spelling: the base type with optionality applied.
    ///
    /// The downstream generator reads a `*` prefix as "optional".
    pub fn element_spelling(&self, not_null: bool) -> String {
        if not_null {
            self.base.clone()
        } else {
            format!("*{}", self.base)
        }
    }

    /// The full spelling: optionality wraps the element first, then the
    /// array wrapper is applied, so an optional array-of-T reads as
    /// "array of optional T" (`[]*T`), never "optional array of T".
    pub fn spelling(&self, not_null: bool) -> String {
        let element = self.element_spelling(not_null);
        if self.array {
            format!("[]{element}")
        } else {
            element
        }
    }
}

/// Translates a primitive name through the base-type table.
pub fn translate_base(name: &str) -> &str {
    BASE_TYPES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
        .unwrap_or(name)
}

/// Resolves a schema node to its [`Type`].
///
/// Resolution order:
/// 1. a node with an item schema resolves through the item: an explicit
///    item format wins, an object item resolves to its `$ref` tail, any
///    other item contributes its primitive type name;
/// 2. a pure `$ref` node resolves to the reference's trailing segment;
/// 3. otherwise the node's own declared type name is used.
///
/// The base-type table is applied last, and the item's format takes
/// precedence over the node's own.
pub fn resolve_type(doc: &Document, node: &SchemaRef) -> AppResult<Type> {
    let value = doc.deref(node)?;
    let is_array = value.kind == "array";
    let mut format = String::new();

    let mut base = if let Some(items) = &value.items {
        let item = doc.deref(items)?;
        if !item.format.is_empty() {
            format = item.format.clone();
            format.clone()
        } else if item.kind == "object" {
            let reference = items.reference.as_deref().ok_or_else(|| {
                AppError::Resolve("array item is an object without a $ref".to_string())
            })?;
            ref_tail(reference)?.to_string()
        } else {
            item.kind.clone()
        }
    } else if let Some(reference) = &node.reference {
        ref_tail(reference)?.to_string()
    } else {
        value.kind.clone()
    };

    base = translate_base(&base).to_string();
    if format.is_empty() && !value.format.is_empty() {
        format = value.format.clone();
    }

    Ok(Type {
        base,
        array: is_array,
        format,
        len: value.max_length.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document(yaml: &str) -> Document {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn resolve(doc: &Document, name: &str) -> Type {
        resolve_type(doc, &doc.components.schemas[name]).unwrap()
    }

    #[test]
    fn test_translate_base() {
        assert_eq!(translate_base("integer"), "int64");
        assert_eq!(translate_base("number"), "int64");
        assert_eq!(translate_base("double"), "float64");
        assert_eq!(translate_base("boolean"), "bool");
        assert_eq!(translate_base("string"), "string");
        assert_eq!(translate_base("custom-scalar"), "custom-scalar");
    }

    #[test]
    fn test_scalar_resolution() {
        let doc = document(
            r#"
components:
  schemas:
    S: {type: string}
    N: {type: integer, format: int32}
    M: {type: string, maxLength: 64}
"#,
        );
        assert_eq!(
            resolve(&doc, "S"),
            Type { base: "string".into(), array: false, format: String::new(), len: 0 }
        );
        let n = resolve(&doc, "N");
        assert_eq!(n.base, "int64");
        assert_eq!(n.format, "int32");
        assert_eq!(resolve(&doc, "M").len, 64);
    }

    #[test]
    fn test_array_item_resolution() {
        let doc = document(
            r##"
components:
  schemas:
    Tag: {type: object}
    Ints:
      type: array
      items: {type: integer}
    Stamps:
      type: array
      items: {type: string, format: date-time}
    Tags:
      type: array
      items:
        $ref: "#/components/schemas/Tag"
"##,
        );
        let ints = resolve(&doc, "Ints");
        assert_eq!(ints.base, "int64");
        assert!(ints.array);

        // an explicit item format becomes the base type
        let stamps = resolve(&doc, "Stamps");
        assert_eq!(stamps.base, "date-time");
        assert_eq!(stamps.format, "date-time");

        let tags = resolve(&doc, "Tags");
        assert_eq!(tags.base, "Tag");
        assert!(tags.array);
    }

    #[test]
    fn test_reference_resolves_to_bare_name() {
        let doc = document(
            r##"
components:
  schemas:
    Order: {type: object}
    Alias:
      $ref: "#/components/schemas/Order"
"##,
        );
        let alias = resolve(&doc, "Alias");
        assert_eq!(alias.base, "Order");
        assert!(!alias.array);
    }

    #[test]
    fn test_inline_object_item_without_ref_fails() {
        let doc = document(
            r#"
components:
  schemas:
    Bad:
      type: array
      items: {type: object}
"#,
        );
        assert!(matches!(
            resolve_type(&doc, &doc.components.schemas["Bad"]),
            Err(AppError::Resolve(_))
        ));
    }

    #[test]
    fn test_optional_wraps_element_then_array_wraps_whole() {
        let ty = Type { base: "int64".into(), array: true, format: String::new(), len: 0 };
        assert_eq!(ty.spelling(false), "[]*int64");
        assert_eq!(ty.spelling(true), "[]int64");
        assert_eq!(ty.element_spelling(false), "*int64");

        let scalar = Type { base: "string".into(), array: false, format: String::new(), len: 0 };
        assert_eq!(scalar.spelling(true), "string");
        assert_eq!(scalar.spelling(false), "*string");
    }
}
