#![deny(missing_docs)]

//! # Document Model
//!
//! Serde structures for the subset of an OpenAPI document the pipeline
//! reads, plus local `$ref` dereferencing. Property and path maps are
//! `IndexMap`s so document order survives parsing; the emitter's final
//! sort is the only ordering the output relies on, but stable input order
//! keeps column sequences reproducible.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::Deserialize;

/// Upper bound on reference hops while dereferencing a schema node.
///
/// Circular references are out of scope; the bound turns a cycle into a
/// fatal error instead of an unbounded loop.
const MAX_REF_HOPS: usize = 32;

/// A loaded API description document.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Document {
    /// Document metadata (`info` object).
    pub info: Option<Info>,
    /// Server list; `None` when the document has no `servers` section.
    pub servers: Option<Vec<Server>>,
    /// Path map in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default)]
    pub components: Components,
}

/// Document-level metadata.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Info {
    /// Document title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Document version string.
    pub version: String,
}

/// One `servers` entry; only the URL is carried through.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Server {
    /// Server URL.
    pub url: String,
}

/// The `components` object; only named schemas are read.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Components {
    /// Named schema definitions in document order.
    pub schemas: IndexMap<String, SchemaRef>,
}

/// One path entry with its verb-keyed operations.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PathItem {
    /// GET operation, if declared.
    pub get: Option<Operation>,
    /// POST operation, if declared.
    pub post: Option<Operation>,
    /// DELETE operation, if declared.
    pub delete: Option<Operation>,
    /// PATCH operation, if declared.
    pub patch: Option<Operation>,
    /// PUT operation, if declared.
    pub put: Option<Operation>,
}

impl PathItem {
    /// Iterates the declared operations in a fixed verb order.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", self.get.as_ref()),
            ("post", self.post.as_ref()),
            ("delete", self.delete.as_ref()),
            ("patch", self.patch.as_ref()),
            ("put", self.put.as_ref()),
        ]
        .into_iter()
        .filter_map(|(verb, op)| op.map(|op| (verb, op)))
    }
}

/// One declared operation.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Operation {
    /// The unique operation identifier; naming is derived from it.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Declared parameters.
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code (or `default`).
    pub responses: IndexMap<String, Response>,
}

/// One operation parameter.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Parameter {
    /// Parameter name; the raw key for naming derivation.
    pub name: String,
    /// Parameter location: `query`, `path` or `header`.
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter must be present.
    pub required: bool,
    /// The parameter's schema node.
    pub schema: Option<SchemaRef>,
    /// Free-text description.
    pub description: Option<String>,
}

/// One response entry.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Response {
    /// Free-text description.
    pub description: Option<String>,
    /// Body variants keyed by media type.
    pub content: IndexMap<String, MediaType>,
}

/// One media-type body declaration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MediaType {
    /// The body schema node.
    pub schema: Option<SchemaRef>,
}

/// A schema node: either a `$ref`, an inline schema, or (after loading)
/// both a reference string and a resolvable target.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchemaRef {
    /// Reference string, when the node is a `$ref`.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Inline schema payload; empty defaults when the node is a pure `$ref`.
    #[serde(flatten)]
    pub schema: RawSchema,
}

/// The raw schema fields the resolver inspects.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSchema {
    /// Declared type name (`string`, `integer`, `array`, `object`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Declared format, empty when absent.
    pub format: String,
    /// Item schema for array types.
    pub items: Option<Box<SchemaRef>>,
    /// Object properties in document order.
    pub properties: IndexMap<String, SchemaRef>,
    /// Names of required properties.
    pub required: Vec<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Declared maximum length, carried through as the type's length.
    #[serde(rename = "maxLength")]
    pub max_length: Option<i64>,
    /// Declared default value.
    pub default: Option<serde_json::Value>,
}

impl Document {
    /// Resolves a schema node to its effective schema value.
    ///
    /// Inline nodes resolve to themselves; references are looked up in
    /// `components.schemas` by the trailing name segment of the pointer.
    /// The loader has already bundled external references, so every
    /// reference seen here must name a loaded component.
    pub fn deref<'a>(&'a self, node: &'a SchemaRef) -> AppResult<&'a RawSchema> {
        let mut current = node;
        for _ in 0..MAX_REF_HOPS {
            let reference = match &current.reference {
                None => return Ok(&current.schema),
                Some(reference) => reference,
            };
            let name = ref_tail(reference)?;
            current = self.components.schemas.get(name).ok_or_else(|| {
                AppError::Resolve(format!("unresolved reference {reference:?}"))
            })?;
        }
        Err(AppError::Resolve(format!(
            "reference chain starting at {:?} exceeds {MAX_REF_HOPS} hops",
            node.reference.as_deref().unwrap_or("")
        )))
    }
}

/// Extracts the trailing name segment of a `$ref` pointer string.
///
/// `"#/components/schemas/Order"` → `"Order"`. A pointer with no usable
/// trailing segment is a fatal resolution error: a malformed reference
/// indicates document corruption.
pub fn ref_tail(reference: &str) -> AppResult<&str> {
    reference
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| {
            AppError::Resolve(format!(
                "reference {reference:?} has no trailing name segment"
            ))
        })
}
