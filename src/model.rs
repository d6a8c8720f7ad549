#![deny(missing_docs)]

//! # Output Model
//!
//! The normalized entities the envelope carries: [`ColumnDef`] for schema
//! properties and operation parameters, [`TypeDef`] for response bodies,
//! [`Table`] for schema and path-operation entities, plus the envelope
//! wrapper and document metadata.
//!
//! Every struct is fully populated at construction and never mutated
//! afterwards; all naming variants are pure functions of the raw source
//! key, so rebuilding from the same input reproduces the same entity.

use crate::naming;
use crate::types::Type;
use serde::Serialize;
use std::collections::BTreeMap;

/// Envelope discriminator for the produced file.
const FILE_KIND: &str = "openapi";
/// Envelope discriminator for the source document flavor.
const SRC_KIND: &str = "openapi";

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Distinguishes schema entities from path-operation entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// A named schema definition.
    Schema,
    /// A (path, verb) operation.
    Path,
}

/// A named, typed field: a schema property or an operation parameter.
///
/// Field names below are the wire contract the downstream generator reads;
/// the uppercase/lowercase pairs (`Name`/`name`, `Names`/`names`) are the
/// exported and local identifier spellings it emits.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDef {
    /// Plural of the raw key.
    #[serde(rename = "namesDb")]
    pub names_db: String,
    /// Singular snake_case name.
    #[serde(rename = "nameDb")]
    pub name_db: String,
    /// Corrected JSON key.
    #[serde(rename = "nameJson")]
    pub name_json: String,
    /// PascalCase identifier.
    #[serde(rename = "Name")]
    pub pascal_name: String,
    /// Identifier with the first letter lowered.
    #[serde(rename = "name")]
    pub var_name: String,
    /// Plural identifier.
    #[serde(rename = "Names")]
    pub pascal_names: String,
    /// Plural identifier with the first letter lowered.
    #[serde(rename = "names")]
    pub var_names: String,
    /// The raw source key, verbatim.
    #[serde(rename = "nameExact")]
    pub name_exact: String,
    /// Full type spelling (optionality applied to the element, then the
    /// array wrapper).
    #[serde(rename = "Type")]
    pub type_name: String,
    /// Element type spelling (optionality only).
    #[serde(rename = "baseType")]
    pub base_type: String,
    /// Declared format.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// Declared length.
    #[serde(skip_serializing_if = "is_zero")]
    pub size: i64,
    /// The resolved type descriptor the spellings were derived from.
    #[serde(skip)]
    pub ty: Type,
    /// Mirrors `ty.array`.
    #[serde(rename = "isArray")]
    pub is_array: bool,
    /// Whether the field is required (non-nullable).
    #[serde(rename = "notNull")]
    pub not_null: bool,
    /// Declared default value, rendered as a string.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// Parameter location (`query`, `path`, `header`); empty for schema
    /// properties.
    #[serde(rename = "in", skip_serializing_if = "String::is_empty")]
    pub location: String,
    /// Unique key within the entity; equals the JSON key variant.
    pub key: String,
}

/// Optional column attributes that do not affect naming.
#[derive(Debug, Clone, Default)]
pub struct ColumnExtras {
    /// Declared default value, rendered as a string.
    pub default: String,
    /// Free-text description.
    pub comment: String,
    /// Parameter location; empty for schema properties.
    pub location: String,
}

impl ColumnDef {
    /// Builds a column from its raw key, resolved type and nullability.
    /// All naming variants are derived here, once.
    pub fn new(raw_key: &str, ty: Type, not_null: bool, extras: ColumnExtras) -> Self {
        let pascal = naming::pascal_identifier(raw_key);
        let json = naming::json_key(raw_key);
        let plural_pascal = naming::plural_identifier(&pascal);
        ColumnDef {
            names_db: naming::plural(raw_key),
            name_db: naming::snake_identifier(&pascal),
            name_json: json.clone(),
            var_name: naming::lower_first(&pascal),
            var_names: naming::lower_first(&plural_pascal),
            pascal_names: plural_pascal,
            pascal_name: pascal,
            name_exact: raw_key.to_string(),
            type_name: ty.spelling(not_null),
            base_type: ty.element_spelling(not_null),
            format: ty.format.clone(),
            size: ty.len,
            is_array: ty.array,
            ty,
            not_null,
            default: extras.default,
            comment: extras.comment,
            location: extras.location,
            key: json,
        }
    }
}

/// An unnamed typed field, used only for response bodies.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDef {
    /// Full type spelling.
    #[serde(rename = "Type")]
    pub type_name: String,
    /// Element type spelling.
    #[serde(rename = "baseType")]
    pub base_type: String,
    /// Declared format.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// Declared length.
    #[serde(skip_serializing_if = "is_zero")]
    pub size: i64,
    /// The resolved type descriptor.
    #[serde(skip)]
    pub ty: Type,
    /// Mirrors `ty.array`.
    #[serde(rename = "isArray")]
    pub is_array: bool,
    /// Always true for responses, regardless of the source schema's own
    /// nullability. Preserved as-is from the envelope contract.
    #[serde(rename = "notNull")]
    pub not_null: bool,
    /// Free-text description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl TypeDef {
    /// Builds a response body type. `not_null` is hard-coded true.
    pub fn response(ty: Type, comment: String) -> Self {
        let not_null = true;
        TypeDef {
            type_name: ty.spelling(not_null),
            base_type: ty.element_spelling(not_null),
            format: ty.format.clone(),
            size: ty.len,
            is_array: ty.array,
            ty,
            not_null,
            comment,
        }
    }
}

/// One normalized entity: a schema definition or a path-operation.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    /// Plural snake_case name.
    #[serde(rename = "namesDb")]
    pub names_db: String,
    /// Singular snake_case name.
    #[serde(rename = "nameDb")]
    pub name_db: String,
    /// PascalCase identifier.
    #[serde(rename = "Name")]
    pub pascal_name: String,
    /// Identifier with the first letter lowered.
    #[serde(rename = "name")]
    pub var_name: String,
    /// Plural identifier.
    #[serde(rename = "Names")]
    pub pascal_names: String,
    /// Plural identifier with the first letter lowered.
    #[serde(rename = "names")]
    pub var_names: String,
    /// Lowercase short alias (concatenated capitals).
    #[serde(rename = "n")]
    pub short_name: String,
    /// Source path; empty for schema entities.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Lowercase HTTP verb; empty for schema entities.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub verb: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// Collection-wide unique key; the PascalCase identifier of the schema
    /// name or operation id, both assumed unique in the source document.
    pub key: String,
    /// Columns: schema properties or operation parameters, in source order.
    #[serde(rename = "fields")]
    pub columns: Vec<ColumnDef>,
    /// Response bodies keyed by status code; key-sorted on the wire.
    /// Always empty for schema entities.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, TypeDef>,
    /// Entity kind discriminator.
    pub kind: TableKind,
}

impl Table {
    /// Builds an entity shell from its kind and raw name (schema name or
    /// operation id); columns and responses are filled in by the builder.
    pub fn new(kind: TableKind, raw_name: &str) -> Self {
        let pascal = naming::pascal_identifier(raw_name);
        let snake = naming::snake_identifier(&pascal);
        let plural_pascal = naming::plural_identifier(&pascal);
        Table {
            names_db: naming::plural(&snake),
            name_db: snake,
            var_name: naming::lower_first(&pascal),
            var_names: naming::lower_first(&plural_pascal),
            pascal_names: plural_pascal,
            short_name: naming::short_alias(&pascal),
            key: pascal.clone(),
            pascal_name: pascal,
            path: String::new(),
            verb: String::new(),
            comment: String::new(),
            columns: Vec::new(),
            responses: BTreeMap::new(),
            kind,
        }
    }
}

/// Document metadata carried through to the envelope unchanged.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    /// Title, description and version from the document's `info` object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<MetaInfo>,
    /// Server URLs, present when the document declares a `servers` section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<String>>,
}

/// The `info` portion of the metadata.
#[derive(Debug, Clone, Serialize, Default)]
pub struct MetaInfo {
    /// Document title.
    pub title: String,
    /// Document description; empty string when absent.
    pub description: String,
    /// Document version.
    pub version: String,
}

/// The top-level output object: sorted entities plus metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    /// File kind discriminator.
    #[serde(rename = "kind")]
    pub file_kind: &'static str,
    /// Source kind discriminator.
    #[serde(rename = "srcKind")]
    pub src_kind: &'static str,
    /// The sorted entity list.
    pub data: Vec<Table>,
    /// Document metadata.
    pub meta: Meta,
}

impl Envelope {
    /// Wraps a sorted entity list and metadata.
    pub fn new(data: Vec<Table>, meta: Meta) -> Self {
        Envelope {
            file_kind: FILE_KIND,
            src_kind: SRC_KIND,
            data,
            meta,
        }
    }
}
