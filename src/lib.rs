#![deny(missing_docs)]

//! # OAS Tables
//!
//! Normalizes an OpenAPI description document into a sorted, fully
//! named-and-typed entity envelope consumed by downstream code and
//! document generators.
//!
//! The pipeline is single-shot and synchronous: load the document,
//! walk its schemas and operations into entities, sort and serialize
//! the envelope. Any error aborts the whole run; there is no partial
//! output.

/// Shared error types.
pub mod error;

/// Naming variant derivation.
pub mod naming;

/// Document model and local reference dereferencing.
pub mod document;

/// File loading and external reference bundling.
pub mod loader;

/// Canonical type resolution.
pub mod types;

/// Normalized output entities and the envelope.
pub mod model;

/// Entity construction.
pub mod builder;

/// Document traversal.
pub mod walker;

/// Envelope sorting, serialization and output.
pub mod emit;

pub use builder::{build_path_table, build_schema_table};
pub use document::Document;
pub use emit::{render_envelope, write_envelope, OutputTarget};
pub use error::{AppError, AppResult};
pub use loader::load_document;
pub use model::{ColumnDef, ColumnExtras, Envelope, Meta, Table, TableKind, TypeDef};
pub use types::{resolve_type, Type};
pub use walker::walk_document;

use std::path::Path;

/// Runs the full pipeline: load, walk, render, write.
pub fn run(input: &Path, target: &OutputTarget) -> AppResult<()> {
    let doc = load_document(input)?;
    let (tables, meta) = walk_document(&doc)?;
    write_envelope(tables, meta, target)
}
