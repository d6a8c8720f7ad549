#![deny(missing_docs)]

//! # Envelope Emitter
//!
//! Sorts the built entities, serializes the envelope to indented JSON and
//! writes it to the configured sink. The sort is the pipeline's only
//! ordering guarantee: everything upstream iterates unordered maps, so
//! reproducible output depends entirely on this step.

use crate::error::{AppError, AppResult};
use crate::model::{Envelope, Meta, Table};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Renders the envelope: stable ascending sort by entity key, then
/// tab-indented JSON.
pub fn render_envelope(mut tables: Vec<Table>, meta: Meta) -> AppResult<String> {
    tables.sort_by(|a, b| a.key.cmp(&b.key));
    let envelope = Envelope::new(tables, meta);

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    envelope.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| AppError::General(e.to_string()))
}

/// Where the rendered envelope goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to standard output.
    Stdout,
    /// Write to a file path.
    File(std::path::PathBuf),
}

/// Renders and writes the envelope to the target.
pub fn write_envelope(tables: Vec<Table>, meta: Meta, target: &OutputTarget) -> AppResult<()> {
    let rendered = render_envelope(tables, meta)?;
    match target {
        OutputTarget::Stdout => {
            std::io::stdout().write_all(rendered.as_bytes())?;
            Ok(())
        }
        OutputTarget::File(path) => write_file_atomic(path, rendered.as_bytes()),
    }
}

/// Writes through a temporary file in the destination directory and
/// persists by rename, so a failed run never leaves a truncated file.
fn write_file_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableKind;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn table(key: &str) -> Table {
        Table::new(TableKind::Schema, key)
    }

    #[test]
    fn test_render_sorts_by_key() {
        let tables = vec![table("Order"), table("Item"), table("ListOrders")];
        let rendered = render_envelope(tables, Meta::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let keys: Vec<&str> = parsed["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["Item", "ListOrders", "Order"]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let tables = vec![table("B"), table("A")];
        let a = render_envelope(tables.clone(), Meta::default()).unwrap();
        let b = render_envelope(tables, Meta::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_uses_tab_indent() {
        let rendered = render_envelope(vec![table("A")], Meta::default()).unwrap();
        assert!(rendered.contains("\n\t\"data\""));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_envelope(
            vec![table("A")],
            Meta::default(),
            &OutputTarget::File(path.clone()),
        )
        .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["kind"], "openapi");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "stale").unwrap();
        write_envelope(
            vec![table("A")],
            Meta::default(),
            &OutputTarget::File(path.clone()),
        )
        .unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with('{'));
    }
}
