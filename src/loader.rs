#![deny(missing_docs)]

//! # Document Loader
//!
//! Reads the input file (YAML or JSON; YAML is a superset so one parser
//! covers both), bundles external `$ref` targets into the document's
//! component map, and deserializes the result into the typed [`Document`]
//! model. No network access is performed; external references are file
//! paths relative to the referencing document.

use crate::document::{ref_tail, Document};
use crate::error::{AppError, AppResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound on bundling passes.
///
/// Each pass inlines one layer of external references; a chain deeper than
/// this indicates a reference cycle across files.
const MAX_BUNDLE_PASSES: usize = 16;

/// Loads, bundles and deserializes an API description document.
pub fn load_document(path: &Path) -> AppResult<Document> {
    let mut root = read_value(path)?;
    let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    Bundler::default().bundle(&mut root, &base)?;
    serde_json::from_value(root)
        .map_err(|e| AppError::Parse(format!("{}: {e}", path.display())))
}

fn read_value(path: &Path) -> AppResult<Value> {
    let text = fs::read_to_string(path)?;
    serde_yaml::from_str(&text).map_err(|e| AppError::Parse(format!("{}: {e}", path.display())))
}

/// Inlines external `$ref` targets into `components/schemas`.
///
/// An external reference `file#/pointer` is replaced by a local reference
/// to a component named after the pointer's trailing segment (or the file
/// stem when there is no fragment), and the pointed-at value is inserted
/// under that name. Relative references inside a loaded file are first
/// absolutized against that file's directory, so nested chains resolve
/// against the right base on the next pass.
#[derive(Default)]
struct Bundler {
    cache: HashMap<PathBuf, Value>,
}

impl Bundler {
    fn bundle(&mut self, root: &mut Value, base: &Path) -> AppResult<()> {
        for _ in 0..MAX_BUNDLE_PASSES {
            let pending = collect_external_refs(root);
            if pending.is_empty() {
                return Ok(());
            }
            for reference in pending {
                let (name, target) = self.load_target(&reference, base)?;
                insert_schema(root, &name, target);
                let local = format!("#/components/schemas/{name}");
                rewrite_refs(root, &reference, &local);
            }
        }
        Err(AppError::Parse(format!(
            "external reference chain exceeds {MAX_BUNDLE_PASSES} levels"
        )))
    }

    /// Loads the value an external reference points at, returning the
    /// component name it will be stored under.
    fn load_target(&mut self, reference: &str, base: &Path) -> AppResult<(String, Value)> {
        let (file_part, fragment) = match reference.split_once('#') {
            Some((file, fragment)) => (file, Some(fragment)),
            None => (reference, None),
        };
        let file = Path::new(file_part);
        let file = if file.is_absolute() {
            file.to_path_buf()
        } else {
            base.join(file)
        };
        if !self.cache.contains_key(&file) {
            let mut loaded = read_value(&file)?;
            let file_base = file.parent().unwrap_or(Path::new(".")).to_path_buf();
            absolutize_refs(&mut loaded, &file_base);
            self.cache.insert(file.clone(), loaded);
        }
        let doc = &self.cache[&file];
        let target = match fragment.filter(|f| !f.is_empty()) {
            Some(pointer) => doc.pointer(pointer).cloned().ok_or_else(|| {
                AppError::Resolve(format!(
                    "reference {reference:?}: pointer {pointer:?} not found in {}",
                    file.display()
                ))
            })?,
            None => doc.clone(),
        };
        let name = match fragment.filter(|f| !f.is_empty()) {
            Some(pointer) => ref_tail(pointer)?.to_string(),
            None => file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .filter(|stem| !stem.is_empty())
                .ok_or_else(|| {
                    AppError::Resolve(format!("reference {reference:?} has no usable name"))
                })?,
        };
        Ok((name, target))
    }
}

/// Visits every `$ref` string in the tree.
fn for_each_ref(value: &Value, visit: &mut impl FnMut(&str)) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map {
                if key == "$ref" {
                    if let Value::String(reference) = entry {
                        visit(reference);
                        continue;
                    }
                }
                for_each_ref(entry, visit);
            }
        }
        Value::Array(items) => {
            for entry in items {
                for_each_ref(entry, visit);
            }
        }
        _ => {}
    }
}

fn for_each_ref_mut(value: &mut Value, visit: &mut impl FnMut(&mut String)) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if key == "$ref" {
                    if let Value::String(reference) = entry {
                        visit(reference);
                        continue;
                    }
                }
                for_each_ref_mut(entry, visit);
            }
        }
        Value::Array(items) => {
            for entry in items {
                for_each_ref_mut(entry, visit);
            }
        }
        _ => {}
    }
}

fn is_external(reference: &str) -> bool {
    !reference.is_empty() && !reference.starts_with('#')
}

/// Collects distinct external reference strings, in document order.
fn collect_external_refs(root: &Value) -> Vec<String> {
    let mut refs = Vec::new();
    for_each_ref(root, &mut |reference| {
        if is_external(reference) && !refs.iter().any(|seen| seen == reference) {
            refs.push(reference.to_string());
        }
    });
    refs
}

/// Rewrites relative external references to absolute file paths.
fn absolutize_refs(value: &mut Value, base: &Path) {
    for_each_ref_mut(value, &mut |reference| {
        if !is_external(reference) {
            return;
        }
        let (file_part, fragment) = match reference.split_once('#') {
            Some((file, fragment)) => (file, Some(fragment)),
            None => (reference.as_str(), None),
        };
        if Path::new(file_part).is_absolute() {
            return;
        }
        let absolute = base.join(file_part);
        *reference = match fragment {
            Some(fragment) => format!("{}#{fragment}", absolute.display()),
            None => absolute.display().to_string(),
        };
    });
}

fn rewrite_refs(root: &mut Value, from: &str, to: &str) {
    for_each_ref_mut(root, &mut |reference| {
        if reference == from {
            *reference = to.to_string();
        }
    });
}

/// Inserts a bundled schema under `components/schemas/{name}`, creating the
/// intermediate objects as needed. An already-present name wins: the first
/// loaded definition stays.
fn insert_schema(root: &mut Value, name: &str, schema: Value) {
    if !root.is_object() {
        return;
    }
    let components = root
        .as_object_mut()
        .and_then(|map| {
            map.entry("components")
                .or_insert_with(|| Value::Object(Default::default()))
                .as_object_mut()
        })
        .and_then(|map| {
            map.entry("schemas")
                .or_insert_with(|| Value::Object(Default::default()))
                .as_object_mut()
        });
    if let Some(schemas) = components {
        schemas.entry(name.to_string()).or_insert(schema);
    }
}
