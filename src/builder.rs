#![deny(missing_docs)]

//! # Entity Builder
//!
//! Builds one normalized [`Table`] per named schema and per (path, verb)
//! operation, populating columns and responses through the type resolver
//! and naming deriver. Any failure aborts the run; entities are never
//! emitted partially built.

use crate::document::{Document, Operation, SchemaRef};
use crate::error::{AppError, AppResult};
use crate::model::{ColumnDef, ColumnExtras, Table, TableKind, TypeDef};
use crate::types::resolve_type;

/// The only media type response bodies are read from.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Builds a schema entity from a named schema definition.
pub fn build_schema_table(doc: &Document, name: &str, node: &SchemaRef) -> AppResult<Table> {
    let value = doc.deref(node)?;
    let mut table = Table::new(TableKind::Schema, name);
    table.comment = value.description.clone().unwrap_or_default();

    for (prop_name, prop) in &value.properties {
        let not_null = value.required.iter().any(|required| required == prop_name);
        let ty = resolve_type(doc, prop)?;
        let prop_value = doc.deref(prop)?;
        table.columns.push(ColumnDef::new(
            prop_name,
            ty,
            not_null,
            ColumnExtras {
                default: render_default(prop_value.default.as_ref()),
                comment: prop_value.description.clone().unwrap_or_default(),
                location: String::new(),
            },
        ));
    }
    Ok(table)
}

/// Builds a path-operation entity.
///
/// The operation id is the entity's identity; a missing or empty one fails
/// fast rather than inventing a name.
pub fn build_path_table(
    doc: &Document,
    path: &str,
    verb: &str,
    operation: &Operation,
) -> AppResult<Table> {
    let operation_id = operation
        .operation_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            AppError::Parse(format!("operation {verb} {path} is missing an operationId"))
        })?;

    let mut table = Table::new(TableKind::Path, operation_id);
    table.path = path.to_string();
    table.verb = verb.to_string();
    table.comment = operation.description.clone().unwrap_or_default();

    for parameter in &operation.parameters {
        let schema = parameter.schema.as_ref().ok_or_else(|| {
            AppError::Parse(format!(
                "parameter {:?} of operation {operation_id} has no schema",
                parameter.name
            ))
        })?;
        let ty = resolve_type(doc, schema)?;
        table.columns.push(ColumnDef::new(
            &parameter.name,
            ty,
            parameter.required,
            ColumnExtras {
                default: String::new(),
                comment: parameter.description.clone().unwrap_or_default(),
                location: parameter.location.clone(),
            },
        ));
    }

    for (status, response) in &operation.responses {
        // responses without a JSON body are skipped, not reported
        let schema = match response
            .content
            .get(JSON_MEDIA_TYPE)
            .and_then(|media| media.schema.as_ref())
        {
            Some(schema) => schema,
            None => continue,
        };
        let ty = resolve_type(doc, schema)?;
        let comment = response.description.clone().unwrap_or_default();
        table
            .responses
            .insert(status.clone(), TypeDef::response(ty, comment));
    }
    Ok(table)
}

fn render_default(value: Option<&serde_json::Value>) -> String {
    match value {
        None => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
