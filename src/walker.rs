#![deny(missing_docs)]

//! # Document Walker
//!
//! Single pass over a loaded document: every named schema and every
//! declared operation is handed to the entity builder, and the document
//! metadata is collected once. The walker never mutates the document and
//! assumes nothing about container order; the emitter's final sort is the
//! only ordering guarantee.

use crate::builder::{build_path_table, build_schema_table};
use crate::document::Document;
use crate::error::AppResult;
use crate::model::{Meta, MetaInfo, Table};

/// Walks the document, producing the full entity list and metadata.
pub fn walk_document(doc: &Document) -> AppResult<(Vec<Table>, Meta)> {
    let mut tables =
        Vec::with_capacity(doc.components.schemas.len() + doc.paths.len());

    for (name, node) in &doc.components.schemas {
        tables.push(build_schema_table(doc, name, node)?);
    }
    for (path, item) in &doc.paths {
        for (verb, operation) in item.operations() {
            tables.push(build_path_table(doc, path, verb, operation)?);
        }
    }

    let meta = Meta {
        info: doc.info.as_ref().map(|info| MetaInfo {
            title: info.title.clone(),
            description: info.description.clone().unwrap_or_default(),
            version: info.version.clone(),
        }),
        servers: doc
            .servers
            .as_ref()
            .map(|servers| servers.iter().map(|server| server.url.clone()).collect()),
    };
    Ok((tables, meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document(yaml: &str) -> Document {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_walk_collects_schemas_and_operations() {
        let doc = document(
            r#"
info:
  title: Shop
  description: a shop
  version: "2.0"
servers:
  - url: https://api.example.com
  - url: https://staging.example.com
components:
  schemas:
    Order: {type: object}
    Item: {type: object}
paths:
  /orders:
    get:
      operationId: ListOrders
    post:
      operationId: CreateOrder
"#,
        );
        let (tables, meta) = walk_document(&doc).unwrap();
        let keys: Vec<&str> = tables.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["Order", "Item", "ListOrders", "CreateOrder"]);

        let info = meta.info.unwrap();
        assert_eq!(info.title, "Shop");
        assert_eq!(info.description, "a shop");
        assert_eq!(info.version, "2.0");
        assert_eq!(
            meta.servers.unwrap(),
            vec!["https://api.example.com", "https://staging.example.com"]
        );
    }

    #[test]
    fn test_walk_without_info_or_servers() {
        let doc = document("components: {schemas: {}}");
        let (tables, meta) = walk_document(&doc).unwrap();
        assert!(tables.is_empty());
        assert!(meta.info.is_none());
        assert!(meta.servers.is_none());
    }

    #[test]
    fn test_walk_propagates_builder_errors() {
        let doc = document(
            r#"
paths:
  /orders:
    get: {}
"#,
        );
        assert!(walk_document(&doc).is_err());
    }
}
