//! JSON Schema generation for machine-readable formats.
//!
//! Covers the graph payload embedded into pages (and printed by
//! `page --format json`) and the entity definition files the loader reads.
//! Schemas are exported via the `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns all JSON schemas keyed by name.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // entity definition files
    schemas.insert("entity", schema_for!(crate::schema::EntityDef));

    // graph payload
    schemas.insert("graph", schema_for!(crate::graph::VizGraph));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names() {
        assert_eq!(schema_names(), vec!["entity", "graph"]);
    }

    #[test]
    fn test_graph_schema_lists_payload_keys() {
        let schema = get_schema("graph").unwrap();
        let value = serde_json::to_value(&schema).unwrap();
        let props = value["properties"].as_object().unwrap();
        assert!(props.contains_key("nodes"));
        assert!(props.contains_key("edges"));
    }

    #[test]
    fn test_unknown_schema() {
        assert!(get_schema("split").is_none());
    }
}
