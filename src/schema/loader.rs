//! Resolve a schema graph from a directory of entity definition files.
//!
//! Each `*.yaml`, `*.yml` or `*.json` file in the directory defines one
//! entity type:
//!
//! ```yaml
//! name: Pet
//! fields:
//!   - name: name
//!     type: string
//!     comment: 宠物名
//! edges:
//!   - name: owner
//!     type: User
//!     ref: pets
//!     unique: true
//! ```
//!
//! An edge with `ref` is the inverse side of the named edge on its target.
//! Files are read in file name order, which fixes the node order.

use super::{EntityType, Field, FieldType, GenConfig, Relation, SchemaGraph};
use crate::error::{Result, VizError};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One entity definition file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EntityDef {
    /// Entity type name, unique within the schema
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
}

/// Field definition
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub comment: String,
}

/// Edge definition
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EdgeDef {
    pub name: String,
    /// Target entity type
    #[serde(rename = "type")]
    pub target: String,
    /// Name of the canonical edge on the target this edge is the inverse of
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub inverse_of: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

impl EntityDef {
    fn into_entity(self) -> EntityType {
        EntityType {
            name: self.name,
            fields: self
                .fields
                .into_iter()
                .map(|f| Field {
                    field_type: FieldType::from_name(&f.field_type),
                    name: f.name,
                    comment: f.comment,
                })
                .collect(),
            edges: self
                .edges
                .into_iter()
                .map(|e| Relation {
                    name: e.name,
                    target: e.target,
                    inverse_of: e.inverse_of,
                    unique: e.unique,
                })
                .collect(),
        }
    }
}

/// Check whether a path looks like an entity definition file
pub fn is_definition_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "yaml" | "yml" | "json"))
            .unwrap_or(false)
}

/// List definition files in a schema directory, sorted by file name
pub fn definition_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| VizError::schema_load(dir, e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| VizError::schema_load(dir, e.to_string()))?;
        let path = entry.path();
        if is_definition_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Parse a single entity definition file
pub fn load_entity_file(path: &Path) -> Result<EntityDef> {
    let content = fs::read_to_string(path).map_err(|e| VizError::schema_load(path, e.to_string()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let def: EntityDef = if is_json {
        serde_json::from_str(&content).map_err(|e| VizError::schema_load(path, e.to_string()))?
    } else {
        serde_yaml_ng::from_str(&content).map_err(|e| VizError::schema_load(path, e.to_string()))?
    };

    if def.name.trim().is_empty() {
        return Err(VizError::schema_load(path, "entity name must not be empty"));
    }

    Ok(def)
}

/// Resolve a schema graph from a directory of entity definitions.
///
/// `config` defaults to [`GenConfig::default`]; its target directory
/// defaults to the parent of `dir`.
pub fn load_graph(dir: &Path, config: Option<GenConfig>) -> Result<SchemaGraph> {
    let files = definition_files(dir)?;
    if files.is_empty() {
        return Err(VizError::schema_load(dir, "no entity definitions found"));
    }

    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(files.len());

    for path in &files {
        let def = load_entity_file(path)?;
        debug!("Loaded entity {} from {}", def.name, path.display());

        if !seen.insert(def.name.clone()) {
            return Err(VizError::schema_load(
                path,
                format!("duplicate entity type {}", def.name),
            ));
        }
        nodes.push(def.into_entity());
    }

    validate_edges(dir, &nodes)?;

    let config = config.unwrap_or_default().with_default_target(dir);
    info!("Loaded {} entity types from {}", nodes.len(), dir.display());

    Ok(SchemaGraph { config, nodes })
}

/// Check edge targets and inverse references
fn validate_edges(dir: &Path, nodes: &[EntityType]) -> Result<()> {
    for entity in nodes {
        for edge in &entity.edges {
            let target = nodes
                .iter()
                .find(|n| n.name == edge.target)
                .ok_or_else(|| {
                    VizError::schema_load(
                        dir,
                        format!(
                            "edge {}.{} references unknown type {}",
                            entity.name, edge.name, edge.target
                        ),
                    )
                })?;

            if let Some(ref canonical) = edge.inverse_of {
                let resolved = target
                    .get_edge(canonical)
                    .map(|c| !c.is_inverse() && c.target == entity.name)
                    .unwrap_or(false);

                if !resolved {
                    return Err(VizError::schema_load(
                        dir,
                        format!(
                            "inverse edge {}.{} references missing edge {}.{}",
                            entity.name, edge.name, target.name, canonical
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}
