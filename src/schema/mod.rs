//! Schema graph as resolved by the code generator.
//!
//! This module provides:
//! - Data models for entity types, typed fields and relationships
//! - Generation configuration (target directory, output name, asset override)
//! - A loader that resolves a graph from a directory of entity definitions

mod config;
mod loader;

pub use config::*;
pub use loader::*;

use crate::graph::source::{EntityView, FieldRef, RelationRef, SchemaSource};
use std::borrow::Cow;
use std::fmt;

/// Field type descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Text,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Time,
    Uuid,
    Bytes,
    Json,
    Enum,
    /// Any other type, displayed as written
    Other(String),
}

impl FieldType {
    /// Parse a type name from an entity definition.
    /// Unknown names are kept verbatim as `Other`.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();

        match trimmed.to_lowercase().as_str() {
            "string" | "str" | "varchar" => FieldType::String,
            "text" => FieldType::Text,
            "bool" | "boolean" => FieldType::Bool,
            "int" | "integer" => FieldType::Int,
            "int8" => FieldType::Int8,
            "int16" => FieldType::Int16,
            "int32" => FieldType::Int32,
            "int64" => FieldType::Int64,
            "uint" => FieldType::Uint,
            "uint8" => FieldType::Uint8,
            "uint16" => FieldType::Uint16,
            "uint32" => FieldType::Uint32,
            "uint64" => FieldType::Uint64,
            "float32" => FieldType::Float32,
            "float" | "float64" => FieldType::Float64,
            "time" | "time.time" | "datetime" | "timestamp" => FieldType::Time,
            "uuid" | "uuid.uuid" => FieldType::Uuid,
            "bytes" | "[]byte" => FieldType::Bytes,
            "json" => FieldType::Json,
            "enum" => FieldType::Enum,
            _ => FieldType::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Text => "string",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Int8 => "int8",
            FieldType::Int16 => "int16",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::Uint => "uint",
            FieldType::Uint8 => "uint8",
            FieldType::Uint16 => "uint16",
            FieldType::Uint32 => "uint32",
            FieldType::Uint64 => "uint64",
            FieldType::Float32 => "float32",
            FieldType::Float64 => "float64",
            FieldType::Time => "time.Time",
            FieldType::Uuid => "uuid.UUID",
            FieldType::Bytes => "[]byte",
            FieldType::Json => "json.RawMessage",
            FieldType::Enum => "enum",
            FieldType::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// Field definition within an entity type
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    /// Empty when the field has no comment
    pub comment: String,
}

/// Relationship declaration (an edge in the schema graph)
#[derive(Debug, Clone)]
pub struct Relation {
    pub name: String,
    /// Target entity type name
    pub target: String,
    /// For the inverse side of a bidirectional pair: the canonical edge name
    pub inverse_of: Option<String>,
    /// At most one target per source entity
    pub unique: bool,
}

impl Relation {
    /// Whether this is the inverse side of a bidirectional pair
    pub fn is_inverse(&self) -> bool {
        self.inverse_of.is_some()
    }
}

/// Entity type with fields and relationships in declaration order
#[derive(Debug, Clone)]
pub struct EntityType {
    pub name: String,
    pub fields: Vec<Field>,
    pub edges: Vec<Relation>,
}

impl EntityType {
    /// Get a relationship by name
    pub fn get_edge(&self, name: &str) -> Option<&Relation> {
        self.edges.iter().find(|e| e.name == name)
    }
}

/// Fully resolved schema graph
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    /// Generation settings the graph was loaded with
    pub config: GenConfig,
    /// Entity types in load order
    pub nodes: Vec<EntityType>,
}

impl SchemaGraph {
    /// Get the number of entity types
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get an entity type by name
    pub fn get_entity(&self, name: &str) -> Option<&EntityType> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

impl EntityView for EntityType {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> impl Iterator<Item = FieldRef<'_>> {
        self.fields.iter().map(|f| FieldRef {
            name: &f.name,
            type_name: Cow::Owned(f.field_type.to_string()),
            comment: &f.comment,
        })
    }

    fn relations(&self) -> impl Iterator<Item = RelationRef<'_>> {
        self.edges.iter().map(|e| RelationRef {
            name: &e.name,
            target: &e.target,
            inverse: e.is_inverse(),
            ref_name: e.inverse_of.as_deref(),
        })
    }
}

impl SchemaSource for SchemaGraph {
    type Entity = EntityType;

    fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.nodes.iter()
    }
}
