//! Read-only view of a schema graph.
//!
//! The reducer only needs entity names, field name/type/comment and
//! relationship name/target/direction. Anything that can answer those
//! questions (the bundled [`crate::schema::SchemaGraph`], a test fixture, a
//! graph produced by another generator) can be visualized.

use std::borrow::Cow;

/// A field as seen by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef<'a> {
    pub name: &'a str,
    /// Canonical display string of the field type
    pub type_name: Cow<'a, str>,
    /// Comment text, empty when the field has none
    pub comment: &'a str,
}

/// A relationship declaration as seen by the reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationRef<'a> {
    pub name: &'a str,
    /// Name of the target entity type
    pub target: &'a str,
    /// True for the inverse side of a bidirectional pair
    pub inverse: bool,
    /// Name of the canonical relationship an inverse side refers to, if known
    pub ref_name: Option<&'a str>,
}

/// One entity type of a schema graph
pub trait EntityView {
    fn name(&self) -> &str;

    /// Fields in declaration order
    fn fields(&self) -> impl Iterator<Item = FieldRef<'_>>;

    /// Relationship declarations in declaration order
    fn relations(&self) -> impl Iterator<Item = RelationRef<'_>>;
}

/// A resolved schema graph
pub trait SchemaSource {
    type Entity: EntityView;

    /// Entity types in graph order
    fn entities(&self) -> impl Iterator<Item = &Self::Entity>;

    /// Look up an entity type by name
    fn entity(&self, name: &str) -> Option<&Self::Entity> {
        self.entities().find(|e| e.name() == name)
    }
}
