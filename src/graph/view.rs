//! Minimal visualization graph and the reduction that builds it.

use crate::graph::source::{EntityView, RelationRef, SchemaSource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Node/edge graph embedded in the rendered page.
///
/// Field declaration order is the serialized key order, and downstream
/// consumers compare the JSON byte for byte, so do not reorder fields here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VizGraph {
    pub nodes: Vec<VizNode>,
    pub edges: Vec<VizEdge>,
}

/// One entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VizNode {
    /// Entity type name
    pub id: String,
    /// Fields in declaration order
    pub fields: Vec<VizField>,
}

/// One field of an entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VizField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Always serialized, empty string when the field has no comment
    pub comment: String,
}

/// A directed, labeled relationship between two entity types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VizEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl VizEdge {
    /// Whether the edge starts and ends at the same entity
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl VizGraph {
    /// Reduce a schema graph into its visualization graph.
    ///
    /// Nodes follow entity order. Edges follow entity order, then
    /// relationship declaration order. Inverse declarations are dropped so a
    /// bidirectional pair appears once, from the canonical side.
    pub fn from_source<S: SchemaSource>(source: &S) -> Self {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for entity in source.entities() {
            let fields = entity
                .fields()
                .map(|f| VizField {
                    name: f.name.to_string(),
                    field_type: f.type_name.into_owned(),
                    comment: f.comment.to_string(),
                })
                .collect();

            nodes.push(VizNode {
                id: entity.name().to_string(),
                fields,
            });

            for rel in entity.relations() {
                if rel.inverse {
                    continue;
                }
                edges.push(VizEdge {
                    from: entity.name().to_string(),
                    to: rel.target.to_string(),
                    label: rel.name.to_string(),
                });
            }
        }

        Self { nodes, edges }
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of fields across all nodes
    pub fn field_count(&self) -> usize {
        self.nodes.iter().map(|n| n.fields.len()).sum()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&VizNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges whose source and target are the same node
    pub fn self_loops(&self) -> impl Iterator<Item = &VizEdge> {
        self.edges.iter().filter(|e| e.is_self_loop())
    }
}

/// Reduce a schema graph into its visualization graph
pub fn reduce<S: SchemaSource>(source: &S) -> VizGraph {
    VizGraph::from_source(source)
}

/// An inverse relationship with no canonical counterpart on its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpairedInverse {
    pub entity: String,
    pub relation: String,
    pub target: String,
}

impl UnpairedInverse {
    /// Format for log output
    pub fn display(&self) -> String {
        format!("{}.{} -> {}", self.entity, self.relation, self.target)
    }
}

/// Find inverse declarations that no canonical declaration backs.
///
/// Such declarations produce no edge at all. The reduction drops them
/// silently; this lets callers report them.
pub fn unpaired_inverses<S: SchemaSource>(source: &S) -> Vec<UnpairedInverse> {
    let mut unpaired = Vec::new();

    for entity in source.entities() {
        for rel in entity.relations().filter(|r| r.inverse) {
            let paired = source
                .entity(rel.target)
                .map(|target| has_canonical_back_edge(target, entity.name(), &rel))
                .unwrap_or(false);

            if !paired {
                unpaired.push(UnpairedInverse {
                    entity: entity.name().to_string(),
                    relation: rel.name.to_string(),
                    target: rel.target.to_string(),
                });
            }
        }
    }

    unpaired
}

fn has_canonical_back_edge<E: EntityView>(target: &E, owner: &str, inverse: &RelationRef) -> bool {
    target.relations().any(|candidate| {
        !candidate.inverse
            && candidate.target == owner
            && inverse.ref_name.map_or(true, |r| r == candidate.name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::source::FieldRef;
    use std::borrow::Cow;

    struct Entity {
        name: &'static str,
        fields: Vec<(&'static str, &'static str, &'static str)>,
        relations: Vec<RelationRef<'static>>,
    }

    impl EntityView for Entity {
        fn name(&self) -> &str {
            self.name
        }

        fn fields(&self) -> impl Iterator<Item = FieldRef<'_>> {
            self.fields.iter().map(|&(name, ty, comment)| FieldRef {
                name,
                type_name: Cow::Borrowed(ty),
                comment,
            })
        }

        fn relations(&self) -> impl Iterator<Item = RelationRef<'_>> {
            self.relations.iter().map(|r| RelationRef {
                name: r.name,
                target: r.target,
                inverse: r.inverse,
                ref_name: r.ref_name,
            })
        }
    }

    struct Fixture(Vec<Entity>);

    impl SchemaSource for Fixture {
        type Entity = Entity;

        fn entities(&self) -> impl Iterator<Item = &Entity> {
            self.0.iter()
        }
    }

    fn to(name: &'static str, target: &'static str) -> RelationRef<'static> {
        RelationRef {
            name,
            target,
            inverse: false,
            ref_name: None,
        }
    }

    fn from(name: &'static str, target: &'static str, r: &'static str) -> RelationRef<'static> {
        RelationRef {
            name,
            target,
            inverse: true,
            ref_name: Some(r),
        }
    }

    fn user_pet() -> Fixture {
        Fixture(vec![
            Entity {
                name: "User",
                fields: vec![("name", "string", "用户姓名"), ("age", "int", "")],
                relations: vec![to("pets", "Pet"), to("parent", "User")],
            },
            Entity {
                name: "Pet",
                fields: vec![],
                relations: vec![from("owner", "User", "pets")],
            },
        ])
    }

    #[test]
    fn test_nodes_follow_entity_order() {
        let graph = reduce(&user_pet());
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["User", "Pet"]);
    }

    #[test]
    fn test_fields_copied_verbatim() {
        let graph = reduce(&user_pet());
        let user = graph.get_node("User").unwrap();
        assert_eq!(user.fields.len(), 2);
        assert_eq!(user.fields[0].name, "name");
        assert_eq!(user.fields[0].field_type, "string");
        assert_eq!(user.fields[0].comment, "用户姓名");
        assert_eq!(user.fields[1].comment, "");
    }

    #[test]
    fn test_inverse_side_dropped() {
        let graph = reduce(&user_pet());
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.edges.iter().any(|e| e.label == "owner"));
        assert_eq!(
            graph.edges[0],
            VizEdge {
                from: "User".to_string(),
                to: "Pet".to_string(),
                label: "pets".to_string(),
            }
        );
    }

    #[test]
    fn test_self_loop_preserved() {
        let graph = reduce(&user_pet());
        let loops: Vec<_> = graph.self_loops().collect();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].label, "parent");
        assert_eq!(loops[0].from, "User");
    }

    #[test]
    fn test_counts() {
        let graph = reduce(&user_pet());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.field_count(), 2);
        assert!(!graph.is_empty());
        assert!(reduce(&Fixture(vec![])).is_empty());
    }

    #[test]
    fn test_paired_inverse_not_reported() {
        assert!(unpaired_inverses(&user_pet()).is_empty());
    }

    #[test]
    fn test_unpaired_inverse_reported() {
        let fixture = Fixture(vec![
            Entity {
                name: "User",
                fields: vec![],
                relations: vec![],
            },
            Entity {
                name: "Car",
                fields: vec![],
                relations: vec![from("owner", "User", "cars")],
            },
        ]);

        let unpaired = unpaired_inverses(&fixture);
        assert_eq!(unpaired.len(), 1);
        assert_eq!(unpaired[0].display(), "Car.owner -> User");
        // Still no edge for it
        assert_eq!(reduce(&fixture).edge_count(), 0);
    }

    #[test]
    fn test_inverse_ref_must_name_the_canonical_edge() {
        let fixture = Fixture(vec![
            Entity {
                name: "User",
                fields: vec![],
                relations: vec![to("pets", "Pet")],
            },
            Entity {
                name: "Pet",
                fields: vec![],
                relations: vec![from("owner", "User", "animals")],
            },
        ]);

        assert_eq!(unpaired_inverses(&fixture).len(), 1);
    }
}
