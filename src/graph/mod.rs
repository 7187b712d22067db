//! Visualization graph module.
//!
//! This module provides:
//! - A read-only adapter over schema graphs (`source`)
//! - Reduction into a minimal node/edge graph with inverse-pair deduplication
//! - Diagnostics for inverse relationships without a canonical side
//! - JSON output of the reduced graph

pub mod format;
pub mod source;
pub mod view;

pub use format::{to_json, to_json_pretty, OutputFormat};
pub use source::{EntityView, FieldRef, RelationRef, SchemaSource};
pub use view::{reduce, unpaired_inverses, UnpairedInverse, VizEdge, VizField, VizGraph, VizNode};
