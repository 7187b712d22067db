//! JSON format output for the visualization graph.

use crate::error::Result;
use crate::graph::view::VizGraph;

/// Compact JSON, the exact payload embedded into the rendered page
pub fn to_json(graph: &VizGraph) -> Result<String> {
    Ok(serde_json::to_string(graph)?)
}

/// Pretty-printed JSON for terminal and file output
pub fn to_json_pretty(graph: &VizGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}
