//! Render a schema graph as a self-contained interactive HTML page.
//!
//! Entity types become nodes listing their fields; relationships become
//! labeled, directed edges. A bidirectional relationship pair is drawn once,
//! from its canonical side.

pub mod assets;
pub mod error;
pub mod graph;
pub mod json_schema;
pub mod pipeline;
pub mod render;
pub mod schema;
#[cfg(feature = "serve")]
pub mod serve;

pub use error::{Result, VizError};
pub use pipeline::{generate_page, Extension, GenerateFunc, Generator, VisualizeSchema};
