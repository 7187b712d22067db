//! Generate command: the post-generation hook run on its own.

use super::resolve_config;
use anyhow::{bail, Result};
use schema_viz::pipeline::{Extension, Generator, NoopGenerator};
use schema_viz::schema::load_graph;
use std::path::PathBuf;

pub fn run(
    schema_dir: PathBuf,
    config: Option<PathBuf>,
    target: Option<PathBuf>,
    output_name: Option<String>,
    assets_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = resolve_config(config.as_deref(), assets_dir)?;
    if let Some(target) = target {
        config.target = Some(target);
    }
    if let Some(name) = output_name {
        if name.trim().is_empty() {
            bail!("output name must not be empty");
        }
        config.output = name;
    }

    let graph = load_graph(&schema_dir, Some(config))?;
    eprintln!(
        "Generating schema page: {} ({} entity types)",
        schema_dir.display(),
        graph.len()
    );

    let generator = Extension.apply(Box::new(NoopGenerator));
    generator.generate(&graph)?;

    eprintln!(
        "Schema page written to: {}",
        graph.config.output_path().display()
    );
    Ok(())
}
