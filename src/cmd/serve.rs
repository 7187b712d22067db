//! Serve command: render once, serve over HTTP.

use super::resolve_config;
use anyhow::Result;
use schema_viz::schema::load_graph;
use schema_viz::serve::PageServer;
use std::path::PathBuf;

pub fn run(
    schema_dir: PathBuf,
    addr: String,
    config: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config.as_deref(), assets_dir)?;
    let graph = load_graph(&schema_dir, Some(config))?;
    let server = PageServer::from_schema(&graph)?;

    eprintln!(
        "Serving schema page for {} on http://{} (Ctrl-C to stop)",
        schema_dir.display(),
        addr
    );
    server.run_blocking(&addr)?;
    Ok(())
}
