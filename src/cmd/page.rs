//! Page command: standalone rendering to a file or stdout.

use super::resolve_config;
use anyhow::Result;
use schema_viz::graph::{to_json_pretty, OutputFormat};
use schema_viz::pipeline::{render_schema, visualize, write_atomic};
use schema_viz::schema::load_graph;
use std::io::{self, Write};
use std::path::PathBuf;

pub fn run(
    schema_dir: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
) -> Result<()> {
    let format = if let Some(ref f) = format {
        f.parse().map_err(|e| anyhow::anyhow!("{}", e))?
    } else if let Some(ref out) = output {
        out.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default()
    } else {
        OutputFormat::Html
    };

    let config = resolve_config(config.as_deref(), assets_dir)?;
    let graph = load_graph(&schema_dir, Some(config))?;

    let content = match format {
        OutputFormat::Html => render_schema(&graph)?,
        OutputFormat::Json => {
            let mut json = to_json_pretty(&visualize(&graph))?;
            json.push('\n');
            json.into_bytes()
        }
    };

    if let Some(ref out_path) = output {
        write_atomic(out_path, &content)?;
        eprintln!(
            "Schema page ({}) written to: {}",
            format,
            out_path.display()
        );
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&content)?;
        stdout.flush()?;
    }

    Ok(())
}
