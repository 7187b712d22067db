mod generate;
mod page;
mod schema;
#[cfg(feature = "serve")]
mod serve;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use schema_viz::schema::GenConfig;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "schema-viz")]
#[command(version)]
#[command(about = "Render a schema graph as an interactive HTML page", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the post-generation hook: write the page into the target directory
    Generate {
        /// Directory of entity definition files
        schema_dir: PathBuf,

        /// YAML generation config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (default: parent of the schema directory)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Output file name (default: schema-viz.html)
        #[arg(long)]
        output_name: Option<String>,

        /// Read viz.css, network.js and palette.js from this directory
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// Render the page for a schema directory to a file or stdout
    Page {
        /// Directory of entity definition files
        schema_dir: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: html, json (default: from output extension, else html)
        #[arg(short, long)]
        format: Option<String>,

        /// YAML generation config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Read viz.css, network.js and palette.js from this directory
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// Serve the page over HTTP
    #[cfg(feature = "serve")]
    Serve {
        /// Directory of entity definition files
        schema_dir: PathBuf,

        /// Listen address
        #[arg(long, default_value = schema_viz::serve::DEFAULT_ADDR)]
        addr: String,

        /// YAML generation config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Read viz.css, network.js and palette.js from this directory
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// Print JSON Schemas for the graph payload and entity definition files
    Schema {
        /// Schema name: graph, entity (default: all)
        name: Option<String>,

        /// Write <name>.schema.json files into this directory instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            schema_dir,
            config,
            target,
            output_name,
            assets_dir,
        } => generate::run(schema_dir, config, target, output_name, assets_dir),
        Commands::Page {
            schema_dir,
            output,
            format,
            config,
            assets_dir,
        } => page::run(schema_dir, output, format, config, assets_dir),
        #[cfg(feature = "serve")]
        Commands::Serve {
            schema_dir,
            addr,
            config,
            assets_dir,
        } => serve::run(schema_dir, addr, config, assets_dir),
        Commands::Schema { name, output } => schema::run(name, output),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "schema-viz", &mut io::stdout());
            Ok(())
        }
    }
}

/// Load the config file when given, then apply the asset directory override
fn resolve_config(config: Option<&Path>, assets_dir: Option<PathBuf>) -> Result<GenConfig> {
    let mut config = match config {
        Some(path) => GenConfig::load(path)?,
        None => GenConfig::default(),
    };
    if assets_dir.is_some() {
        config.assets_dir = assets_dir;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_verbosity() {
        let cli = Cli::parse_from(["schema-viz", "-vv", "page", "ent/schema"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Page { .. }));
    }

    #[test]
    fn test_resolve_config_flag_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("viz.yaml");
        fs::write(&path, "output: erd.html\nassets_dir: from-file\n").unwrap();

        let config = resolve_config(Some(&path), Some(PathBuf::from("from-flag"))).unwrap();
        assert_eq!(config.output, "erd.html");
        assert_eq!(config.assets_dir, Some(PathBuf::from("from-flag")));

        let config = resolve_config(Some(&path), None).unwrap();
        assert_eq!(config.assets_dir, Some(PathBuf::from("from-file")));
    }

    #[test]
    fn test_resolve_config_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_config(Some(&dir.path().join("none.yaml")), None).is_err());
    }
}
