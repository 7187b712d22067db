//! YAML configuration for page generation.

use crate::error::{Result, VizError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name of the rendered page
pub const DEFAULT_OUTPUT_NAME: &str = "schema-viz.html";

/// Generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Output directory of the post-generation hook.
    /// Defaults to the parent of the schema directory.
    pub target: Option<PathBuf>,
    /// File name of the rendered page inside `target`
    pub output: String,
    /// Read assets from this directory instead of the bundled copies
    pub assets_dir: Option<PathBuf>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            target: None,
            output: DEFAULT_OUTPUT_NAME.to_string(),
            assets_dir: None,
        }
    }
}

impl GenConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| VizError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            VizError::Config { message, .. } => VizError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GenConfig = serde_yaml_ng::from_str(yaml).map_err(|e| VizError::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;

        if config.output.trim().is_empty() {
            return Err(VizError::Config {
                path: PathBuf::new(),
                message: "output file name must not be empty".to_string(),
            });
        }

        Ok(config)
    }

    /// Fill in the target directory from the schema location when unset
    pub fn with_default_target(mut self, schema_dir: &Path) -> Self {
        if self.target.is_none() {
            let parent = schema_dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            self.target = Some(parent);
        }
        self
    }

    /// Output directory, `.` when no target has been resolved
    pub fn target_dir(&self) -> &Path {
        self.target.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Full path of the rendered page
    pub fn output_path(&self) -> PathBuf {
        self.target_dir().join(&self.output)
    }
}
