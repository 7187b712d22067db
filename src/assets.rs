//! Static payloads embedded into the rendered page.
//!
//! The bundled copies are compiled into the binary. A directory source reads
//! the same file names at runtime, so the upstream vis-network and
//! randomColor builds can be dropped in without rebuilding.

use crate::error::{Result, VizError};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// File name of the stylesheet asset
pub const STYLESHEET_FILE: &str = "viz.css";
/// File name of the network script library
pub const NETWORK_JS_FILE: &str = "network.js";
/// File name of the palette script library
pub const PALETTE_JS_FILE: &str = "palette.js";

const BUNDLED_STYLESHEET: &str = include_str!("../assets/viz.css");
const BUNDLED_NETWORK_JS: &str = include_str!("../assets/network.js");
const BUNDLED_PALETTE_JS: &str = include_str!("../assets/palette.js");

/// Bundled HTML template text
pub const BUNDLED_TEMPLATE: &str = include_str!("../assets/viz.html");

static BUNDLED: Lazy<Assets> = Lazy::new(|| Assets {
    stylesheet: BUNDLED_STYLESHEET.to_string(),
    network_js: BUNDLED_NETWORK_JS.to_string(),
    palette_js: BUNDLED_PALETTE_JS.to_string(),
});

/// Directory assets already read by this process, keyed by directory
static LOADED: Lazy<Mutex<HashMap<PathBuf, Arc<Assets>>>> = Lazy::new(Default::default);

/// Where asset payloads come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssetSource {
    /// Copies compiled into the binary
    #[default]
    Bundled,
    /// `viz.css`, `network.js` and `palette.js` read from a directory
    Directory(PathBuf),
}

impl AssetSource {
    /// Directory source when a path is given, bundled otherwise
    pub fn from_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => AssetSource::Directory(dir.to_path_buf()),
            None => AssetSource::Bundled,
        }
    }
}

/// The three payloads, unmodified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    pub stylesheet: String,
    pub network_js: String,
    pub palette_js: String,
}

impl Assets {
    /// Bundled assets, established once per process
    pub fn bundled() -> &'static Assets {
        &BUNDLED
    }

    /// Load assets from a source
    pub fn load(source: &AssetSource) -> Result<Assets> {
        match source {
            AssetSource::Bundled => Ok(Self::bundled().clone()),
            AssetSource::Directory(dir) => Self::from_dir(dir),
        }
    }

    /// Assets of a directory, read from disk at most once per process.
    ///
    /// Failed reads are not remembered; a later call retries.
    pub fn shared(dir: &Path) -> Result<Arc<Assets>> {
        let mut loaded = LOADED.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(assets) = loaded.get(dir) {
            return Ok(Arc::clone(assets));
        }

        let assets = Arc::new(Self::from_dir(dir)?);
        loaded.insert(dir.to_path_buf(), Arc::clone(&assets));
        Ok(assets)
    }

    fn from_dir(dir: &Path) -> Result<Assets> {
        debug!("Reading assets from {}", dir.display());
        Ok(Assets {
            stylesheet: read_asset("stylesheet", &dir.join(STYLESHEET_FILE))?,
            network_js: read_asset("network_js", &dir.join(NETWORK_JS_FILE))?,
            palette_js: read_asset("palette_js", &dir.join(PALETTE_JS_FILE))?,
        })
    }

    /// Total payload size in bytes
    pub fn len(&self) -> usize {
        self.stylesheet.len() + self.network_js.len() + self.palette_js.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_asset(name: &'static str, path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| VizError::AssetMissing {
        name,
        path: path.to_path_buf(),
        source,
    })
}
