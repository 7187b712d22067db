//! Generation entry points.
//!
//! [`VisualizeSchema`] wraps the next generator of a code generation run
//! and writes the rendered page after it succeeds. [`generate_page`]
//! renders a page straight from a schema directory.

use crate::assets::{AssetSource, Assets};
use crate::error::{Result, VizError};
use crate::graph::{reduce, unpaired_inverses, VizGraph};
use crate::render::{Renderer, Template};
use crate::schema::{load_graph, GenConfig, SchemaGraph};
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A code generation step over a resolved schema graph
pub trait Generator {
    fn generate(&self, graph: &SchemaGraph) -> Result<()>;
}

/// Adapts a closure into a [`Generator`]
pub struct GenerateFunc<F>(pub F);

impl<F> Generator for GenerateFunc<F>
where
    F: Fn(&SchemaGraph) -> Result<()>,
{
    fn generate(&self, graph: &SchemaGraph) -> Result<()> {
        (self.0)(graph)
    }
}

impl Generator for Box<dyn Generator> {
    fn generate(&self, graph: &SchemaGraph) -> Result<()> {
        (**self).generate(graph)
    }
}

/// Generator that does nothing, the base of a visualization-only run
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGenerator;

impl Generator for NoopGenerator {
    fn generate(&self, _graph: &SchemaGraph) -> Result<()> {
        Ok(())
    }
}

/// Wraps a generator
pub type Hook = fn(Box<dyn Generator>) -> Box<dyn Generator>;

/// Post-generation hook writing the schema page into the target directory
pub struct VisualizeSchema<G> {
    next: G,
}

impl<G: Generator> VisualizeSchema<G> {
    pub fn new(next: G) -> Self {
        Self { next }
    }
}

impl<G: Generator> Generator for VisualizeSchema<G> {
    fn generate(&self, graph: &SchemaGraph) -> Result<()> {
        self.next.generate(graph)?;

        let page = render_schema(graph)?;
        let path = graph.config.output_path();
        write_atomic(&path, &page)?;
        info!("Wrote {} ({} bytes)", path.display(), page.len());

        Ok(())
    }
}

/// [`Hook`] form of [`VisualizeSchema`]
pub fn visualize_schema(next: Box<dyn Generator>) -> Box<dyn Generator> {
    Box::new(VisualizeSchema::new(next))
}

/// Extension registering the visualization hook with a generation run
#[derive(Debug, Clone, Copy, Default)]
pub struct Extension;

impl Extension {
    pub fn hooks(&self) -> Vec<Hook> {
        vec![visualize_schema]
    }

    /// Wrap `base` in every hook, the first hook outermost
    pub fn apply(&self, base: Box<dyn Generator>) -> Box<dyn Generator> {
        self.hooks()
            .into_iter()
            .rev()
            .fold(base, |next, hook| hook(next))
    }
}

/// Resolve the schema graph in `schema_dir` and render its page
pub fn generate_page(schema_dir: &Path, config: Option<GenConfig>) -> Result<Vec<u8>> {
    let graph = load_graph(schema_dir, config)?;
    render_schema(&graph)
}

/// Reduce a schema graph, logging inverse relationships that produce no edge
pub fn visualize(graph: &SchemaGraph) -> VizGraph {
    for unpaired in unpaired_inverses(graph) {
        warn!(
            "Inverse relationship {} has no canonical side and is not drawn",
            unpaired.display()
        );
    }

    let viz = reduce(graph);
    debug!(
        "Reduced schema: {} nodes, {} edges, {} fields",
        viz.node_count(),
        viz.edge_count(),
        viz.field_count()
    );
    viz
}

/// Render the page for a resolved schema graph using its configured assets
pub fn render_schema(graph: &SchemaGraph) -> Result<Vec<u8>> {
    let viz = visualize(graph);

    match AssetSource::from_dir(graph.config.assets_dir.as_deref()) {
        AssetSource::Bundled => Renderer::bundled()?.render(&viz),
        AssetSource::Directory(dir) => {
            let assets = Assets::shared(&dir)?;
            Renderer::new(Template::bundled()?, &assets).render(&viz)
        }
    }
}

/// Write bytes through a temporary file in the same directory, then rename.
///
/// The destination either keeps its previous content or holds all of
/// `bytes`; no partial file is left behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| VizError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
