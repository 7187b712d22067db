//! Document rendering.
//!
//! Merges the JSON-encoded graph and the asset payloads into the page
//! template, escaping each payload for the context its slot sits in.

pub mod escape;
pub mod template;

pub use template::{Segment, Slot, SlotKind, Template};

use crate::assets::Assets;
use crate::error::Result;
use crate::graph::{to_json, VizGraph};
use escape::{push_json, push_script, push_style};
use log::debug;

/// Renders visualization graphs into self-contained HTML pages.
///
/// Holds only shared references, so one renderer can be used from several
/// threads at once; each call builds its own buffer.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    template: &'a Template,
    assets: &'a Assets,
}

impl<'a> Renderer<'a> {
    pub fn new(template: &'a Template, assets: &'a Assets) -> Self {
        Self { template, assets }
    }

    /// Render a graph into page bytes
    pub fn render(&self, graph: &VizGraph) -> Result<Vec<u8>> {
        let json = to_json(graph)?;

        let mut out = String::with_capacity(
            self.template.literal_len() + self.assets.len() + json.len() + json.len() / 8,
        );
        for segment in self.template.segments() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => self.push_slot(&mut out, *slot, &json),
            }
        }

        debug!(
            "Rendered page: {} bytes ({} bytes of graph JSON)",
            out.len(),
            json.len()
        );
        Ok(out.into_bytes())
    }

    fn push_slot(&self, out: &mut String, slot: Slot, json: &str) {
        let payload = match slot {
            Slot::Stylesheet => self.assets.stylesheet.as_str(),
            Slot::NetworkJs => self.assets.network_js.as_str(),
            Slot::PaletteJs => self.assets.palette_js.as_str(),
            Slot::GraphJson => json,
        };
        match slot.kind() {
            SlotKind::Style => push_style(out, payload),
            SlotKind::Script => push_script(out, payload),
            SlotKind::JsonData => push_json(out, payload),
        }
    }
}

impl Renderer<'static> {
    /// Renderer over the bundled template and assets
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(Template::bundled()?, Assets::bundled()))
    }
}
