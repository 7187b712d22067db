//! Page template with four named slots.
//!
//! Placeholders are written `{{ name }}`; whitespace inside the braces is
//! optional. Every slot must appear exactly once. Parsing validates this up
//! front so rendering itself cannot fail on template shape.
//!
//! Only `{{` followed by an identifier and `}}` is a placeholder. Any other
//! `{{`, such as a nested object literal in an inline script, is kept as
//! text.

use crate::assets::BUNDLED_TEMPLATE;
use crate::error::{Result, VizError};
use once_cell::sync::OnceCell;
use std::fmt;

static BUNDLED: OnceCell<Template> = OnceCell::new();

/// Escaping context a slot is embedded in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Raw text of a `<style>` element
    Style,
    /// Raw text of a `<script>` element
    Script,
    /// JSON value used as a JavaScript expression
    JsonData,
}

/// A named placeholder in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Stylesheet,
    NetworkJs,
    PaletteJs,
    GraphJson,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::Stylesheet,
        Slot::NetworkJs,
        Slot::PaletteJs,
        Slot::GraphJson,
    ];

    /// Placeholder name as written in the template
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Stylesheet => "stylesheet",
            Slot::NetworkJs => "network_js",
            Slot::PaletteJs => "palette_js",
            Slot::GraphJson => "graph_json",
        }
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Stylesheet => SlotKind::Style,
            Slot::NetworkJs | Slot::PaletteJs => SlotKind::Script,
            Slot::GraphJson => SlotKind::JsonData,
        }
    }

    fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Slot(Slot),
}

/// A parsed, validated page template
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
    literal_len: usize,
}

impl Template {
    /// Parse template text, checking that each slot appears exactly once.
    ///
    /// `{{ name }}` with a name that is not a slot is an error, as is a `{{`
    /// followed by a name and no closing `}}`.
    pub fn parse(text: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut seen: Vec<Slot> = Vec::with_capacity(Slot::ALL.len());
        let mut literal_len = 0;
        let mut text_start = 0;
        let mut search = 0;

        while let Some(found) = text[search..].find("{{") {
            let open = search + found;
            let Some((name, end)) = placeholder_at(text, open)? else {
                search = open + 1;
                continue;
            };

            let slot = Slot::from_name(name).ok_or_else(|| {
                VizError::Template(format!("unknown placeholder `{{{{ {} }}}}`", name))
            })?;
            if seen.contains(&slot) {
                return Err(VizError::Template(format!(
                    "placeholder `{}` appears more than once",
                    slot
                )));
            }
            seen.push(slot);

            if open > text_start {
                literal_len += open - text_start;
                segments.push(Segment::Text(text[text_start..open].to_string()));
            }
            segments.push(Segment::Slot(slot));

            text_start = end;
            search = end;
        }

        if text_start < text.len() {
            literal_len += text.len() - text_start;
            segments.push(Segment::Text(text[text_start..].to_string()));
        }

        let missing: Vec<_> = Slot::ALL
            .iter()
            .filter(|s| !seen.contains(*s))
            .map(|s| s.name())
            .collect();
        if !missing.is_empty() {
            return Err(VizError::Template(format!(
                "missing placeholder(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Template {
            segments,
            literal_len,
        })
    }

    /// The bundled template, parsed once per process
    pub fn bundled() -> Result<&'static Template> {
        BUNDLED.get_or_try_init(|| Template::parse(BUNDLED_TEMPLATE))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Bytes of literal template text, excluding placeholders
    pub fn literal_len(&self) -> usize {
        self.literal_len
    }
}

/// Name and end offset of the placeholder opening at `open`, if any
fn placeholder_at(text: &str, open: usize) -> Result<Option<(&str, usize)>> {
    let inner = &text[open + 2..];
    match inner.find("}}") {
        Some(close) => {
            let name = inner[..close].trim();
            Ok(is_name(name).then_some((name, open + 2 + close + 2)))
        }
        None if is_name(inner.trim()) => Err(VizError::Template(format!(
            "unterminated placeholder at byte {}",
            open
        ))),
        None => Ok(None),
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "<style>{{stylesheet}}</style><script>{{ network_js }}</script>\
<script>{{  palette_js  }}</script><script>var g = {{ graph_json }};</script>";

    #[test]
    fn test_parse_minimal() {
        let template = Template::parse(MINIMAL).unwrap();
        let slots: Vec<_> = template
            .segments()
            .iter()
            .filter_map(|s| match s {
                Segment::Slot(slot) => Some(*slot),
                Segment::Text(_) => None,
            })
            .collect();
        assert_eq!(slots, Slot::ALL.to_vec());
        assert_eq!(template.segments()[0], Segment::Text("<style>".to_string()));
    }

    #[test]
    fn test_literal_len() {
        let template = Template::parse(MINIMAL).unwrap();
        let text: usize = template
            .segments()
            .iter()
            .map(|s| match s {
                Segment::Text(t) => t.len(),
                Segment::Slot(_) => 0,
            })
            .sum();
        assert_eq!(template.literal_len(), text);
    }

    #[test]
    fn test_missing_slot() {
        let text = MINIMAL.replace("{{ graph_json }}", "null");
        let err = Template::parse(&text).unwrap_err();
        assert!(matches!(err, VizError::Template(_)));
        assert!(err.to_string().contains("graph_json"));
    }

    #[test]
    fn test_duplicate_slot() {
        let text = format!("{}{{{{ stylesheet }}}}", MINIMAL);
        let err = Template::parse(&text).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_unknown_slot() {
        let text = format!("{}{{{{ title }}}}", MINIMAL);
        let err = Template::parse(&text).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_unterminated_slot() {
        let text = format!("{}{{{{ graph", MINIMAL);
        let err = Template::parse(&text).unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_literal_braces_are_text() {
        let text = MINIMAL.replace(
            "var g = {{ graph_json }};",
            "var o = {a: {b: 1}}; var g = {{ graph_json }}; if (x) {{y();}}",
        );
        let template = Template::parse(&text).unwrap();
        let texts: Vec<_> = template
            .segments()
            .iter()
            .filter_map(|s| match s {
                Segment::Text(t) => Some(t.as_str()),
                Segment::Slot(_) => None,
            })
            .collect();
        assert_eq!(
            texts[3],
            "</script><script>var o = {a: {b: 1}}; var g = "
        );
        assert_eq!(texts[4], "; if (x) {{y();}}</script>");
    }

    #[test]
    fn test_brace_run_before_slot() {
        let text = MINIMAL.replace("{{stylesheet}}", "{{{stylesheet}}}");
        let template = Template::parse(&text).unwrap();
        assert_eq!(template.segments()[0], Segment::Text("<style>{".to_string()));
        assert_eq!(template.segments()[1], Segment::Slot(Slot::Stylesheet));
        assert_eq!(template.segments()[2], Segment::Text("}</style><script>".to_string()));
    }

    #[test]
    fn test_bundled_parses_once() {
        let a = Template::bundled().unwrap();
        let b = Template::bundled().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.literal_len() > 0);
    }

    #[test]
    fn test_slot_kinds() {
        assert_eq!(Slot::Stylesheet.kind(), SlotKind::Style);
        assert_eq!(Slot::NetworkJs.kind(), SlotKind::Script);
        assert_eq!(Slot::PaletteJs.kind(), SlotKind::Script);
        assert_eq!(Slot::GraphJson.kind(), SlotKind::JsonData);
    }
}
