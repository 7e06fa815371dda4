//! Rendering
//!
//! Serializes the final AST into PHP source text. Renderers are tried in
//! registration order and the first match wins. As text is emitted the
//! emitter tracks the current output line and reports each line's
//! provenance stack to the source map.

pub mod core;
pub mod dynamic;
pub mod html;
pub mod php;

use crate::ast::{Node, Provenance};
use crate::builder::CompileOptions;
use crate::directive::DirectiveRegistry;
use crate::error::{CompileError, Result};
use crate::source_map::{MapFrame, SourceMap};

pub use self::core::CoreRenderer;
pub use self::dynamic::DynamicRenderer;
pub use self::html::HtmlRenderer;
pub use self::php::PhpRenderer;

pub trait Renderer: Send + Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, node: &Node) -> bool;

    fn render(&self, node: &Node, rc: &RenderContext, em: &mut Emitter) -> Result<()>;
}

/// Read-only state shared by all renderers during one render.
pub struct RenderContext<'a> {
    pub renderers: &'a [Box<dyn Renderer>],
    pub directives: &'a DirectiveRegistry,
    pub options: &'a CompileOptions,
}

impl<'a> RenderContext<'a> {
    /// Dispatches to the first renderer claiming the node.
    pub fn render_node(&self, node: &Node, em: &mut Emitter) -> Result<()> {
        for renderer in self.renderers {
            if renderer.matches(node) {
                return renderer.render(node, self, em);
            }
        }
        Err(CompileError::Syntax {
            path: node.provenance().path.clone(),
            line: node.provenance().line,
            message: "no renderer registered for this node".to_string(),
        })
    }

    pub fn render_children(&self, nodes: &[Node], em: &mut Emitter) -> Result<()> {
        for node in nodes {
            self.render_node(node, em)?;
        }
        Ok(())
    }
}

/// The documented default renderer order: core, HTML, PHP, dynamic.
pub fn default_renderers() -> Vec<Box<dyn Renderer>> {
    vec![
        Box::new(CoreRenderer),
        Box::new(HtmlRenderer),
        Box::new(PhpRenderer),
        Box::new(DynamicRenderer),
    ]
}

/// Accumulates output text and line provenance. Output lines are 1-based;
/// the first node to write on a line owns its source map entry.
pub struct Emitter {
    out: String,
    line: u32,
    map: SourceMap,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            out: String::new(),
            line: 1,
            map: SourceMap::new(),
        }
    }

    /// Emits text for a node. When the text spans several output lines the
    /// innermost provenance line advances with it; outer frames (the
    /// import/extends use sites) stay fixed.
    pub fn emit(&mut self, text: &str, provenance: &Provenance) {
        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                self.out.push('\n');
                self.line += 1;
            }
            if !segment.is_empty() {
                self.record(provenance, index as u32);
                self.out.push_str(segment);
            }
        }
    }

    fn record(&mut self, provenance: &Provenance, line_delta: u32) {
        let mut frames = Vec::new();
        let mut current = Some(provenance);
        let mut innermost = true;
        while let Some(frame) = current {
            let line = if innermost {
                frame.line + line_delta
            } else {
                frame.line
            };
            frames.push(MapFrame::new(frame.path.clone(), line));
            innermost = false;
            current = frame.parent.as_deref();
        }
        self.map.record(self.line, frames);
    }

    pub fn finish(self) -> (String, SourceMap) {
        (self.out, self.map)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
