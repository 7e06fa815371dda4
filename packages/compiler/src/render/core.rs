//! Core renderer
//!
//! Handles structural nodes: a document renders as its children in order.

use crate::ast::Node;
use crate::error::Result;

use super::{Emitter, RenderContext, Renderer};

pub struct CoreRenderer;

impl Renderer for CoreRenderer {
    fn name(&self) -> &'static str {
        "core"
    }

    fn matches(&self, node: &Node) -> bool {
        matches!(node, Node::Document(_))
    }

    fn render(&self, node: &Node, rc: &RenderContext, em: &mut Emitter) -> Result<()> {
        if let Node::Document(document) = node {
            rc.render_children(&document.children, em)?;
        }
        Ok(())
    }
}
