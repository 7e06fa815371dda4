//! PHP renderer
//!
//! Emits PHP blocks verbatim inside `<?php ... ?>` delimiters. Multi-line
//! code keeps its own line structure; each emitted line is recorded against
//! the block's provenance with the innermost line advancing.

use crate::ast::Node;
use crate::error::Result;

use super::{Emitter, RenderContext, Renderer};

pub struct PhpRenderer;

impl Renderer for PhpRenderer {
    fn name(&self) -> &'static str {
        "php"
    }

    fn matches(&self, node: &Node) -> bool {
        matches!(node, Node::PhpBlock(_))
    }

    fn render(&self, node: &Node, _rc: &RenderContext, em: &mut Emitter) -> Result<()> {
        if let Node::PhpBlock(block) = node {
            em.emit(&format!("<?php {} ?>", block.code), &block.provenance);
        }
        Ok(())
    }
}
