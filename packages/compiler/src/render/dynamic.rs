//! Dynamic renderer
//!
//! Only reached when a dynamic block survived to render, i.e. the finalize
//! pass was not run for that node class. Instead of failing, the block is
//! lowered through its directive on the spot and the result rendered; only
//! an unknown directive name is an error.

use crate::ast::Node;
use crate::error::{CompileError, Result};

use super::{Emitter, RenderContext, Renderer};

pub struct DynamicRenderer;

impl Renderer for DynamicRenderer {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn matches(&self, node: &Node) -> bool {
        matches!(node, Node::DynamicBlock(_))
    }

    fn render(&self, node: &Node, rc: &RenderContext, em: &mut Emitter) -> Result<()> {
        if let Node::DynamicBlock(block) = node {
            let handler = rc.directives.get(&block.name).ok_or_else(|| {
                CompileError::Directive {
                    path: block.provenance.path.clone(),
                    line: block.provenance.line,
                    name: block.name.clone(),
                    message: "unknown directive".to_string(),
                }
            })?;
            let lowered = handler.lower(block)?;
            rc.render_node(&lowered, em)?;
        }
        Ok(())
    }
}
