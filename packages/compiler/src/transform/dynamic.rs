//! Directive lowering (finalize stage)
//!
//! Runs after import and extends merging so directives from all composed
//! sources are present. Each `DynamicBlock` is lowered through the
//! directive registry; lowering runs pre-order so a handler sees its body
//! before nested directives are rewritten (the `if` handler consumes its
//! `{else}` marker this way). An unknown directive name fails at the
//! block's provenance.

use crate::ast::Node;
use crate::directive::DirectiveRegistry;
use crate::error::{CompileError, Result};
use crate::traverse::{VisitAction, Visitor, VisitorContext};

pub struct DynamicToPhp<'a> {
    pub directives: &'a DirectiveRegistry,
}

impl<'a> Visitor for DynamicToPhp<'a> {
    fn enter(&mut self, node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        let block = match node {
            Node::DynamicBlock(block) => block,
            _ => return Ok(VisitAction::Keep),
        };

        match self.directives.get(&block.name) {
            Some(handler) => Ok(VisitAction::Replace(handler.lower(block)?)),
            None => {
                let message = if block.name == "extends" {
                    "extends declaration must appear at the top level of a template"
                } else {
                    "unknown directive"
                };
                Err(CompileError::Directive {
                    path: block.provenance.path.clone(),
                    line: block.provenance.line,
                    name: block.name.clone(),
                    message: message.to_string(),
                })
            }
        }
    }
}
