//! Annotation passes
//!
//! `DefineAttributes` indexes each tag's attributes by name and rejects
//! duplicates; `DefineBlocks` indexes named block definitions and rejects a
//! second definition of the same name within one template. Neither pass
//! alters tree shape.

use indexmap::IndexMap;

use crate::ast::{DynamicBlock, Node, Provenance};
use crate::directive::block_name;
use crate::error::{CompileError, Result};
use crate::traverse::{VisitAction, Visitor, VisitorContext};

/// Attribute index for one tag occurrence.
#[derive(Debug, Clone)]
pub struct TagAttrIndex {
    pub tag: String,
    pub provenance: Provenance,
    /// Attribute name to its position in the tag's attribute list.
    pub attrs: IndexMap<String, usize>,
}

#[derive(Default)]
pub struct DefineAttributes {
    pub indexes: Vec<TagAttrIndex>,
}

impl Visitor for DefineAttributes {
    fn enter(&mut self, node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        if let Node::Tag(tag) = node {
            let mut attrs = IndexMap::new();
            for (position, attr) in tag.attrs.iter().enumerate() {
                if attrs.insert(attr.name.clone(), position).is_some() {
                    return Err(CompileError::Syntax {
                        path: attr.provenance.path.clone(),
                        line: attr.provenance.line,
                        message: format!(
                            "duplicate attribute \"{}\" on <{}>",
                            attr.name, tag.name
                        ),
                    });
                }
            }
            self.indexes.push(TagAttrIndex {
                tag: tag.name.clone(),
                provenance: tag.provenance.clone(),
                attrs,
            });
        }
        Ok(VisitAction::Keep)
    }
}

#[derive(Default)]
pub struct DefineBlocks {
    /// Block name to its defining subtree, in definition order.
    pub blocks: IndexMap<String, DynamicBlock>,
}

impl Visitor for DefineBlocks {
    fn enter(&mut self, node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        if let Node::DynamicBlock(block) = node {
            if block.name == "block" {
                let name = match block_name(block) {
                    Some(name) => name.to_string(),
                    None => {
                        return Err(CompileError::Syntax {
                            path: block.provenance.path.clone(),
                            line: block.provenance.line,
                            message: "block directive requires a name".to_string(),
                        });
                    }
                };
                if self.blocks.contains_key(&name) {
                    return Err(CompileError::Syntax {
                        path: block.provenance.path.clone(),
                        line: block.provenance.line,
                        message: format!("duplicate block \"{}\"", name),
                    });
                }
                self.blocks.insert(name, block.clone());
            }
        }
        Ok(VisitAction::Keep)
    }
}
