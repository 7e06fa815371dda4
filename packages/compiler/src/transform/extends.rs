//! Template inheritance
//!
//! When a template declares `{extends parent}`, the parent is compiled
//! through the builder (so chains of extends resolve depth-first), the
//! child's block definitions are overlaid onto the parent's block nodes,
//! and the merged tree replaces the child's. Parent structure outside of
//! blocks is untouched; child content outside of blocks is dropped. Every
//! parent-originated node gains the extends site as its outermost
//! provenance link; overlaid child bodies keep their own chains.

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::ast::{reroot, Document, DynamicBlock, Node};
use crate::builder::{Builder, Session};
use crate::directive::block_name;
use crate::error::{CompileError, Result};
use crate::traverse::{traverse_nodes, VisitAction, Visitor, VisitorContext};

/// Applies the template's `{extends ...}` declaration, if any.
pub fn resolve_extends(
    doc: &mut Document,
    builder: &Builder,
    session: &mut Session,
    child_blocks: &IndexMap<String, DynamicBlock>,
) -> Result<()> {
    let marker = match find_extends_marker(doc)? {
        Some(marker) => marker,
        None => return Ok(()),
    };

    let parent_name = marker.args.trim().to_string();
    let site = marker.provenance.clone();
    if parent_name.is_empty() {
        return Err(CompileError::Extends {
            path: site.path,
            line: site.line,
            parent: String::new(),
            message: "extends requires a template name".to_string(),
            cause: None,
        });
    }

    if session.is_in_progress(&parent_name) {
        return Err(CompileError::Extends {
            path: site.path,
            line: site.line,
            parent: parent_name,
            message: "cyclic inheritance".to_string(),
            cause: None,
        });
    }

    let unit = builder
        .compile_unit(&parent_name, session)
        .map_err(|inner| CompileError::Extends {
            path: site.path.clone(),
            line: site.line,
            parent: parent_name.clone(),
            message: "parent template failed to compile".to_string(),
            cause: Some(Box::new(inner)),
        })?;

    let mut parent_children = match unit.doc {
        Node::Document(document) => document.children,
        other => vec![other],
    };
    for child in &mut parent_children {
        reroot(child, &site);
    }

    let mut overlay = OverlayBlocks {
        overrides: child_blocks,
        matched: HashSet::new(),
    };
    traverse_nodes(&mut parent_children, &mut [&mut overlay], &site)?;

    for (name, block) in child_blocks {
        if !overlay.matched.contains(name.as_str()) {
            return Err(CompileError::Extends {
                path: block.provenance.path.clone(),
                line: block.provenance.line,
                parent: parent_name,
                message: format!("block \"{}\" is not defined by the parent template", name),
                cause: None,
            });
        }
    }

    doc.children = parent_children;
    Ok(())
}

/// Finds the `{extends ...}` marker among the root children; more than one
/// declaration is an error.
fn find_extends_marker(doc: &Document) -> Result<Option<DynamicBlock>> {
    let mut found: Option<DynamicBlock> = None;
    for child in &doc.children {
        if let Node::DynamicBlock(block) = child {
            if block.name == "extends" {
                if let Some(first) = &found {
                    return Err(CompileError::Extends {
                        path: block.provenance.path.clone(),
                        line: block.provenance.line,
                        parent: block.args.trim().to_string(),
                        message: format!(
                            "multiple extends declarations (first on line {})",
                            first.provenance.line
                        ),
                        cause: None,
                    });
                }
                found = Some(block.clone());
            }
        }
    }
    Ok(found)
}

/// Swaps overridden block bodies into the parent tree.
struct OverlayBlocks<'a> {
    overrides: &'a IndexMap<String, DynamicBlock>,
    matched: HashSet<String>,
}

impl<'a> Visitor for OverlayBlocks<'a> {
    fn enter(&mut self, node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        if let Node::DynamicBlock(block) = node {
            if block.name == "block" {
                if let Some(name) = block_name(block).map(str::to_string) {
                    if let Some(definition) = self.overrides.get(&name) {
                        block.body = definition.body.clone();
                        self.matched.insert(name);
                        // Splice the overlaid node so the walk does not
                        // descend into it; the child body is final content.
                        return Ok(VisitAction::ReplaceMany(vec![Node::DynamicBlock(
                            block.clone(),
                        )]));
                    }
                }
            }
        }
        Ok(VisitAction::Keep)
    }
}
