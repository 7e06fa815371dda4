//! Import resolution
//!
//! Replaces every `{import ...}` marker with the referenced template,
//! fully compiled through the builder so the splice already has its own
//! imports and extends resolved. A single import splices the imported
//! template's nodes directly at the marker; a bundle import (`{import
//! ns/*}`) wraps each template the loader lists under the namespace in a
//! tag named by its file stem. Every spliced node's provenance chain gains
//! the import site as its new outermost link, which is what lets the source
//! map trace through the edge. Cycles fail fast at the importing site.

use crate::ast::{reroot, Node, Provenance, Tag};
use crate::builder::{Builder, Session};
use crate::error::{CompileError, Result};
use crate::traverse::{traverse_nodes, VisitAction, Visitor, VisitorContext};

pub struct ResolveImports<'a> {
    pub builder: &'a Builder,
    pub session: &'a mut Session,
}

impl<'a> Visitor for ResolveImports<'a> {
    fn enter(&mut self, node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        let block = match node {
            Node::DynamicBlock(block) if block.name == "import" => block,
            _ => return Ok(VisitAction::Keep),
        };

        let site = block.provenance.clone();
        let target = block.args.trim().to_string();
        if target.is_empty() {
            return Err(CompileError::Syntax {
                path: site.path.clone(),
                line: site.line,
                message: "import requires a template name".to_string(),
            });
        }

        if let Some(namespace) = target.strip_suffix("/*") {
            let names = self.builder.loader().list(namespace);
            let mut tags = Vec::with_capacity(names.len());
            for name in names {
                let children = self.splice_target(&name, &site)?;
                let stem = name.rsplit('/').next().unwrap_or(&name).to_string();
                tags.push(Node::Tag(Tag {
                    name: stem,
                    attrs: Vec::new(),
                    children,
                    void: false,
                    provenance: site.clone(),
                }));
            }
            return Ok(VisitAction::ReplaceMany(tags));
        }

        let children = self.splice_target(&target, &site)?;
        Ok(VisitAction::ReplaceMany(children))
    }
}

impl<'a> ResolveImports<'a> {
    /// Compiles the target template and re-roots its nodes onto the import
    /// site.
    fn splice_target(&mut self, name: &str, site: &Provenance) -> Result<Vec<Node>> {
        if self.session.is_in_progress(name) {
            return Err(CompileError::Import {
                path: site.path.clone(),
                line: site.line,
                template: name.to_string(),
                message: "cyclic import".to_string(),
                cause: None,
            });
        }

        let unit = self
            .builder
            .compile_unit(name, self.session)
            .map_err(|inner| CompileError::Import {
                path: site.path.clone(),
                line: site.line,
                template: name.to_string(),
                message: "imported template failed to compile".to_string(),
                cause: Some(Box::new(inner)),
            })?;

        let mut children = match unit.doc {
            Node::Document(document) => document.children,
            other => vec![other],
        };
        // Imported content is final: nothing can override its blocks after
        // the splice, so the shells unwrap to their bodies here. Only the
        // extends path keeps shells around as override points.
        traverse_nodes(&mut children, &mut [&mut UnwrapBlocks], site)?;
        for child in &mut children {
            reroot(child, site);
        }
        Ok(children)
    }
}

struct UnwrapBlocks;

impl Visitor for UnwrapBlocks {
    fn enter(&mut self, node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        if let Node::DynamicBlock(block) = node {
            if block.name == "block" {
                return Ok(VisitAction::Replace(Node::fragment(
                    block.body.clone(),
                    block.provenance.clone(),
                )));
            }
        }
        Ok(VisitAction::Keep)
    }
}
