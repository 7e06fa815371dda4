//! AST traversal
//!
//! Depth-first walk with a pre-order `enter` and post-order `leave` call
//! per visitor, per node, in visitor registration order. A visitor may keep
//! the node, replace it (and its subtree), splice several nodes in its
//! place, or remove it; mutations take effect immediately, so later
//! visitors in the same pass see the updated tree. Traversal has no
//! implicit cycle protection: a visitor must not introduce a node as its
//! own descendant.

use crate::ast::{Node, NodeKind, Provenance};
use crate::error::Result;

/// What a visitor wants done with the current node.
pub enum VisitAction {
    Keep,
    /// Substitute the node and its subtree. On `enter` the replacement's
    /// children are still traversed; on `leave` they are not.
    Replace(Node),
    /// Splice several nodes in place of the current one. The spliced nodes
    /// are not re-traversed by this pass.
    ReplaceMany(Vec<Node>),
    /// Delete the node and all its descendants.
    Remove,
}

/// Cheap description of an ancestor, exposed to visitors instead of a live
/// reference so the tree stays exclusively owned during mutation.
#[derive(Debug, Clone)]
pub struct NodeSummary {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub provenance: Provenance,
}

impl NodeSummary {
    fn of(node: &Node) -> Self {
        NodeSummary {
            kind: node.kind(),
            name: node.name().map(str::to_string),
            provenance: node.provenance().clone(),
        }
    }
}

/// Transient per-call context; valid only for the duration of one visitor
/// call.
pub struct VisitorContext<'a> {
    /// Ancestor chain, root first, immediate parent last.
    pub ancestors: &'a [NodeSummary],
    /// Provenance of the traversal root.
    pub root: &'a Provenance,
}

impl<'a> VisitorContext<'a> {
    pub fn parent(&self) -> Option<&NodeSummary> {
        self.ancestors.last()
    }
}

pub trait Visitor {
    fn enter(&mut self, _node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        Ok(VisitAction::Keep)
    }

    fn leave(&mut self, _node: &mut Node, _ctx: &VisitorContext) -> Result<VisitAction> {
        Ok(VisitAction::Keep)
    }
}

/// Traverses the root's subtree (the root node itself is context, not a
/// visited node).
pub fn traverse(root: &mut Node, visitors: &mut [&mut dyn Visitor]) -> Result<()> {
    let root_provenance = root.provenance().clone();
    let mut ancestors = vec![NodeSummary::of(root)];
    if let Some(children) = root.children_mut() {
        walk(children, visitors, &mut ancestors, &root_provenance)?;
    }
    Ok(())
}

/// Traverses a loose node list, e.g. when overlaying a subtree that has no
/// single root.
pub fn traverse_nodes(
    nodes: &mut Vec<Node>,
    visitors: &mut [&mut dyn Visitor],
    root: &Provenance,
) -> Result<()> {
    let mut ancestors = Vec::new();
    walk(nodes, visitors, &mut ancestors, root)
}

enum Outcome {
    Advance,
    /// The node at the current index was removed or spliced; the index has
    /// already been adjusted.
    Restart(usize),
}

fn apply_chain(
    nodes: &mut Vec<Node>,
    index: usize,
    visitors: &mut [&mut dyn Visitor],
    ancestors: &[NodeSummary],
    root: &Provenance,
    entering: bool,
) -> Result<Outcome> {
    for visitor in visitors.iter_mut() {
        let ctx = VisitorContext { ancestors, root };
        let action = if entering {
            visitor.enter(&mut nodes[index], &ctx)?
        } else {
            visitor.leave(&mut nodes[index], &ctx)?
        };
        match action {
            VisitAction::Keep => {}
            VisitAction::Replace(new_node) => {
                nodes[index] = new_node;
            }
            VisitAction::ReplaceMany(list) => {
                let count = list.len();
                nodes.splice(index..=index, list);
                return Ok(Outcome::Restart(index + count));
            }
            VisitAction::Remove => {
                nodes.remove(index);
                return Ok(Outcome::Restart(index));
            }
        }
    }
    Ok(Outcome::Advance)
}

fn walk(
    nodes: &mut Vec<Node>,
    visitors: &mut [&mut dyn Visitor],
    ancestors: &mut Vec<NodeSummary>,
    root: &Provenance,
) -> Result<()> {
    let mut index = 0;
    while index < nodes.len() {
        match apply_chain(nodes, index, visitors, ancestors, root, true)? {
            Outcome::Restart(next) => {
                index = next;
                continue;
            }
            Outcome::Advance => {}
        }

        ancestors.push(NodeSummary::of(&nodes[index]));
        if let Some(children) = nodes[index].children_mut() {
            walk(children, visitors, ancestors, root)?;
        }
        ancestors.pop();

        match apply_chain(nodes, index, visitors, ancestors, root, false)? {
            Outcome::Restart(next) => {
                index = next;
                continue;
            }
            Outcome::Advance => {}
        }

        index += 1;
    }
    Ok(())
}
