//! Template AST
//!
//! Node definitions for parsed templates. Every node owns a `Provenance`
//! chain recording which template file and line produced it; the chain grows
//! one outer link each time the node is spliced across an import or extends
//! boundary, which is what lets the source map report the full
//! "included from / extended from" stack per compiled line.

use serde::{Deserialize, Serialize};

/// Where a node came from. `parent` is the use site of the import or
/// extends edge the node most recently crossed, outermost last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub path: String,
    pub line: u32,
    pub parent: Option<Box<Provenance>>,
}

impl Provenance {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Provenance {
            path: path.into(),
            line,
            parent: None,
        }
    }

    /// Appends a use site as the new outermost link of the chain.
    pub fn push_outer(&mut self, site: &Provenance) {
        match &mut self.parent {
            Some(parent) => parent.push_outer(site),
            None => {
                self.parent = Some(Box::new(Provenance {
                    path: site.path.clone(),
                    line: site.line,
                    parent: None,
                }))
            }
        }
    }

    /// The chain as (path, line) pairs, innermost first.
    pub fn stack(&self) -> Vec<(&str, u32)> {
        let mut frames = Vec::new();
        let mut current = Some(self);
        while let Some(prov) = current {
            frames.push((prov.path.as_str(), prov.line));
            current = prov.parent.as_deref();
        }
        frames
    }
}

/// Node kind discriminant, used for ancestor summaries and renderer
/// dispatch checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    Tag,
    Attr,
    Raw,
    PhpBlock,
    DynamicBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Node>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
    /// Void tags render without a closing tag and may not hold children.
    pub void: bool,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attr {
    pub name: String,
    /// `None` for bare attributes such as `disabled`.
    pub value: Option<String>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raw {
    pub text: String,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhpBlock {
    pub code: String,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicBlock {
    pub name: String,
    pub args: String,
    pub body: Vec<Node>,
    pub provenance: Provenance,
}

/// Tagged node union. Children are exclusively owned by their parent, so
/// the tree invariant (single root, no cycles) holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Document(Document),
    Tag(Tag),
    Attr(Attr),
    Raw(Raw),
    PhpBlock(PhpBlock),
    DynamicBlock(DynamicBlock),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Tag(_) => NodeKind::Tag,
            Node::Attr(_) => NodeKind::Attr,
            Node::Raw(_) => NodeKind::Raw,
            Node::PhpBlock(_) => NodeKind::PhpBlock,
            Node::DynamicBlock(_) => NodeKind::DynamicBlock,
        }
    }

    /// Tag or directive name, when the node has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Tag(tag) => Some(&tag.name),
            Node::Attr(attr) => Some(&attr.name),
            Node::DynamicBlock(block) => Some(&block.name),
            Node::Document(_) | Node::Raw(_) | Node::PhpBlock(_) => None,
        }
    }

    pub fn provenance(&self) -> &Provenance {
        match self {
            Node::Document(n) => &n.provenance,
            Node::Tag(n) => &n.provenance,
            Node::Attr(n) => &n.provenance,
            Node::Raw(n) => &n.provenance,
            Node::PhpBlock(n) => &n.provenance,
            Node::DynamicBlock(n) => &n.provenance,
        }
    }

    pub fn provenance_mut(&mut self) -> &mut Provenance {
        match self {
            Node::Document(n) => &mut n.provenance,
            Node::Tag(n) => &mut n.provenance,
            Node::Attr(n) => &mut n.provenance,
            Node::Raw(n) => &mut n.provenance,
            Node::PhpBlock(n) => &mut n.provenance,
            Node::DynamicBlock(n) => &mut n.provenance,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(n) => &n.children,
            Node::Tag(n) => &n.children,
            Node::DynamicBlock(n) => &n.body,
            Node::Attr(_) | Node::Raw(_) | Node::PhpBlock(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document(n) => Some(&mut n.children),
            Node::Tag(n) => Some(&mut n.children),
            Node::DynamicBlock(n) => Some(&mut n.body),
            Node::Attr(_) | Node::Raw(_) | Node::PhpBlock(_) => None,
        }
    }

    /// Wraps loose nodes in a document fragment sharing the given
    /// provenance. Directive handlers use this for multi-node lowerings.
    pub fn fragment(children: Vec<Node>, provenance: Provenance) -> Node {
        Node::Document(Document {
            children,
            provenance,
        })
    }
}

/// Appends an import or extends use site to the provenance chain of every
/// node in the subtree, attributes included.
pub fn reroot(node: &mut Node, site: &Provenance) {
    node.provenance_mut().push_outer(site);
    if let Node::Tag(tag) = node {
        for attr in &mut tag.attrs {
            attr.provenance.push_outer(site);
        }
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            reroot(child, site);
        }
    }
}
