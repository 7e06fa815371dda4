//! Directives
//!
//! A directive is a named dynamic construct lowered to plain PHP at
//! finalize time. The registry maps directive names to handlers; it is
//! populated at builder construction and read-only during compilation.
//! Built-ins cover the loop (`foreach`), the conditional (`if` with an
//! optional `{else}` marker) and the inheritance `block`.

use indexmap::IndexMap;

use crate::ast::{DynamicBlock, Node, PhpBlock};
use crate::error::{CompileError, Result};

pub trait Directive: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lowers the block to plain nodes, typically a fragment of PHP blocks
    /// wrapping the original body.
    fn lower(&self, block: &DynamicBlock) -> Result<Node>;
}

#[derive(Default)]
pub struct DirectiveRegistry {
    handlers: IndexMap<String, Box<dyn Directive>>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        DirectiveRegistry {
            handlers: IndexMap::new(),
        }
    }

    /// The built-in directive set.
    pub fn default_set() -> Self {
        let mut registry = DirectiveRegistry::new();
        registry.register(Box::new(ForeachDirective));
        registry.register(Box::new(IfDirective));
        registry.register(Box::new(ElseDirective));
        registry.register(Box::new(BlockDirective));
        registry
    }

    pub fn register(&mut self, directive: Box<dyn Directive>) -> &mut Self {
        self.handlers.insert(directive.name().to_string(), directive);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Directive> {
        self.handlers.get(name).map(Box::as_ref)
    }
}

fn directive_error(block: &DynamicBlock, message: impl Into<String>) -> CompileError {
    CompileError::Directive {
        path: block.provenance.path.clone(),
        line: block.provenance.line,
        name: block.name.clone(),
        message: message.into(),
    }
}

fn php(code: String, block: &DynamicBlock) -> Node {
    Node::PhpBlock(PhpBlock {
        code,
        provenance: block.provenance.clone(),
    })
}

/// `{foreach $items as $item} ... {/foreach}`
pub struct ForeachDirective;

impl Directive for ForeachDirective {
    fn name(&self) -> &'static str {
        "foreach"
    }

    fn lower(&self, block: &DynamicBlock) -> Result<Node> {
        if !block.args.contains(" as ") {
            return Err(directive_error(
                block,
                "expected arguments of the form \"<expr> as <var>\"",
            ));
        }
        let mut children = vec![php(format!("foreach ({}) {{", block.args), block)];
        children.extend(block.body.iter().cloned());
        children.push(php("}".to_string(), block));
        Ok(Node::fragment(children, block.provenance.clone()))
    }
}

/// `{if $cond} ... {else} ... {/if}`
pub struct IfDirective;

impl Directive for IfDirective {
    fn name(&self) -> &'static str {
        "if"
    }

    fn lower(&self, block: &DynamicBlock) -> Result<Node> {
        if block.args.is_empty() {
            return Err(directive_error(block, "expected a condition"));
        }

        let else_position = block.body.iter().position(|node| {
            matches!(node, Node::DynamicBlock(inner) if inner.name == "else")
        });

        let mut children = vec![php(format!("if ({}) {{", block.args), block)];
        match else_position {
            Some(position) => {
                children.extend(block.body[..position].iter().cloned());
                children.push(php("} else {".to_string(), block));
                children.extend(block.body[position + 1..].iter().cloned());
            }
            None => children.extend(block.body.iter().cloned()),
        }
        children.push(php("}".to_string(), block));
        Ok(Node::fragment(children, block.provenance.clone()))
    }
}

/// The `{else}` marker. It is consumed by the enclosing `if`; reaching one
/// standalone means it sits outside any conditional.
pub struct ElseDirective;

impl Directive for ElseDirective {
    fn name(&self) -> &'static str {
        "else"
    }

    fn lower(&self, block: &DynamicBlock) -> Result<Node> {
        Err(directive_error(block, "\"else\" outside of an if block"))
    }
}

/// `{block name} ... {/block}`. After inheritance merging the block shell
/// is transparent: its body renders in place.
pub struct BlockDirective;

impl Directive for BlockDirective {
    fn name(&self) -> &'static str {
        "block"
    }

    fn lower(&self, block: &DynamicBlock) -> Result<Node> {
        if block_name(block).is_none() {
            return Err(directive_error(block, "expected a block name"));
        }
        Ok(Node::fragment(
            block.body.clone(),
            block.provenance.clone(),
        ))
    }
}

/// First word of a block directive's arguments, i.e. the block name.
pub fn block_name(block: &DynamicBlock) -> Option<&str> {
    block.args.split_whitespace().next()
}
