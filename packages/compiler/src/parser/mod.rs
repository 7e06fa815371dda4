//! Syntax-directed parsing
//!
//! The parser composes the registered grammars: at every buffer position it
//! asks each grammar, in registration order, whether it matches, then
//! delegates to the matching grammar's `Syntax` handler to build nodes. A
//! handler may recursively re-enter the parser for nested content (tag
//! children, directive bodies) using the same shared buffer, so offsets
//! stay globally consistent. A position no grammar claims is a fatal
//! syntax error.

pub mod dynamic;
pub mod html;
pub mod inline;
pub mod php;

use crate::ast::{Document, Node, Provenance};
use crate::error::Result;
use crate::lexer::buffer::Buffer;
use crate::lexer::dynamic::DynamicGrammar;
use crate::lexer::grammar::syntax_error;
use crate::lexer::html::HtmlGrammar;
use crate::lexer::inline::InlineGrammar;
use crate::lexer::php::PhpGrammar;
use crate::lexer::stream::CharStream;
use crate::lexer::{CharBuffer, Grammar, Token};
use crate::source::Source;

pub use dynamic::{DynamicSyntax, VOID_DIRECTIVES};
pub use html::HtmlSyntax;
pub use inline::InlineSyntax;
pub use php::PhpSyntax;

/// Builds AST nodes from one grammar's tokens.
pub trait Syntax: Send + Sync {
    fn build(&self, parser: &Parser, cx: &mut ParseCx, tokens: Vec<Token>) -> Result<Vec<Node>>;
}

/// Ordered grammar/syntax registrations. The order is load-bearing: the
/// first grammar to claim a position wins, so it is an explicit
/// configuration value rather than an accident of construction.
#[derive(Default)]
pub struct GrammarSet {
    pairs: Vec<(Box<dyn Grammar>, Box<dyn Syntax>)>,
}

impl GrammarSet {
    pub fn new() -> Self {
        GrammarSet { pairs: Vec::new() }
    }

    pub fn register(
        &mut self,
        grammar: Box<dyn Grammar>,
        syntax: Box<dyn Syntax>,
    ) -> &mut Self {
        self.pairs.push((grammar, syntax));
        self
    }

    /// The documented default order: HTML, Dynamic, Inline, PHP.
    pub fn default_set() -> Self {
        let mut set = GrammarSet::new();
        set.register(Box::new(HtmlGrammar), Box::new(HtmlSyntax));
        set.register(Box::new(DynamicGrammar), Box::new(DynamicSyntax));
        set.register(Box::new(InlineGrammar), Box::new(InlineSyntax));
        set.register(Box::new(PhpGrammar), Box::new(PhpSyntax));
        set
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Per-parse state shared between the parser and the syntax handlers.
pub struct ParseCx<'s> {
    pub buffer: CharBuffer<'s>,
    pub source: &'s Source,
}

impl<'s> ParseCx<'s> {
    pub fn new(source: &'s Source) -> Self {
        ParseCx {
            buffer: Buffer::new(CharStream::new(&source.content)),
            source,
        }
    }

    /// Provenance for a node whose construct starts at the given offset.
    pub fn provenance(&self, offset: usize) -> Provenance {
        Provenance::new(self.source.path.clone(), self.source.line_at(offset))
    }
}

/// Whether the buffer sits at a potential close of an enclosing construct
/// (`</...>` or `{/...}`). Nested parse loops stop here and hand control
/// back to whichever handler opened the construct.
pub fn at_close_boundary(buf: &mut CharBuffer) -> bool {
    buf.starts_with("</") || buf.starts_with("{/")
}

pub struct Parser<'g> {
    set: &'g GrammarSet,
}

impl<'g> Parser<'g> {
    pub fn new(set: &'g GrammarSet) -> Self {
        Parser { set }
    }

    /// Parses a whole source into a `Document` root.
    pub fn parse(&self, source: &Source) -> Result<Node> {
        let mut cx = ParseCx::new(source);
        let children = self.parse_nodes(&mut cx, true)?;
        Ok(Node::Document(Document {
            children,
            provenance: Provenance::new(source.path.clone(), 1),
        }))
    }

    /// Parses nodes until end of input or, below the top level, until a
    /// close boundary the enclosing handler will consume.
    pub fn parse_nodes(&self, cx: &mut ParseCx, top_level: bool) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            if cx.buffer.is_eoi() {
                break;
            }
            if !top_level && at_close_boundary(&mut cx.buffer) {
                break;
            }

            let mut claimed = false;
            for (grammar, syntax) in &self.set.pairs {
                if grammar.matches(&mut cx.buffer) {
                    let tokens = grammar.tokenize(&mut cx.buffer, cx.source)?;
                    let built = syntax.build(self, cx, tokens)?;
                    nodes.extend(built);
                    claimed = true;
                    break;
                }
            }

            if !claimed {
                let offset = cx.buffer.peek_offset();
                return Err(syntax_error(
                    cx.source,
                    offset,
                    "no grammar matches at this position",
                ));
            }
        }
        Ok(nodes)
    }
}
