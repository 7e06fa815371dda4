//! Compile orchestration
//!
//! `Builder::compile(name)` wires loader, parser, transform passes and
//! renderers into one pipeline and returns the compiled result. All
//! configuration (grammar order, directive registry, renderer list,
//! options) is fixed at construction and read-only afterwards, so a builder
//! can be shared across threads; each `compile` call owns its own session
//! state (cycle stack, contributing path list), buffer, tree and source
//! map.

use serde::{Deserialize, Serialize};

use crate::ast::Node;
use crate::directive::{Directive, DirectiveRegistry};
use crate::error::Result;
use crate::loader::Loader;
use crate::parser::{GrammarSet, Parser};
use crate::render::{default_renderers, Emitter, RenderContext, Renderer};
use crate::source_map::SourceMap;
use crate::transform::{
    resolve_extends, DefineAttributes, DefineBlocks, DynamicToPhp, ResolveImports, TagAttrIndex,
};
use crate::traverse::traverse;

/// Rendering options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Collapse runs of horizontal whitespace in literal text.
    pub collapse_whitespace: bool,
}

/// The compiled template: runnable PHP text, every contributing template
/// path in first-encountered order (root first), and the per-line source
/// map. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compiled {
    pub content: String,
    pub paths: Vec<String>,
    pub source_map: SourceMap,
}

/// Per-compile state. Owned by one `compile` call and threaded through the
/// recursive sub-compiles its imports and extends trigger.
#[derive(Default)]
pub struct Session {
    in_progress: Vec<String>,
    paths: Vec<String>,
}

impl Session {
    /// Whether the named template is currently being compiled somewhere up
    /// the recursion, i.e. the edge about to be followed closes a cycle.
    pub fn is_in_progress(&self, name: &str) -> bool {
        self.in_progress.iter().any(|entry| entry == name)
    }

    fn note_path(&mut self, path: &str) {
        if !self.paths.iter().any(|entry| entry == path) {
            self.paths.push(path.to_string());
        }
    }
}

/// A parsed and transformed (but not yet finalized) template.
pub struct Unit {
    pub doc: Node,
    pub attr_indexes: Vec<TagAttrIndex>,
}

pub struct Builder {
    loader: Box<dyn Loader + Send + Sync>,
    grammars: GrammarSet,
    directives: DirectiveRegistry,
    renderers: Vec<Box<dyn Renderer>>,
    options: CompileOptions,
}

impl Builder {
    pub fn new(loader: impl Loader + Send + Sync + 'static) -> Self {
        Builder {
            loader: Box::new(loader),
            grammars: GrammarSet::default_set(),
            directives: DirectiveRegistry::default_set(),
            renderers: default_renderers(),
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers an additional directive; the last registration of a name
    /// wins.
    pub fn with_directive(mut self, directive: Box<dyn Directive>) -> Self {
        self.directives.register(directive);
        self
    }

    /// Replaces the grammar set, e.g. to change priority order.
    pub fn with_grammars(mut self, grammars: GrammarSet) -> Self {
        self.grammars = grammars;
        self
    }

    pub(crate) fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }

    /// Compiles a template by name into PHP text plus provenance data.
    pub fn compile(&self, name: &str) -> Result<Compiled> {
        let mut session = Session::default();
        let mut unit = self.compile_unit(name, &mut session)?;

        // Finalize stage: lower every remaining dynamic construct.
        let mut lower = DynamicToPhp {
            directives: &self.directives,
        };
        traverse(&mut unit.doc, &mut [&mut lower])?;

        let mut emitter = Emitter::new();
        let rc = RenderContext {
            renderers: &self.renderers,
            directives: &self.directives,
            options: &self.options,
        };
        rc.render_node(&unit.doc, &mut emitter)?;

        let (content, source_map) = emitter.finish();
        Ok(Compiled {
            content,
            paths: session.paths,
            source_map,
        })
    }

    /// Parses and runs the transform stage for one template. Used both for
    /// the root compile and recursively for imported or extended templates,
    /// which must arrive fully composed but not yet lowered.
    pub(crate) fn compile_unit(&self, name: &str, session: &mut Session) -> Result<Unit> {
        let source = self.loader.load(name)?;
        session.note_path(&source.path);
        session.in_progress.push(name.to_string());
        let result = self.transform(&source, session);
        session.in_progress.pop();
        result
    }

    fn transform(&self, source: &crate::source::Source, session: &mut Session) -> Result<Unit> {
        let parser = Parser::new(&self.grammars);
        let mut doc = parser.parse(source)?;

        // Annotation pass: attribute indexes and early duplicate checks.
        let mut attrs = DefineAttributes::default();
        let mut early_blocks = DefineBlocks::default();
        traverse(&mut doc, &mut [&mut attrs, &mut early_blocks])?;

        // Import pass; may recurse into this builder.
        let mut imports = ResolveImports {
            builder: self,
            session: &mut *session,
        };
        traverse(&mut doc, &mut [&mut imports])?;

        // Re-index blocks after splicing so overrides carry their resolved
        // imports, then merge with the parent, if any.
        let mut blocks = DefineBlocks::default();
        traverse(&mut doc, &mut [&mut blocks])?;
        if let Node::Document(document) = &mut doc {
            resolve_extends(document, self, session, &blocks.blocks)?;
        }

        Ok(Unit {
            doc,
            attr_indexes: attrs.indexes,
        })
    }
}
