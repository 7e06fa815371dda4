#![deny(clippy::all)]

//! phtml-compiler
//!
//! A multi-grammar template compiler: HTML-shaped template sources mixing
//! literal markup, PHP blocks, inline expressions and dynamic directives
//! are compiled into a single flat PHP program. Templates may `{import}`
//! fragments or whole namespace bundles and `{extends}` a parent template
//! with named, overridable `{block}`s. Compilation produces the PHP text,
//! the ordered list of contributing template files, and a source map that
//! traces every output line back through arbitrarily deep import/extends
//! chains to its authoring location.

pub mod ast;
pub mod builder;
pub mod chars;
pub mod directive;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod render;
pub mod source;
pub mod source_map;
pub mod transform;
pub mod traverse;

pub use builder::{Builder, Compiled, CompileOptions};
pub use directive::{Directive, DirectiveRegistry};
pub use error::{CompileError, Result};
pub use loader::{Loader, MemoryLoader};
pub use parser::GrammarSet;
pub use source::Source;
pub use source_map::{MapFrame, SourceMap};
