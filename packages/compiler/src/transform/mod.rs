//! AST transformation passes
//!
//! Two ordered stages. The transform stage annotates and composes:
//! attribute/block indexing, import splicing, inheritance merging. The
//! finalize stage lowers every remaining dynamic construct to plain PHP.

pub mod define;
pub mod dynamic;
pub mod extends;
pub mod imports;

pub use define::{DefineAttributes, DefineBlocks, TagAttrIndex};
pub use dynamic::DynamicToPhp;
pub use extends::resolve_extends;
pub use imports::ResolveImports;
