//! Template loaders
//!
//! The compiler resolves template names through the `Loader` trait and
//! leaves resolution policy (filesystem layout, namespace mapping) entirely
//! to the embedder. Namespaces are opaque `/`-separated prefixes.

use indexmap::IndexMap;

use crate::error::{CompileError, Result};
use crate::source::Source;

pub trait Loader {
    /// Whether the name resolves to a template.
    fn exists(&self, name: &str) -> bool;

    /// Loads the template, failing with `CompileError::Loader` if absent.
    fn load(&self, name: &str) -> Result<Source>;

    /// Template names under the given namespace, in a stable order. An
    /// empty namespace lists every known template.
    fn list(&self, namespace: &str) -> Vec<String>;
}

/// In-memory loader keyed by template name, listing in insertion order.
/// The backing store for the test suite and a convenient embedder default
/// for templates that do not live on disk.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    templates: IndexMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        MemoryLoader {
            templates: IndexMap::new(),
        }
    }

    pub fn add(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.templates.insert(name.into(), content.into());
        self
    }

    fn path_of(name: &str) -> String {
        format!("/templates/{}.phtml", name)
    }
}

impl Loader for MemoryLoader {
    fn exists(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    fn load(&self, name: &str) -> Result<Source> {
        match self.templates.get(name) {
            Some(content) => Ok(Source::new(name, Self::path_of(name), content)),
            None => Err(CompileError::Loader {
                name: name.to_string(),
                message: "no template registered under this name".to_string(),
            }),
        }
    }

    fn list(&self, namespace: &str) -> Vec<String> {
        self.templates
            .keys()
            .filter(|name| {
                if namespace.is_empty() {
                    true
                } else {
                    name.strip_prefix(namespace)
                        .is_some_and(|rest| rest.starts_with('/'))
                }
            })
            .cloned()
            .collect()
    }
}
