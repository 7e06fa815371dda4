//! Template sources
//!
//! A `Source` is one loaded template: its name, namespace, file identity and
//! raw text, plus a precomputed byte offset to line index so parse-time
//! provenance lookups are cheap.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CR_OR_CRLF_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").unwrap());

/// An immutable template source as handed out by a `Loader`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    /// Template name as it was requested, e.g. `ui/button`.
    pub name: String,
    /// Namespace prefix of the name, empty for root templates.
    pub namespace: String,
    /// Absolute path or other unique file identity.
    pub path: String,
    /// Template text with line endings normalized to `\n`.
    pub content: String,
    /// Byte offset of each line start, index 0 holding line 1.
    line_starts: Vec<usize>,
}

impl Source {
    /// Builds a source, normalizing `\r\n` and lone `\r` to `\n` and
    /// computing the line index. The namespace is everything before the last
    /// `/` of the name.
    pub fn new(name: impl Into<String>, path: impl Into<String>, content: &str) -> Self {
        let name = name.into();
        let namespace = match name.rfind('/') {
            Some(idx) => name[..idx].to_string(),
            None => String::new(),
        };
        let content = CR_OR_CRLF_REGEXP.replace_all(content, "\n").into_owned();

        let mut line_starts = vec![0];
        for (offset, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }

        Source {
            name,
            namespace,
            path: path.into(),
            content,
            line_starts,
        }
    }

    /// 1-based line containing the given byte offset. Offsets past the end
    /// of the content map to the last line.
    pub fn line_at(&self, offset: usize) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx as u32 + 1,
            Err(idx) => idx as u32,
        }
    }

    /// The local (post-namespace) part of the template name.
    pub fn stem(&self) -> &str {
        match self.name.rfind('/') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }
}
