//! Source maps
//!
//! As renderers emit text they record, per output line, the provenance
//! stack of the node that produced it: the literal template text first,
//! then one frame per import/extends edge out to the root template. The map
//! is a plain value (two maps built from the same compilation compare and
//! serialize identically). A standard V3 JSON source map can be derived
//! from the innermost frames for tooling that speaks that format.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One provenance frame: a template path and a 1-based line within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFrame {
    pub path: String,
    pub line: u32,
}

impl MapFrame {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        MapFrame {
            path: path.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LineEntry {
    line: u32,
    stack: SmallVec<[MapFrame; 2]>,
}

/// Per-output-line provenance stacks, innermost frame first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    entries: Vec<LineEntry>,
}

/// Serialized V3 source map shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMapJson {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(rename = "sourceRoot")]
    pub source_root: String,
    pub sources: Vec<String>,
    #[serde(rename = "sourcesContent")]
    pub sources_content: Vec<Option<String>>,
    pub mappings: String,
}

const VERSION: u32 = 3;

impl SourceMap {
    pub fn new() -> Self {
        SourceMap {
            entries: Vec::new(),
        }
    }

    /// Records the stack for an output line. Lines arrive in emission
    /// order; the first node to write on a line owns its provenance, later
    /// writers on the same line are ignored.
    pub fn record(&mut self, output_line: u32, stack: impl IntoIterator<Item = MapFrame>) {
        if let Some(last) = self.entries.last() {
            debug_assert!(last.line <= output_line, "mappings must grow monotonically");
            if last.line == output_line {
                return;
            }
        }
        let stack: SmallVec<[MapFrame; 2]> = stack.into_iter().collect();
        if stack.is_empty() {
            return;
        }
        self.entries.push(LineEntry {
            line: output_line,
            stack,
        });
    }

    /// Provenance stack for an output line, innermost first, or `None` for
    /// a line no renderer claimed (e.g. a blank line).
    pub fn stack_at(&self, output_line: u32) -> Option<&[MapFrame]> {
        self.entries
            .binary_search_by_key(&output_line, |entry| entry.line)
            .ok()
            .map(|index| self.entries[index].stack.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every template path appearing in any frame, in first-appearance
    /// order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for entry in &self.entries {
            for frame in &entry.stack {
                if !paths.contains(&frame.path.as_str()) {
                    paths.push(&frame.path);
                }
            }
        }
        paths
    }

    /// Derives a standard V3 source map from the innermost frames. Sources
    /// are listed sorted; content slots are left for the caller's loader.
    pub fn to_json(&self, file: Option<&str>) -> SourceMapJson {
        let mut sources: Vec<String> = Vec::new();
        for entry in &self.entries {
            if let Some(frame) = entry.stack.first() {
                if !sources.contains(&frame.path) {
                    sources.push(frame.path.clone());
                }
            }
        }
        sources.sort();

        let max_line = self.entries.last().map(|entry| entry.line).unwrap_or(0);
        let mut mappings = String::new();
        let mut last_source_index: i64 = 0;
        let mut last_source_line: i64 = 0;

        for line in 1..=max_line {
            if line > 1 {
                mappings.push(';');
            }
            if let Some(stack) = self.stack_at(line) {
                let frame = &stack[0];
                let source_index = sources
                    .iter()
                    .position(|source| source == &frame.path)
                    .unwrap_or(0) as i64;
                let source_line = i64::from(frame.line) - 1;

                // Segment: generated col 0, source index, source line,
                // source col 0, all VLQ relative like the format requires.
                mappings.push_str(&to_base64_vlq(0));
                mappings.push_str(&to_base64_vlq(source_index - last_source_index));
                mappings.push_str(&to_base64_vlq(source_line - last_source_line));
                mappings.push_str(&to_base64_vlq(0));
                last_source_index = source_index;
                last_source_line = source_line;
            }
        }

        let sources_content = vec![None; sources.len()];
        SourceMapJson {
            version: VERSION,
            file: file.map(str::to_string),
            source_root: String::new(),
            sources,
            sources_content,
            mappings,
        }
    }
}

const B64_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn to_base64_digit(value: u8) -> char {
    debug_assert!(value < 64, "can only encode values in the range [0, 63]");
    B64_DIGITS[value as usize] as char
}

fn to_base64_vlq(value: i64) -> String {
    let mut value = if value < 0 {
        ((-value) << 1) + 1
    } else {
        value << 1
    };

    let mut out = String::new();
    loop {
        let mut digit = value & 31;
        value >>= 5;
        if value > 0 {
            digit |= 32;
        }
        out.push(to_base64_digit(digit as u8));
        if value <= 0 {
            break;
        }
    }
    out
}
