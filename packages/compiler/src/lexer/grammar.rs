//! Grammar contract
//!
//! A grammar is a stateless recognizer: positioned at a candidate start it
//! either declines or consumes a maximal recognized span, emitting tokens.
//! Grammars are tried in the order they were registered; the first one that
//! matches claims the position. Unterminated constructs always report the
//! construct's starting offset, not end of input.

use crate::error::{CompileError, Result};
use crate::source::Source;

use super::tokens::Token;
use super::CharBuffer;

pub trait Grammar: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this grammar claims the current buffer position. Must only
    /// use lookahead, never consume.
    fn matches(&self, buf: &mut CharBuffer) -> bool;

    /// Consumes one recognized construct and returns its tokens. Only
    /// called after `matches` returned true at this position.
    fn tokenize(&self, buf: &mut CharBuffer, source: &Source) -> Result<Vec<Token>>;
}

/// Builds a syntax error pointing at the line containing `offset`.
pub fn syntax_error(source: &Source, offset: usize, message: impl Into<String>) -> CompileError {
    CompileError::Syntax {
        path: source.path.clone(),
        line: source.line_at(offset),
        message: message.into(),
    }
}

/// Consumes input up to and including `terminator`, returning the text
/// before it, or `None` when the input ends first. With `quote_aware` set,
/// single and double quoted runs are skipped over so a terminator inside a
/// string literal does not end the scan.
pub fn scan_until(buf: &mut CharBuffer, terminator: &str, quote_aware: bool) -> Option<String> {
    let mut out = String::new();
    loop {
        if buf.starts_with(terminator) {
            buf.eat_str(terminator);
            return Some(out);
        }
        let item = buf.next()?;
        out.push(item.ch);
        if quote_aware && (item.ch == '"' || item.ch == '\'') {
            let quote = item.ch;
            loop {
                let inner = buf.next()?;
                out.push(inner.ch);
                if inner.ch == '\\' {
                    let escaped = buf.next()?;
                    out.push(escaped.ch);
                    continue;
                }
                if inner.ch == quote {
                    break;
                }
            }
        }
    }
}
