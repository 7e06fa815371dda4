//! Inline expression grammar
//!
//! Tokenizes `{{ expr }}` interpolations. The expression runs to the
//! closing `}}`, skipping quoted runs.

use crate::error::Result;
use crate::source::Source;

use super::grammar::{scan_until, syntax_error, Grammar};
use super::tokens::{Token, TokenKind};
use super::CharBuffer;

pub struct InlineGrammar;

impl Grammar for InlineGrammar {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn matches(&self, buf: &mut CharBuffer) -> bool {
        buf.starts_with("{{")
    }

    fn tokenize(&self, buf: &mut CharBuffer, source: &Source) -> Result<Vec<Token>> {
        let start = buf.peek_offset();
        buf.eat_str("{{");
        match scan_until(buf, "}}", true) {
            Some(expr) => Ok(vec![Token::new(TokenKind::InlineExpr, expr.trim(), start)]),
            None => Err(syntax_error(source, start, "unterminated interpolation")),
        }
    }
}
