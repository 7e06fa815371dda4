//! PHP embed grammar
//!
//! Tokenizes `<?php ... ?>` blocks and the short echo form `<?= expr ?>`.
//! The body runs to the closing `?>`, skipping quoted runs so string
//! literals may contain the close marker.

use crate::error::Result;
use crate::source::Source;

use super::grammar::{scan_until, syntax_error, Grammar};
use super::tokens::{Token, TokenKind};
use super::CharBuffer;

pub struct PhpGrammar;

impl Grammar for PhpGrammar {
    fn name(&self) -> &'static str {
        "php"
    }

    fn matches(&self, buf: &mut CharBuffer) -> bool {
        buf.starts_with("<?")
    }

    fn tokenize(&self, buf: &mut CharBuffer, source: &Source) -> Result<Vec<Token>> {
        let start = buf.peek_offset();

        if buf.starts_with("<?php") {
            buf.eat_str("<?php");
            return match scan_until(buf, "?>", true) {
                Some(code) => Ok(vec![Token::new(TokenKind::PhpCode, code.trim(), start)]),
                None => Err(syntax_error(source, start, "unterminated PHP block")),
            };
        }

        if buf.starts_with("<?=") {
            buf.eat_str("<?=");
            return match scan_until(buf, "?>", true) {
                Some(expr) => Ok(vec![Token::new(TokenKind::PhpEcho, expr.trim(), start)]),
                None => Err(syntax_error(source, start, "unterminated PHP echo block")),
            };
        }

        Err(syntax_error(
            source,
            start,
            "unsupported processing instruction",
        ))
    }
}
