//! Dynamic directive grammar
//!
//! Tokenizes `{name args}` directive openers and `{/name}` closers. The
//! argument text runs to the closing brace, skipping over quoted runs so
//! string literals may contain `}`. A `{` not followed by a name or `/` is
//! left to the HTML grammar as plain text.

use crate::chars;
use crate::error::Result;
use crate::source::Source;

use super::grammar::{scan_until, syntax_error, Grammar};
use super::tokens::{Token, TokenKind};
use super::CharBuffer;

pub struct DynamicGrammar;

impl Grammar for DynamicGrammar {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn matches(&self, buf: &mut CharBuffer) -> bool {
        if buf.peek_char(1) != Some(chars::LBRACE) {
            return false;
        }
        match buf.peek_char(2) {
            Some(chars::LBRACE) => false,
            Some(chars::SLASH) => buf.peek_char(3).is_some_and(chars::is_name_start),
            Some(next) => chars::is_name_start(next),
            None => false,
        }
    }

    fn tokenize(&self, buf: &mut CharBuffer, source: &Source) -> Result<Vec<Token>> {
        let start = buf.peek_offset();
        buf.eat(chars::LBRACE);

        if buf.eat(chars::SLASH) {
            let name = buf.collect_while(chars::is_name_char);
            buf.skip_whitespace();
            if name.is_empty() || !buf.eat(chars::RBRACE) {
                return Err(syntax_error(source, start, "malformed closing directive"));
            }
            return Ok(vec![Token::new(TokenKind::DirectiveClose, name, start)]);
        }

        let name = buf.collect_while(chars::is_name_char);
        let mut tokens = vec![Token::new(TokenKind::DirectiveOpen, name.clone(), start)];

        let args_offset = buf.peek_offset();
        let args = match scan_until(buf, "}", true) {
            Some(args) => args,
            None => {
                return Err(syntax_error(
                    source,
                    start,
                    format!("unterminated directive {{{}}}", name),
                ));
            }
        };
        let args = args.trim();
        if !args.is_empty() {
            tokens.push(Token::new(TokenKind::DirectiveArgs, args, args_offset));
        }
        Ok(tokens)
    }
}
