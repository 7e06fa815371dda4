//! Dynamic directive syntax handler
//!
//! Builds `DynamicBlock` nodes. Marker directives (`import`, `extends`,
//! `else`) take no body and no closing token; every other directive opens a
//! block whose body is parsed by re-entering the parser, terminated by a
//! matching `{/name}`.

use crate::ast::{DynamicBlock, Node};
use crate::chars;
use crate::error::Result;
use crate::lexer::grammar::syntax_error;
use crate::lexer::{Token, TokenKind};

use super::{ParseCx, Parser, Syntax};

/// Directives that close themselves: no body, no `{/...}`.
pub const VOID_DIRECTIVES: &[&str] = &["import", "extends", "else"];

pub struct DynamicSyntax;

impl Syntax for DynamicSyntax {
    fn build(&self, parser: &Parser, cx: &mut ParseCx, tokens: Vec<Token>) -> Result<Vec<Node>> {
        let first = match tokens.first() {
            Some(token) => token.clone(),
            None => return Ok(Vec::new()),
        };

        match first.kind {
            TokenKind::DirectiveClose => Err(syntax_error(
                cx.source,
                first.offset,
                format!("unexpected closing directive {{/{}}}", first.lexeme),
            )),
            TokenKind::DirectiveOpen => {
                let name = first.lexeme.clone();
                let args = tokens
                    .iter()
                    .find(|token| token.kind == TokenKind::DirectiveArgs)
                    .map(|token| token.lexeme.clone())
                    .unwrap_or_default();
                let provenance = cx.provenance(first.offset);

                if VOID_DIRECTIVES.contains(&name.as_str()) {
                    return Ok(vec![Node::DynamicBlock(DynamicBlock {
                        name,
                        args,
                        body: Vec::new(),
                        provenance,
                    })]);
                }

                let body = parser.parse_nodes(cx, false)?;
                self.consume_close(cx, &name, first.offset)?;

                Ok(vec![Node::DynamicBlock(DynamicBlock {
                    name,
                    args,
                    body,
                    provenance,
                })])
            }
            _ => Err(syntax_error(
                cx.source,
                first.offset,
                "unexpected token in directive",
            )),
        }
    }
}

impl DynamicSyntax {
    fn consume_close(&self, cx: &mut ParseCx, name: &str, open_offset: usize) -> Result<()> {
        if cx.buffer.is_eoi() || !cx.buffer.starts_with("{/") {
            return Err(syntax_error(
                cx.source,
                open_offset,
                format!("unterminated directive {{{}}}", name),
            ));
        }

        let close_offset = cx.buffer.peek_offset();
        cx.buffer.eat_str("{/");
        let close_name = cx.buffer.collect_while(chars::is_name_char);
        cx.buffer.skip_whitespace();
        if !cx.buffer.eat(chars::RBRACE) {
            return Err(syntax_error(
                cx.source,
                close_offset,
                "malformed closing directive",
            ));
        }
        if close_name != name {
            return Err(syntax_error(
                cx.source,
                close_offset,
                format!(
                    "unexpected closing directive {{/{}}}, expected {{/{}}}",
                    close_name, name
                ),
            ));
        }
        Ok(())
    }
}
