//! Inline expression syntax handler
//!
//! Lowers `{{ expr }}` straight to an HTML-escaped PHP echo at parse time;
//! interpolations never reach the transform stages as a distinct node kind.

use crate::ast::{Node, PhpBlock};
use crate::error::Result;
use crate::lexer::{Token, TokenKind};

use super::{ParseCx, Parser, Syntax};

pub struct InlineSyntax;

impl Syntax for InlineSyntax {
    fn build(&self, _parser: &Parser, cx: &mut ParseCx, tokens: Vec<Token>) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        for token in tokens {
            if token.kind == TokenKind::InlineExpr {
                nodes.push(Node::PhpBlock(PhpBlock {
                    code: format!(
                        "echo htmlspecialchars({}, ENT_QUOTES | ENT_SUBSTITUTE, 'UTF-8');",
                        token.lexeme
                    ),
                    provenance: cx.provenance(token.offset),
                }));
            }
        }
        Ok(nodes)
    }
}
