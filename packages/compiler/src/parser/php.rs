//! PHP syntax handler
//!
//! Builds `PhpBlock` nodes. `<?php ?>` bodies are kept verbatim; the short
//! echo form is normalized to an echo statement.

use crate::ast::{Node, PhpBlock};
use crate::error::Result;
use crate::lexer::{Token, TokenKind};

use super::{ParseCx, Parser, Syntax};

pub struct PhpSyntax;

impl Syntax for PhpSyntax {
    fn build(&self, _parser: &Parser, cx: &mut ParseCx, tokens: Vec<Token>) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        for token in tokens {
            let code = match token.kind {
                TokenKind::PhpCode => token.lexeme.clone(),
                TokenKind::PhpEcho => {
                    let expr = token.lexeme.trim_end_matches(';').trim_end();
                    format!("echo {};", expr)
                }
                _ => continue,
            };
            nodes.push(Node::PhpBlock(PhpBlock {
                code,
                provenance: cx.provenance(token.offset),
            }));
        }
        Ok(nodes)
    }
}
