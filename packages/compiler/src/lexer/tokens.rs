//! Lexical tokens
//!
//! Tokens are produced transiently by a grammar and consumed immediately by
//! its syntax handler; they are not retained after parsing. Each token
//! carries the byte offset of its first character so nodes built from it can
//! resolve their source line.

use serde::{Deserialize, Serialize};

use super::buffer::Lexeme;

/// Token kinds, tagged by the grammar that produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    // HTML grammar
    TagOpenStart,
    AttrName,
    AttrValue,
    TagOpenEnd,
    TagSelfClose,
    TagClose,
    Comment,
    Text,

    // Dynamic directive grammar
    DirectiveOpen,
    DirectiveArgs,
    DirectiveClose,

    // Inline expression grammar
    InlineExpr,

    // PHP grammar
    PhpCode,
    PhpEcho,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }
}

impl Lexeme for Token {
    fn offset(&self) -> usize {
        self.offset
    }

    fn write_text(&self, out: &mut String) {
        out.push_str(&self.lexeme);
    }
}
