//! HTML syntax handler
//!
//! Builds `Tag`, `Attr` and `Raw` nodes from the HTML grammar's tokens.
//! For a non-void open tag the handler re-enters the parser for the
//! children, then consumes and verifies the closing tag itself. Content of
//! raw-text tags (script, style) is captured verbatim from the shared
//! buffer with no nested parsing.

use crate::ast::{Attr, Node, Raw, Tag};
use crate::chars;
use crate::error::Result;
use crate::lexer::grammar::syntax_error;
use crate::lexer::tags::{definition, TagFlags};
use crate::lexer::{Token, TokenKind};

use super::{ParseCx, Parser, Syntax};

pub struct HtmlSyntax;

impl Syntax for HtmlSyntax {
    fn build(&self, parser: &Parser, cx: &mut ParseCx, tokens: Vec<Token>) -> Result<Vec<Node>> {
        let first = match tokens.first() {
            Some(token) => token.clone(),
            None => return Ok(Vec::new()),
        };

        match first.kind {
            TokenKind::Text | TokenKind::Comment => Ok(vec![Node::Raw(Raw {
                text: first.lexeme,
                provenance: cx.provenance(first.offset),
            })]),
            TokenKind::TagClose => Err(syntax_error(
                cx.source,
                first.offset,
                format!("unexpected closing tag </{}>", first.lexeme),
            )),
            TokenKind::TagOpenStart => self.build_tag(parser, cx, &first, &tokens[1..]),
            _ => Err(syntax_error(
                cx.source,
                first.offset,
                "unexpected token in markup",
            )),
        }
    }
}

impl HtmlSyntax {
    fn build_tag(
        &self,
        parser: &Parser,
        cx: &mut ParseCx,
        open: &Token,
        rest: &[Token],
    ) -> Result<Vec<Node>> {
        let name = open.lexeme.clone();
        let mut attrs: Vec<Attr> = Vec::new();
        let mut self_closing = false;

        for token in rest {
            match token.kind {
                TokenKind::AttrName => attrs.push(Attr {
                    name: token.lexeme.clone(),
                    value: None,
                    provenance: cx.provenance(token.offset),
                }),
                TokenKind::AttrValue => {
                    if let Some(attr) = attrs.last_mut() {
                        attr.value = Some(token.lexeme.clone());
                    }
                }
                TokenKind::TagSelfClose => self_closing = true,
                TokenKind::TagOpenEnd => {}
                _ => {
                    return Err(syntax_error(
                        cx.source,
                        token.offset,
                        "unexpected token in open tag",
                    ));
                }
            }
        }

        let flags = definition(&name);
        let provenance = cx.provenance(open.offset);

        if self_closing || flags.contains(TagFlags::VOID) {
            return Ok(vec![Node::Tag(Tag {
                name,
                attrs,
                children: Vec::new(),
                void: true,
                provenance,
            })]);
        }

        let children = if flags.contains(TagFlags::RAW_TEXT) {
            self.capture_raw_text(cx, &name, open.offset)?
        } else {
            let children = parser.parse_nodes(cx, false)?;
            if cx.buffer.is_eoi() || cx.buffer.starts_with("{/") {
                return Err(syntax_error(
                    cx.source,
                    open.offset,
                    format!("unclosed tag <{}>", name),
                ));
            }
            children
        };

        if !flags.contains(TagFlags::RAW_TEXT) {
            self.consume_close_tag(cx, &name)?;
        }

        Ok(vec![Node::Tag(Tag {
            name,
            attrs,
            children,
            void: false,
            provenance,
        })])
    }

    /// Consumes `</name>`, verifying the name matches the open tag.
    fn consume_close_tag(&self, cx: &mut ParseCx, name: &str) -> Result<()> {
        let offset = cx.buffer.peek_offset();
        cx.buffer.eat_str("</");
        let close_name = cx.buffer.collect_while(chars::is_name_char);
        cx.buffer.skip_whitespace();
        if !cx.buffer.eat(chars::GT) {
            return Err(syntax_error(cx.source, offset, "malformed closing tag"));
        }
        if !close_name.eq_ignore_ascii_case(name) {
            return Err(syntax_error(
                cx.source,
                offset,
                format!("unexpected closing tag </{}>, expected </{}>", close_name, name),
            ));
        }
        Ok(())
    }

    /// Collects everything up to `</name` verbatim, then consumes the close
    /// tag. Directives and interpolations inside are not recognized.
    fn capture_raw_text(
        &self,
        cx: &mut ParseCx,
        name: &str,
        open_offset: usize,
    ) -> Result<Vec<Node>> {
        let close_marker = format!("</{}", name.to_ascii_lowercase());
        let text_offset = cx.buffer.peek_offset();
        let mut text = String::new();

        loop {
            let window = cx.buffer.lookahead_text(close_marker.len());
            if window.len() < close_marker.len() {
                return Err(syntax_error(
                    cx.source,
                    open_offset,
                    format!("unclosed tag <{}>", name),
                ));
            }
            if window.eq_ignore_ascii_case(&close_marker) {
                break;
            }
            match cx.buffer.next() {
                Some(item) => text.push(item.ch),
                None => {
                    return Err(syntax_error(
                        cx.source,
                        open_offset,
                        format!("unclosed tag <{}>", name),
                    ));
                }
            }
        }

        self.consume_close_tag(cx, name)?;

        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Node::Raw(Raw {
            text,
            provenance: cx.provenance(text_offset),
        })])
    }
}
