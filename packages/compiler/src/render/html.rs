//! HTML renderer
//!
//! Emits literal markup. Attribute names and values round-trip unchanged;
//! double quotes inside a value are escaped so the rendered form stays
//! well-formed. With whitespace collapsing enabled, runs of horizontal
//! whitespace in text collapse to one space; newlines are never touched so
//! output lines keep their one-to-one relation with source map records.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Attr, Node, Tag};
use crate::error::Result;
use crate::lexer::tags::{definition, TagFlags};

use super::{Emitter, RenderContext, Renderer};

static HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn matches(&self, node: &Node) -> bool {
        matches!(node, Node::Tag(_) | Node::Attr(_) | Node::Raw(_))
    }

    fn render(&self, node: &Node, rc: &RenderContext, em: &mut Emitter) -> Result<()> {
        match node {
            Node::Raw(raw) => {
                if rc.options.collapse_whitespace {
                    let collapsed = HORIZONTAL_WS.replace_all(&raw.text, " ");
                    em.emit(&collapsed, &raw.provenance);
                } else {
                    em.emit(&raw.text, &raw.provenance);
                }
                Ok(())
            }
            Node::Attr(attr) => {
                em.emit(&format_attr(attr), &attr.provenance);
                Ok(())
            }
            Node::Tag(tag) => self.render_tag(tag, rc, em),
            _ => Ok(()),
        }
    }
}

impl HtmlRenderer {
    fn render_tag(&self, tag: &Tag, rc: &RenderContext, em: &mut Emitter) -> Result<()> {
        em.emit(&format!("<{}", tag.name), &tag.provenance);
        for attr in &tag.attrs {
            em.emit(&format!(" {}", format_attr(attr)), &attr.provenance);
        }

        if tag.void {
            // Tags void by definition keep the plain HTML5 form; an
            // authored self-close on any other tag is preserved.
            if definition(&tag.name).contains(TagFlags::VOID) {
                em.emit(">", &tag.provenance);
            } else {
                em.emit(" />", &tag.provenance);
            }
            return Ok(());
        }

        em.emit(">", &tag.provenance);
        rc.render_children(&tag.children, em)?;
        em.emit(&format!("</{}>", tag.name), &tag.provenance);
        Ok(())
    }
}

fn format_attr(attr: &Attr) -> String {
    match &attr.value {
        Some(value) => format!("{}=\"{}\"", attr.name, value.replace('"', "&quot;")),
        None => attr.name.clone(),
    }
}
