//! HTML grammar
//!
//! Tokenizes literal markup: open tags with attributes, closing tags,
//! comments, doctype declarations and plain text runs. Declines at `<?`
//! (PHP grammar) and at directive or interpolation shaped `{` so the later
//! grammars see exactly the positions meant for them; any other position is
//! claimed as markup or text.

use crate::chars;
use crate::error::Result;
use crate::source::Source;

use super::grammar::{syntax_error, Grammar};
use super::tokens::{Token, TokenKind};
use super::CharBuffer;

pub struct HtmlGrammar;

impl Grammar for HtmlGrammar {
    fn name(&self) -> &'static str {
        "html"
    }

    fn matches(&self, buf: &mut CharBuffer) -> bool {
        match buf.peek_char(1) {
            None => false,
            Some(chars::LT) => buf.peek_char(2) != Some(chars::QUESTION),
            Some(chars::LBRACE) => match buf.peek_char(2) {
                Some(chars::LBRACE) => false,
                Some(chars::SLASH) => false,
                Some(next) if chars::is_name_start(next) => false,
                _ => true,
            },
            Some(_) => true,
        }
    }

    fn tokenize(&self, buf: &mut CharBuffer, source: &Source) -> Result<Vec<Token>> {
        let start = buf.peek_offset();

        if buf.peek_char(1) == Some(chars::LT) {
            if let Some(next) = buf.peek_char(2) {
                if chars::is_name_start(next) {
                    return lex_open_tag(buf, source, start);
                }
                if next == chars::SLASH {
                    return lex_close_tag(buf, source, start);
                }
                if buf.starts_with("<!--") {
                    return lex_comment(buf, source, start);
                }
                if next == chars::BANG {
                    return lex_declaration(buf, source, start);
                }
            }
        }

        lex_text(buf, start)
    }
}

fn lex_open_tag(buf: &mut CharBuffer, source: &Source, start: usize) -> Result<Vec<Token>> {
    buf.eat(chars::LT);
    let name = buf.collect_while(chars::is_name_char);
    let mut tokens = vec![Token::new(TokenKind::TagOpenStart, name.clone(), start)];

    loop {
        buf.skip_whitespace();
        let offset = buf.peek_offset();
        match buf.peek_char(1) {
            None => {
                return Err(syntax_error(
                    source,
                    start,
                    format!("unterminated open tag <{}>", name),
                ));
            }
            Some(chars::GT) => {
                buf.next();
                tokens.push(Token::new(TokenKind::TagOpenEnd, ">", offset));
                return Ok(tokens);
            }
            Some(chars::SLASH) if buf.peek_char(2) == Some(chars::GT) => {
                buf.next();
                buf.next();
                tokens.push(Token::new(TokenKind::TagSelfClose, "/>", offset));
                return Ok(tokens);
            }
            Some(_) => {
                let attr_name = buf.collect_while(|c| {
                    !chars::is_whitespace(c)
                        && c != chars::EQ
                        && c != chars::GT
                        && c != chars::SLASH
                });
                if attr_name.is_empty() {
                    return Err(syntax_error(
                        source,
                        offset,
                        format!("unexpected character in <{}> tag", name),
                    ));
                }
                tokens.push(Token::new(TokenKind::AttrName, attr_name, offset));

                buf.skip_whitespace();
                if buf.eat(chars::EQ) {
                    buf.skip_whitespace();
                    let value_offset = buf.peek_offset();
                    let value = match buf.peek_char(1) {
                        Some(quote @ (chars::DQ | chars::SQ)) => {
                            buf.next();
                            let value = buf.collect_while(|c| c != quote);
                            if !buf.eat(quote) {
                                return Err(syntax_error(
                                    source,
                                    start,
                                    format!("unterminated attribute value in <{}> tag", name),
                                ));
                            }
                            value
                        }
                        _ => buf.collect_while(|c| {
                            !chars::is_whitespace(c) && c != chars::GT && c != chars::SLASH
                        }),
                    };
                    tokens.push(Token::new(TokenKind::AttrValue, value, value_offset));
                }
            }
        }
    }
}

fn lex_close_tag(buf: &mut CharBuffer, source: &Source, start: usize) -> Result<Vec<Token>> {
    buf.eat_str("</");
    let name = buf.collect_while(chars::is_name_char);
    buf.skip_whitespace();
    if name.is_empty() || !buf.eat(chars::GT) {
        return Err(syntax_error(source, start, "malformed closing tag"));
    }
    Ok(vec![Token::new(TokenKind::TagClose, name, start)])
}

fn lex_comment(buf: &mut CharBuffer, source: &Source, start: usize) -> Result<Vec<Token>> {
    buf.eat_str("<!--");
    let mut text = String::from("<!--");
    loop {
        if buf.starts_with("-->") {
            buf.eat_str("-->");
            text.push_str("-->");
            return Ok(vec![Token::new(TokenKind::Comment, text, start)]);
        }
        match buf.next() {
            Some(item) => text.push(item.ch),
            None => return Err(syntax_error(source, start, "unterminated comment")),
        }
    }
}

fn lex_declaration(buf: &mut CharBuffer, source: &Source, start: usize) -> Result<Vec<Token>> {
    let mut text = String::new();
    loop {
        match buf.next() {
            Some(item) => {
                text.push(item.ch);
                if item.ch == chars::GT {
                    return Ok(vec![Token::new(TokenKind::Text, text, start)]);
                }
            }
            None => return Err(syntax_error(source, start, "unterminated markup declaration")),
        }
    }
}

fn lex_text(buf: &mut CharBuffer, start: usize) -> Result<Vec<Token>> {
    let mut text = String::new();
    // The first character is always taken, so a lone `<` or `{` that no
    // other branch claimed still makes progress as literal text.
    if let Some(item) = buf.next() {
        text.push(item.ch);
    }
    while let Some(ch) = buf.peek_char(1) {
        if ch == chars::LT || ch == chars::LBRACE {
            break;
        }
        text.push(ch);
        buf.next();
    }
    Ok(vec![Token::new(TokenKind::Text, text, start)])
}
