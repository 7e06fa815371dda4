use phtml_compiler::ast::Node;
use phtml_compiler::parser::{GrammarSet, Parser};
use phtml_compiler::source::Source;
use phtml_compiler::CompileError;

fn parse(text: &str) -> Result<Node, CompileError> {
    let source = Source::new("fixture", "/templates/fixture.phtml", text);
    let set = GrammarSet::default_set();
    Parser::new(&set).parse(&source)
}

fn children(root: &Node) -> &[Node] {
    root.children()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod documents {
        use super::*;

        #[test]
        fn should_parse_root_level_text() {
            let doc = parse("just text").unwrap();
            let kids = children(&doc);
            assert_eq!(kids.len(), 1);
            match &kids[0] {
                Node::Raw(raw) => assert_eq!(raw.text, "just text"),
                other => panic!("expected raw text, got {:?}", other),
            }
        }

        #[test]
        fn should_parse_an_empty_template() {
            let doc = parse("").unwrap();
            assert!(children(&doc).is_empty());
        }
    }

    mod tags {
        use super::*;

        #[test]
        fn should_parse_nested_tags_with_attributes() {
            let doc = parse("<div class=\"outer\"><span id=\"s\">x</span></div>").unwrap();
            let kids = children(&doc);
            match &kids[0] {
                Node::Tag(div) => {
                    assert_eq!(div.name, "div");
                    assert_eq!(div.attrs[0].name, "class");
                    assert_eq!(div.attrs[0].value.as_deref(), Some("outer"));
                    match &div.children[0] {
                        Node::Tag(span) => {
                            assert_eq!(span.name, "span");
                            assert_eq!(span.children.len(), 1);
                        }
                        other => panic!("expected span, got {:?}", other),
                    }
                }
                other => panic!("expected div, got {:?}", other),
            }
        }

        #[test]
        fn should_mark_void_tags() {
            let doc = parse("<br>").unwrap();
            match &children(&doc)[0] {
                Node::Tag(tag) => {
                    assert!(tag.void);
                    assert!(tag.children.is_empty());
                }
                other => panic!("expected tag, got {:?}", other),
            }
        }

        #[test]
        fn should_attach_line_provenance() {
            let doc = parse("line one\n<div>\nx</div>").unwrap();
            let kids = children(&doc);
            match &kids[1] {
                Node::Tag(tag) => assert_eq!(tag.provenance.line, 2),
                other => panic!("expected tag, got {:?}", other),
            }
        }

        #[test]
        fn should_capture_raw_text_content_verbatim() {
            let doc = parse("<script>if (a<b) { x(); }</script>").unwrap();
            match &children(&doc)[0] {
                Node::Tag(tag) => match &tag.children[0] {
                    Node::Raw(raw) => assert_eq!(raw.text, "if (a<b) { x(); }"),
                    other => panic!("expected raw content, got {:?}", other),
                },
                other => panic!("expected script tag, got {:?}", other),
            }
        }

        #[test]
        fn should_reject_a_mismatched_closing_tag() {
            let err = parse("<div><span></div>").unwrap_err();
            match err {
                CompileError::Syntax { message, .. } => {
                    assert!(message.contains("</div>"), "message: {}", message);
                }
                other => panic!("expected syntax error, got {:?}", other),
            }
        }

        #[test]
        fn should_report_an_unclosed_tag_at_its_opening_line() {
            // The defect is on line 2 of a 4-line template; end of input is
            // on line 4.
            let err = parse("<section>\n<p class=\"x\">\ntext\n").unwrap_err();
            match err {
                CompileError::Syntax { line, message, .. } => {
                    assert_eq!(line, 2);
                    assert!(message.contains("<p>"), "message: {}", message);
                }
                other => panic!("expected syntax error, got {:?}", other),
            }
        }
    }

    mod directives {
        use super::*;

        #[test]
        fn should_parse_a_directive_block_with_body() {
            let doc = parse("{if $ok}<b>y</b>{/if}").unwrap();
            match &children(&doc)[0] {
                Node::DynamicBlock(block) => {
                    assert_eq!(block.name, "if");
                    assert_eq!(block.args, "$ok");
                    assert_eq!(block.body.len(), 1);
                }
                other => panic!("expected dynamic block, got {:?}", other),
            }
        }

        #[test]
        fn should_parse_marker_directives_without_bodies() {
            let doc = parse("{import header}{extends layout}").unwrap();
            let kids = children(&doc);
            assert_eq!(kids.len(), 2);
            assert_eq!(kids[0].name(), Some("import"));
            assert_eq!(kids[1].name(), Some("extends"));
        }

        #[test]
        fn should_report_an_unterminated_directive_at_its_opening_line() {
            let err = parse("ok line\nstill fine\n{foreach $xs as $x}\n<li>x</li>\n").unwrap_err();
            match err {
                CompileError::Syntax { line, message, .. } => {
                    assert_eq!(line, 3);
                    assert!(message.contains("unterminated"), "message: {}", message);
                }
                other => panic!("expected syntax error, got {:?}", other),
            }
        }

        #[test]
        fn should_reject_a_stray_closing_directive() {
            let err = parse("text {/if}").unwrap_err();
            assert!(matches!(err, CompileError::Syntax { .. }));
        }
    }

    mod embedded_code {
        use super::*;

        #[test]
        fn should_lower_interpolations_to_escaped_echo() {
            let doc = parse("{{ $name }}").unwrap();
            match &children(&doc)[0] {
                Node::PhpBlock(block) => {
                    assert!(block.code.contains("htmlspecialchars($name"));
                }
                other => panic!("expected php block, got {:?}", other),
            }
        }

        #[test]
        fn should_keep_php_blocks_verbatim() {
            let doc = parse("<?php $a = 1; $b = 2; ?>").unwrap();
            match &children(&doc)[0] {
                Node::PhpBlock(block) => assert_eq!(block.code, "$a = 1; $b = 2;"),
                other => panic!("expected php block, got {:?}", other),
            }
        }

        #[test]
        fn should_normalize_short_echo() {
            let doc = parse("<?= $title; ?>").unwrap();
            match &children(&doc)[0] {
                Node::PhpBlock(block) => assert_eq!(block.code, "echo $title;"),
                other => panic!("expected php block, got {:?}", other),
            }
        }
    }
}
