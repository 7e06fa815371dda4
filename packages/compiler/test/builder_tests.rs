use phtml_compiler::ast::{DynamicBlock, Node, PhpBlock};
use phtml_compiler::directive::Directive;
use phtml_compiler::error::Result as CompileResult;
use phtml_compiler::{Builder, CompileError, MemoryLoader};

fn builder(templates: &[(&str, &str)]) -> Builder {
    let mut loader = MemoryLoader::new();
    for (name, content) in templates {
        loader.add(*name, *content);
    }
    Builder::new(loader)
}

/// Wraps its body in output buffering, assigning the captured markup to a
/// variable named by the directive arguments.
struct CaptureDirective;

impl Directive for CaptureDirective {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn lower(&self, block: &DynamicBlock) -> CompileResult<Node> {
        let variable = block.args.trim();
        let mut children = vec![Node::PhpBlock(PhpBlock {
            code: "ob_start();".to_string(),
            provenance: block.provenance.clone(),
        })];
        children.extend(block.body.iter().cloned());
        children.push(Node::PhpBlock(PhpBlock {
            code: format!("{} = ob_get_clean();", variable),
            provenance: block.provenance.clone(),
        }));
        Ok(Node::fragment(children, block.provenance.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod loading {
        use super::*;

        #[test]
        fn should_fail_with_a_loader_error_for_an_unknown_name() {
            let builder = builder(&[]);
            let err = builder.compile("missing").unwrap_err();
            match err {
                CompileError::Loader { name, .. } => assert_eq!(name, "missing"),
                other => panic!("expected loader error, got {:?}", other),
            }
        }

        #[test]
        fn should_compile_the_same_template_repeatedly() {
            let builder = builder(&[("page", "<p>{{ $x }}</p>")]);
            let first = builder.compile("page").unwrap();
            let second = builder.compile("page").unwrap();
            assert_eq!(first, second);
        }
    }

    mod directives {
        use super::*;

        #[test]
        fn should_fail_on_an_unknown_directive_at_its_location() {
            let builder = builder(&[("page", "fine\n{widget $a}x{/widget}")]);
            let err = builder.compile("page").unwrap_err();
            match err {
                CompileError::Directive {
                    path, line, name, ..
                } => {
                    assert_eq!(path, "/templates/page.phtml");
                    assert_eq!(line, 2);
                    assert_eq!(name, "widget");
                }
                other => panic!("expected directive error, got {:?}", other),
            }
        }

        #[test]
        fn should_use_directives_registered_at_construction() {
            let result = builder(&[("page", "{capture $html}<b>x</b>{/capture}")])
                .with_directive(Box::new(CaptureDirective))
                .compile("page")
                .unwrap();
            assert_eq!(
                result.content,
                "<?php ob_start(); ?><b>x</b><?php $html = ob_get_clean(); ?>"
            );
        }

        #[test]
        fn should_reject_an_orphan_else() {
            let builder = builder(&[("page", "{else}")]);
            let err = builder.compile("page").unwrap_err();
            assert!(matches!(err, CompileError::Directive { .. }));
        }

        #[test]
        fn should_reject_a_foreach_without_as() {
            let builder = builder(&[("page", "{foreach $items}x{/foreach}")]);
            let err = builder.compile("page").unwrap_err();
            match err {
                CompileError::Directive { name, .. } => assert_eq!(name, "foreach"),
                other => panic!("expected directive error, got {:?}", other),
            }
        }
    }

    mod composition {
        use super::*;

        #[test]
        fn should_compile_imports_inside_directive_bodies() {
            let builder = builder(&[
                ("page", "{if $show}{import chip}{/if}"),
                ("chip", "<span>chip</span>"),
            ]);
            let result = builder.compile("page").unwrap();
            assert_eq!(
                result.content,
                "<?php if ($show) { ?><span>chip</span><?php } ?>"
            );
            assert_eq!(
                result.paths,
                vec!["/templates/page.phtml", "/templates/chip.phtml"]
            );
        }

        #[test]
        fn should_compile_an_imported_template_that_extends_a_parent() {
            let builder = builder(&[
                ("page", "[{import widget}]"),
                ("widget", "{extends widget_base}{block body}W{/block}"),
                ("widget_base", "<div>{block body}B{/block}</div>"),
            ]);
            let result = builder.compile("page").unwrap();
            assert_eq!(result.content, "[<div>W</div>]");
            assert_eq!(
                result.paths,
                vec![
                    "/templates/page.phtml",
                    "/templates/widget.phtml",
                    "/templates/widget_base.phtml",
                ]
            );
        }

        #[test]
        fn should_reject_duplicate_attributes() {
            let builder = builder(&[("page", "<div class=\"a\" class=\"b\"></div>")]);
            let err = builder.compile("page").unwrap_err();
            match err {
                CompileError::Syntax { message, .. } => {
                    assert!(message.contains("duplicate attribute"), "message: {}", message);
                }
                other => panic!("expected syntax error, got {:?}", other),
            }
        }
    }

    mod error_chains {
        use super::*;

        #[test]
        fn should_expose_distinct_locations_at_each_level() {
            let builder = builder(&[
                ("page", "{import section}"),
                ("section", "\n{import leaf}"),
                ("leaf", "{if $x}never closed"),
            ]);
            let err = builder.compile("page").unwrap_err();

            let mut locations = Vec::new();
            let mut current: Option<&CompileError> = Some(&err);
            while let Some(error) = current {
                if let (Some(file), Some(line)) = (error.file(), error.line()) {
                    locations.push((file.to_string(), line));
                }
                current = error.cause();
            }

            assert_eq!(
                locations,
                vec![
                    ("/templates/page.phtml".to_string(), 1),
                    ("/templates/section.phtml".to_string(), 2),
                    ("/templates/leaf.phtml".to_string(), 1),
                ]
            );
        }
    }
}
