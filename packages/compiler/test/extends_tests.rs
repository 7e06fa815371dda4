use phtml_compiler::{Builder, CompileError, MemoryLoader};

fn builder(templates: &[(&str, &str)]) -> Builder {
    let mut loader = MemoryLoader::new();
    for (name, content) in templates {
        loader.add(*name, *content);
    }
    Builder::new(loader)
}

const PARENT: &str = "<header>H</header>\n{block content}parent-content{/block}\n<footer>F</footer>";

#[cfg(test)]
mod tests {
    use super::*;

    mod overrides {
        use super::*;

        #[test]
        fn should_replace_the_overridden_block_and_keep_the_rest() {
            let builder = builder(&[
                ("parent", PARENT),
                ("child", "{extends parent}\n{block content}child-content{/block}"),
            ]);
            let parent_out = builder.compile("parent").unwrap();
            let child_out = builder.compile("child").unwrap();

            assert_eq!(
                parent_out.content,
                "<header>H</header>\nparent-content\n<footer>F</footer>"
            );
            assert_eq!(
                child_out.content,
                "<header>H</header>\nchild-content\n<footer>F</footer>"
            );
        }

        #[test]
        fn should_render_parent_content_for_blocks_not_overridden() {
            let builder = builder(&[
                (
                    "parent",
                    "{block top}T{/block}|{block bottom}B{/block}",
                ),
                ("child", "{extends parent}{block bottom}b2{/block}"),
            ]);
            let result = builder.compile("child").unwrap();
            assert_eq!(result.content, "T|b2");
        }

        #[test]
        fn should_drop_child_content_outside_of_blocks() {
            let builder = builder(&[
                ("parent", "{block content}P{/block}"),
                (
                    "child",
                    "{extends parent}stray text{block content}C{/block}more",
                ),
            ]);
            let result = builder.compile("child").unwrap();
            assert_eq!(result.content, "C");
        }

        #[test]
        fn should_merge_through_a_grandparent_chain() {
            let builder = builder(&[
                ("base", "[{block a}base-a{/block}|{block b}base-b{/block}]"),
                ("mid", "{extends base}{block a}mid-a{/block}"),
                ("leaf", "{extends mid}{block b}leaf-b{/block}"),
            ]);
            let result = builder.compile("leaf").unwrap();
            assert_eq!(result.content, "[mid-a|leaf-b]");
        }

        #[test]
        fn should_record_paths_for_the_whole_chain() {
            let builder = builder(&[
                ("parent", PARENT),
                ("child", "{extends parent}{block content}c{/block}"),
            ]);
            let result = builder.compile("child").unwrap();
            assert_eq!(
                result.paths,
                vec!["/templates/child.phtml", "/templates/parent.phtml"]
            );
        }
    }

    mod failures {
        use super::*;

        #[test]
        fn should_wrap_a_missing_parent_at_the_extends_line() {
            let builder = builder(&[("child", "first line\n{extends ghost}")]);
            let err = builder.compile("child").unwrap_err();
            match &err {
                CompileError::Extends {
                    path, line, parent, ..
                } => {
                    assert_eq!(path, "/templates/child.phtml");
                    assert_eq!(*line, 2);
                    assert_eq!(parent, "ghost");
                }
                other => panic!("expected extends error, got {:?}", other),
            }
            assert!(matches!(err.root_cause(), CompileError::Loader { .. }));
        }

        #[test]
        fn should_preserve_a_parent_syntax_error_with_its_own_location() {
            let builder = builder(&[
                ("child", "{extends parent}"),
                ("parent", "ok\n<div>\nno close"),
            ]);
            let err = builder.compile("child").unwrap_err();
            assert_eq!(err.file(), Some("/templates/child.phtml"));
            assert_eq!(err.line(), Some(1));
            let inner = err.root_cause();
            assert_eq!(inner.file(), Some("/templates/parent.phtml"));
            assert_eq!(inner.line(), Some(2));
        }

        #[test]
        fn should_reject_overriding_a_block_the_parent_lacks() {
            let builder = builder(&[
                ("parent", "{block content}P{/block}"),
                (
                    "child",
                    "{extends parent}\n{block content}C{/block}\n{block sidebar}S{/block}",
                ),
            ]);
            let err = builder.compile("child").unwrap_err();
            match err {
                CompileError::Extends { line, message, .. } => {
                    assert_eq!(line, 3);
                    assert!(message.contains("sidebar"), "message: {}", message);
                }
                other => panic!("expected extends error, got {:?}", other),
            }
        }

        #[test]
        fn should_reject_cyclic_inheritance() {
            let builder = builder(&[
                ("a", "{extends b}"),
                ("b", "{extends a}"),
            ]);
            let err = builder.compile("a").unwrap_err();
            match &err {
                CompileError::Extends { cause, .. } => {
                    let inner = cause.as_deref().expect("inner error");
                    assert!(matches!(inner, CompileError::Extends { cause: None, .. }));
                }
                other => panic!("expected extends error, got {:?}", other),
            }
        }

        #[test]
        fn should_reject_duplicate_block_definitions() {
            let builder = builder(&[(
                "page",
                "{block x}1{/block}{block x}2{/block}",
            )]);
            let err = builder.compile("page").unwrap_err();
            assert!(matches!(err, CompileError::Syntax { .. }));
        }
    }
}
