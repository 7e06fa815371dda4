use phtml_compiler::{Builder, CompileError, MemoryLoader};

fn builder(templates: &[(&str, &str)]) -> Builder {
    let mut loader = MemoryLoader::new();
    for (name, content) in templates {
        loader.add(*name, *content);
    }
    Builder::new(loader)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod single_imports {
        use super::*;

        #[test]
        fn should_splice_the_imported_template_at_the_marker() {
            let builder = builder(&[
                ("page", "<p>before</p>{import box}<p>after</p>"),
                ("box", "<b>boxed</b>"),
            ]);
            let result = builder.compile("page").unwrap();
            assert_eq!(result.content, "<p>before</p><b>boxed</b><p>after</p>");
        }

        #[test]
        fn should_list_contributing_paths_in_first_encountered_order() {
            let builder = builder(&[
                ("a", "{import b}"),
                ("b", "x{import c}"),
                ("c", "y"),
            ]);
            let result = builder.compile("a").unwrap();
            assert_eq!(
                result.paths,
                vec![
                    "/templates/a.phtml",
                    "/templates/b.phtml",
                    "/templates/c.phtml",
                ]
            );
        }

        #[test]
        fn should_list_a_template_once_even_when_imported_twice() {
            let builder = builder(&[("a", "{import b}{import b}"), ("b", "x")]);
            let result = builder.compile("a").unwrap();
            assert_eq!(result.content, "xx");
            assert_eq!(
                result.paths,
                vec!["/templates/a.phtml", "/templates/b.phtml"]
            );
        }

        #[test]
        fn should_resolve_the_imports_of_the_imported_template() {
            let builder = builder(&[
                ("outer", "[{import middle}]"),
                ("middle", "({import inner})"),
                ("inner", "core"),
            ]);
            let result = builder.compile("outer").unwrap();
            assert_eq!(result.content, "[(core)]");
        }
    }

    mod bundle_imports {
        use super::*;

        #[test]
        fn should_expand_every_template_in_the_namespace_as_a_named_tag() {
            let builder = builder(&[
                ("widgets/badge", "B"),
                ("widgets/card", "C"),
                ("page", "{import widgets/*}"),
            ]);
            let result = builder.compile("page").unwrap();
            assert_eq!(result.content, "<badge>B</badge><card>C</card>");
        }

        #[test]
        fn should_expand_an_empty_namespace_to_nothing() {
            let builder = builder(&[("page", "a{import widgets/*}b")]);
            let result = builder.compile("page").unwrap();
            assert_eq!(result.content, "ab");
        }
    }

    mod cycles {
        use super::*;

        #[test]
        fn should_fail_on_a_direct_self_import() {
            let builder = builder(&[("a", "line one\n{import a}")]);
            let err = builder.compile("a").unwrap_err();
            match err {
                CompileError::Import {
                    path,
                    line,
                    template,
                    cause,
                    ..
                } => {
                    assert_eq!(path, "/templates/a.phtml");
                    assert_eq!(line, 2);
                    assert_eq!(template, "a");
                    assert!(cause.is_none());
                }
                other => panic!("expected import error, got {:?}", other),
            }
        }

        #[test]
        fn should_fail_on_a_transitive_cycle_at_the_closing_edge() {
            let builder = builder(&[("a", "{import b}"), ("b", "{import a}")]);
            let err = builder.compile("a").unwrap_err();
            // The outer error is a's import of b; the closing edge sits in
            // b, importing a while a is still in progress.
            match &err {
                CompileError::Import { path, cause, .. } => {
                    assert_eq!(path, "/templates/a.phtml");
                    match cause.as_deref() {
                        Some(CompileError::Import { path, cause, .. }) => {
                            assert_eq!(path, "/templates/b.phtml");
                            assert!(cause.is_none());
                        }
                        other => panic!("expected inner import error, got {:?}", other),
                    }
                }
                other => panic!("expected import error, got {:?}", other),
            }
        }
    }

    mod failure_chains {
        use super::*;

        #[test]
        fn should_wrap_a_missing_template_with_the_import_site() {
            let builder = builder(&[("a", "x\ny\n{import ghost}")]);
            let err = builder.compile("a").unwrap_err();
            assert_eq!(err.file(), Some("/templates/a.phtml"));
            assert_eq!(err.line(), Some(3));
            assert!(matches!(err.root_cause(), CompileError::Loader { .. }));
        }

        #[test]
        fn should_preserve_the_inner_syntax_error_file_and_line() {
            let builder = builder(&[
                ("a", "ok\n{import broken}"),
                ("broken", "fine line\n{if $x}\nno close"),
            ]);
            let err = builder.compile("a").unwrap_err();

            // Outer: the import site in a.
            assert_eq!(err.file(), Some("/templates/a.phtml"));
            assert_eq!(err.line(), Some(2));

            // Inner: the unterminated construct in the imported file.
            let inner = err.root_cause();
            assert_eq!(inner.file(), Some("/templates/broken.phtml"));
            assert_eq!(inner.line(), Some(2));

            // The chain is also visible through std::error::Error.
            let source = std::error::Error::source(&err);
            assert!(source.is_some());
        }
    }
}
