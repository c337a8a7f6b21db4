use super::*;
use facet_testhelpers::test;

fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(|d| d.kind).collect()
}

fn default_audit(text: &str) -> Vec<Diagnostic> {
    audit(text, &VoidElements::default())
}

#[test]
fn test_nested_balanced() {
    assert!(default_audit("<a><b></b></a>").is_empty());
}

#[test]
fn test_crossed_closers() {
    let diagnostics = default_audit("<a><b></a></b>");
    assert_eq!(
        kinds(&diagnostics),
        [DiagnosticKind::Mismatch, DiagnosticKind::UnclosedAtEnd]
    );
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(diagnostics[0].expected.as_deref(), Some("b"));
    assert_eq!(diagnostics[0].found, "a");
    assert_eq!(diagnostics[1].found, "a");
}

#[test]
fn test_lone_closer() {
    let diagnostics = default_audit("</a>");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::ExtraClosing]);
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(diagnostics[0].found, "a");
}

#[test]
fn test_unclosed_in_open_order() {
    let diagnostics = default_audit("<a><b>");
    assert_eq!(
        kinds(&diagnostics),
        [DiagnosticKind::UnclosedAtEnd, DiagnosticKind::UnclosedAtEnd]
    );
    assert_eq!(diagnostics[0].found, "a");
    assert_eq!(diagnostics[1].found, "b");
}

#[test]
fn test_void_element_never_pushed() {
    assert!(default_audit("<img><div></div>").is_empty());
}

#[test]
fn test_member_access_ignored() {
    assert!(default_audit("<obj.prop>").is_empty());
}

#[test]
fn test_empty_void_set_requires_closers() {
    let diagnostics = audit("<br>", &VoidElements::empty());
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::UnclosedAtEnd]);
}

#[test]
fn test_line_numbers_survive_block_comment() {
    let source = "<div>\n/*\n  <span>\n  </p>\n*/\n  <section>\n</div>";
    let diagnostics = default_audit(source);
    assert_eq!(
        kinds(&diagnostics),
        [DiagnosticKind::Mismatch, DiagnosticKind::UnclosedAtEnd, DiagnosticKind::UnclosedAtEnd]
    );
    assert_eq!(diagnostics[0].line, 7);
    assert_eq!(diagnostics[0].expected.as_deref(), Some("section"));
    assert_eq!(diagnostics[0].opened_at, Some(6));
    assert_eq!(diagnostics[2].line, 6);
}

#[test]
fn test_spans_point_into_original_text() {
    let source = "const t = `<b>`; // <i>\n</em>";
    let diagnostics = default_audit(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span.slice(source), "</em>");
    assert_eq!(diagnostics[0].column, 1);
}

#[test]
fn test_tags_in_comments_and_templates_ignored() {
    let source = r#"
        // <div>
        /* </section> */
        const html = `
            <ul>
        `;
        <p>ok</p>
    "#;
    assert!(default_audit(source).is_empty());
}

#[test]
fn test_keep_options_read_stripped_regions() {
    let auditor = Auditor::new(AuditOptions::new().keep_line_comments());
    assert_eq!(
        kinds(&auditor.audit("// <div>")),
        [DiagnosticKind::UnclosedAtEnd]
    );

    let auditor = Auditor::new(AuditOptions::new().keep_templates());
    assert_eq!(kinds(&auditor.audit("`</ul>`")), [DiagnosticKind::ExtraClosing]);

    let auditor = Auditor::new(AuditOptions::new().keep_block_comments());
    assert_eq!(kinds(&auditor.audit("/* <b> */")), [DiagnosticKind::UnclosedAtEnd]);
}

#[test]
fn test_with_void_extends_defaults() {
    let auditor = Auditor::new(AuditOptions::new().with_void("meta"));
    assert!(auditor.audit("<meta charset=\"utf-8\"><br>").is_empty());
}

#[test]
fn test_audit_twice_is_identical() {
    let source = "<a>\n</b>\n<c></a>\n";
    let auditor = Auditor::default();
    assert_eq!(auditor.audit(source), auditor.audit(source));
}

#[test]
fn test_jsx_component() {
    let source = r#"
export function Card({ plan }: Props) {
    return (
        <div className="card">
            {plan.items.length > 0 && (
                <ul>
                    {plan.items.map((item) => (
                        <li key={item.id}>{item.label}<br /></li>
                    ))}
                </ul>
            )}
            <Button onClick={() => save(plan)}>Save</Button>
        </div>
    );
}
"#;
    let auditor = Auditor::default();
    assert!(auditor.audit(source).is_empty());
    assert!(auditor.delimiters(source).is_balanced());
}

#[test]
fn test_probe_reports_stack_at_end_of_line() {
    let source = "<main>\n  <nav>\n  </nav>\n  <div>{x && (\n  </div>\n</main>";
    let probes = Auditor::default().probe(source, &[4, 2, 99, 0, 2, 6]);
    let lines: Vec<_> = probes.iter().map(|p| p.line).collect();
    assert_eq!(lines, [2, 4, 6]);

    assert_eq!(probes[0].open_tags, ["main", "nav"]);
    assert_eq!(probes[1].open_tags, ["main", "div"]);
    assert_eq!(
        probes[1].depth,
        DelimiterDepth {
            braces: 1,
            parens: 1
        }
    );
    assert!(probes[2].open_tags.is_empty());
}

#[test]
fn test_probe_line_without_tags() {
    let source = "<a>\n\n\n";
    let probes = Auditor::default().probe(source, &[1, 3]);
    assert_eq!(probes[0].open_tags, ["a"]);
    assert_eq!(probes[1].open_tags, ["a"]);
}

mod properties {
    use crate::{Auditor, DEFAULT_VOID_ELEMENTS, VoidElements, audit};
    use proptest::prelude::*;

    /// Tag names that are never void elements by default
    fn tag_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,6}".prop_filter("not a void element", |name| {
            !DEFAULT_VOID_ELEMENTS.contains(&name.as_str())
        })
    }

    /// Text content without any markup characters
    fn text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 {}()\n]{0,12}"
    }

    /// A properly nested element (recursive)
    fn element(depth: usize) -> BoxedStrategy<String> {
        if depth == 0 {
            prop_oneof![
                text(),
                tag_name().prop_map(|name| format!("<{name} />")),
                tag_name().prop_map(|name| format!("<{name}></{name}>")),
            ]
            .boxed()
        } else {
            prop_oneof![
                2 => element(0),
                1 => (tag_name(), prop::collection::vec(element(depth - 1), 0..4)).prop_map(
                    |(name, children)| format!("<{name} id=\"x\">\n{}</{name}>", children.concat())
                ),
            ]
            .boxed()
        }
    }

    fn document() -> impl Strategy<Value = String> {
        prop::collection::vec(element(3), 1..5).prop_map(|parts| parts.join("\n"))
    }

    proptest! {
        /// Properly nested documents never produce diagnostics
        #[test]
        fn well_formed_is_balanced(doc in document()) {
            let diagnostics = audit(&doc, &VoidElements::default());
            prop_assert!(diagnostics.is_empty(), "{doc:?} gave {diagnostics:?}");
        }

        /// Auditing the same text twice gives the same answer
        #[test]
        fn audit_is_idempotent(text in "[<>/ab. \n`*]{0,64}") {
            let auditor = Auditor::default();
            prop_assert_eq!(auditor.audit(&text), auditor.audit(&text));
        }

        /// Every diagnostic points at a real line and a tag in the original text
        #[test]
        fn diagnostics_point_at_tags(text in "[<>/abc \n]{0,64}") {
            let line_count = text.split('\n').count() as u32;
            for diagnostic in audit(&text, &VoidElements::default()) {
                prop_assert!(diagnostic.line >= 1 && diagnostic.line <= line_count);
                let tag = diagnostic.span.slice(&text);
                prop_assert!(tag.starts_with('<') && tag.ends_with('>'));
                prop_assert!(tag.contains(diagnostic.found.as_str()));
            }
        }
    }
}
