//! The nesting state machine.

use tagcheck_tokenizer::{Span, Token, TokenKind};
use tracing::trace;

use crate::Diagnostic;

/// An open tag waiting for its closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'src> {
    pub name: &'src str,
    pub line: u32,
    pub column: u32,
    pub span: Span,
}

/// Tracks open tags and collects diagnostics, one token at a time.
///
/// A closing tag that does not match the innermost open tag is reported and
/// then ignored: the open tag stays on the stack. This keeps one stray closer
/// from unwinding everything after it, at the cost of follow-up diagnostics
/// when the real problem was a missing closer. For `<a><b></a></b>` the
/// `</a>` is a mismatch, `</b>` then closes `b`, and `a` is reported as
/// unclosed at the end.
#[derive(Debug, Default)]
pub struct Checker<'src> {
    stack: Vec<Frame<'src>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Checker<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next token in document order.
    pub fn feed(&mut self, token: &Token<'src>) {
        if !token.kind.is_structural() {
            return;
        }

        if token.kind == TokenKind::Open {
            trace!("push <{}> (depth {})", token.name, self.stack.len() + 1);
            self.stack.push(Frame {
                name: token.name,
                line: token.line,
                column: token.column,
                span: token.span,
            });
            return;
        }

        match self.stack.last() {
            None => {
                trace!("extra </{}> on line {}", token.name, token.line);
                self.diagnostics.push(Diagnostic::extra_closing(token));
            }
            Some(top) if top.name == token.name => {
                trace!("pop <{}> (depth {})", token.name, self.stack.len());
                self.stack.pop();
            }
            Some(top) => {
                trace!(
                    "</{}> on line {} does not close <{}>",
                    token.name, token.line, top.name
                );
                self.diagnostics.push(Diagnostic::mismatch(token, top));
            }
        }
    }

    /// Currently open tags, oldest first.
    pub fn stack(&self) -> &[Frame<'src>] {
        &self.stack
    }

    /// Diagnostics produced so far, in scan order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Report every tag still open, oldest first, and return all diagnostics.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        for frame in &self.stack {
            self.diagnostics.push(Diagnostic::unclosed(frame));
        }
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticKind;
    use facet_testhelpers::test;
    use tagcheck_tokenizer::{Tokenizer, VoidElements};

    fn run(source: &str) -> Vec<Diagnostic> {
        let void = VoidElements::default();
        let mut checker = Checker::new();
        for token in Tokenizer::new(source, &void) {
            checker.feed(&token);
        }
        checker.finish()
    }

    #[test]
    fn test_balanced() {
        assert!(run("<a><b></b></a>").is_empty());
        assert!(run("").is_empty());
    }

    #[test]
    fn test_extra_closing_leaves_stack_alone() {
        let diagnostics = run("</a>");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ExtraClosing);
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(diagnostics[0].found, "a");
        assert_eq!(diagnostics[0].expected, None);
    }

    #[test]
    fn test_mismatch_keeps_frame() {
        let diagnostics = run("<a>\n<b>\n</a>\n</b>");
        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [DiagnosticKind::Mismatch, DiagnosticKind::UnclosedAtEnd]
        );

        let mismatch = &diagnostics[0];
        assert_eq!(mismatch.line, 3);
        assert_eq!(mismatch.expected.as_deref(), Some("b"));
        assert_eq!(mismatch.found, "a");
        assert_eq!(mismatch.opened_at, Some(2));

        // `</b>` closed `b`, which left `a` open.
        assert_eq!(diagnostics[1].found, "a");
        assert_eq!(diagnostics[1].line, 1);
    }

    #[test]
    fn test_unclosed_reported_oldest_first() {
        let diagnostics = run("<a>\n  <b>");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::UnclosedAtEnd));
        assert_eq!(
            diagnostics.iter().map(|d| (d.found.as_str(), d.line)).collect::<Vec<_>>(),
            [("a", 1), ("b", 2)]
        );
    }

    #[test]
    fn test_self_closing_has_no_effect() {
        assert!(run("<img><div><br/></div>").is_empty());
    }

    #[test]
    fn test_stack_snapshot() {
        let void = VoidElements::default();
        let mut checker = Checker::new();
        for token in Tokenizer::new("<main><nav></nav><section>", &void) {
            checker.feed(&token);
        }
        let names: Vec<_> = checker.stack().iter().map(|f| f.name).collect();
        assert_eq!(names, ["main", "section"]);
        assert!(checker.diagnostics().is_empty());
    }

    #[test]
    fn test_repeated_mismatch_against_same_frame() {
        let diagnostics = run("<div></span></p></div>");
        assert_eq!(diagnostics.len(), 2);
        assert!(
            diagnostics
                .iter()
                .all(|d| d.kind == DiagnosticKind::Mismatch && d.expected.as_deref() == Some("div"))
        );
    }
}
