//! Audit findings and their rendering.

use ariadne::{Color, Label, Report, ReportKind, Source};
use tagcheck_tokenizer::{Span, Token};

use crate::checker::Frame;

/// The kind of imbalance found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
#[cfg_attr(feature = "facet", repr(u8))]
pub enum DiagnosticKind {
    /// A closing tag with nothing open.
    ExtraClosing,
    /// A closing tag whose name differs from the innermost open tag.
    Mismatch,
    /// A tag still open when the input ended.
    UnclosedAtEnd,
}

impl DiagnosticKind {
    /// Stable kebab-case name, used in machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::ExtraClosing => "extra-closing",
            DiagnosticKind::Mismatch => "mismatch",
            DiagnosticKind::UnclosedAtEnd => "unclosed-at-end",
        }
    }
}

/// A single imbalance, located in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line of the offending tag. For [`DiagnosticKind::UnclosedAtEnd`]
    /// this is where the tag was opened.
    pub line: u32,
    /// 1-based column of the offending tag.
    pub column: u32,
    /// Span of the offending tag.
    pub span: Span,
    /// Name the checker expected to be closed (mismatches only).
    pub expected: Option<String>,
    /// Name of the offending tag.
    pub found: String,
    /// Line where the expected (mismatch) or unclosed tag was opened.
    pub opened_at: Option<u32>,
    /// Span of that opening tag.
    pub opened_span: Option<Span>,
    /// Human-readable, single-line description.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn extra_closing(token: &Token<'_>) -> Self {
        Self {
            kind: DiagnosticKind::ExtraClosing,
            line: token.line,
            column: token.column,
            span: token.span,
            expected: None,
            found: token.name.to_string(),
            opened_at: None,
            opened_span: None,
            message: format!(
                "extra closing tag `</{}>` at line {}",
                token.name, token.line
            ),
        }
    }

    pub(crate) fn mismatch(token: &Token<'_>, open: &Frame<'_>) -> Self {
        Self {
            kind: DiagnosticKind::Mismatch,
            line: token.line,
            column: token.column,
            span: token.span,
            expected: Some(open.name.to_string()),
            found: token.name.to_string(),
            opened_at: Some(open.line),
            opened_span: Some(open.span),
            message: format!(
                "mismatch at line {}: found `</{}>`, expected `</{}>`, opened at line {}",
                token.line, token.name, open.name, open.line
            ),
        }
    }

    pub(crate) fn unclosed(open: &Frame<'_>) -> Self {
        Self {
            kind: DiagnosticKind::UnclosedAtEnd,
            line: open.line,
            column: open.column,
            span: open.span,
            expected: None,
            found: open.name.to_string(),
            opened_at: Some(open.line),
            opened_span: Some(open.span),
            message: format!("unclosed `<{}>` opened at line {}", open.name, open.line),
        }
    }

    /// Render this diagnostic with ariadne.
    ///
    /// `source` must be the original, unnormalized text the audit ran on.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        if self.write_report(filename, source, &mut output).is_err() {
            return self.message.clone();
        }
        String::from_utf8(output).unwrap_or_else(|_| self.message.clone())
    }

    /// Write the report to a writer.
    pub fn write_report<W: std::io::Write>(
        &self,
        filename: &str,
        source: &str,
        writer: W,
    ) -> std::io::Result<()> {
        self.build_report(filename)
            .finish()
            .write((filename, Source::from(source)), writer)
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();

        match self.kind {
            DiagnosticKind::ExtraClosing => Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message(format!("extra closing tag `</{}>`", self.found))
                .with_label(
                    Label::new((filename, range))
                        .with_message("nothing is open here")
                        .with_color(Color::Red),
                )
                .with_help("remove this tag, or add the matching opening tag above it"),

            DiagnosticKind::Mismatch => {
                let expected = self.expected.as_deref().unwrap_or_default();
                let mut report = Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!(
                        "found `</{}>`, expected `</{}>`",
                        self.found, expected
                    ))
                    .with_label(
                        Label::new((filename, range))
                            .with_message(format!("`<{}>` is still open", expected))
                            .with_color(Color::Red),
                    )
                    .with_help(format!(
                        "close `<{}>` before this tag; later diagnostics may be a consequence of this one",
                        expected
                    ));
                if let Some(opened) = self.opened_span {
                    let opened: std::ops::Range<usize> = opened.into();
                    report = report.with_label(
                        Label::new((filename, opened))
                            .with_message("opened here")
                            .with_color(Color::Blue),
                    );
                }
                report
            }

            DiagnosticKind::UnclosedAtEnd => Report::build(ReportKind::Error, (filename, range.clone()))
                .with_message(format!("unclosed `<{}>`", self.found))
                .with_label(
                    Label::new((filename, range))
                        .with_message("opened here, never closed")
                        .with_color(Color::Red),
                )
                .with_help(format!("add a closing `</{}>`", self.found)),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
