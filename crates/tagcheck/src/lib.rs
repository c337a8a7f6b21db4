#![doc = include_str!("../README.md")]
//! Markup balance auditing.
//!
//! [`audit`] scans text for tag-like markup, checks that open and close tags
//! nest properly, and returns every imbalance as a [`Diagnostic`]. It never
//! fails: malformed input just produces diagnostics.

use tagcheck_tokenizer::{Tokenizer, normalize};
use tracing::debug;

pub use tagcheck_tokenizer::{
    DEFAULT_VOID_ELEMENTS, NormalizeOptions, Span, Token, TokenKind, VoidElements,
};

mod checker;
pub use checker::{Checker, Frame};

mod depth;
pub use depth::{DelimiterDepth, Probe, delimiter_depth};

mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind};

mod options;
pub use options::AuditOptions;

mod report;
pub use report::{Summary, format, is_balanced};

mod suggest;
pub use suggest::{Edit, Suggestion, suggest};

/// Audit `text` with the given void elements and default normalization.
pub fn audit(text: &str, void_elements: &VoidElements) -> Vec<Diagnostic> {
    Auditor::new(AuditOptions::default().void_elements(void_elements.clone())).audit(text)
}

/// Runs audits with a fixed set of options.
///
/// Holds no state between calls; auditing the same text twice gives the same
/// diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    options: AuditOptions,
}

impl Auditor {
    pub fn new(options: AuditOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Check tag nesting in `text`.
    ///
    /// Diagnostics come in scan order, followed by one
    /// [`DiagnosticKind::UnclosedAtEnd`] per tag left open, oldest first.
    pub fn audit(&self, text: &str) -> Vec<Diagnostic> {
        let normalized = normalize(text, self.options.normalize);
        let mut checker = Checker::new();
        for token in Tokenizer::new(&normalized, &self.options.void_elements) {
            checker.feed(&token);
        }
        let diagnostics = checker.finish();
        debug!(
            "audited {} bytes: {}",
            text.len(),
            Summary::of(&diagnostics)
        );
        diagnostics
    }

    /// Net `{}` and `()` depth of `text`, ignoring comments and templates.
    pub fn delimiters(&self, text: &str) -> DelimiterDepth {
        delimiter_depth(&normalize(text, self.options.normalize))
    }

    /// Snapshot the open tags and delimiter depth at the end of each of
    /// `lines`.
    ///
    /// Probes come back in ascending line order without duplicates. Line 0
    /// and lines past the end of the text are skipped.
    pub fn probe(&self, text: &str, lines: &[u32]) -> Vec<Probe> {
        let normalized = normalize(text, self.options.normalize);
        let depths = depth::line_depths(&normalized);
        let last_line = depths.len() as u32;

        let mut wanted: Vec<u32> = lines
            .iter()
            .copied()
            .filter(|&line| line >= 1 && line <= last_line)
            .collect();
        wanted.sort_unstable();
        wanted.dedup();

        let mut probes = Vec::with_capacity(wanted.len());
        let mut pending = wanted.into_iter().peekable();
        let mut checker = Checker::new();

        let snapshot = |checker: &Checker<'_>, line: u32| Probe {
            line,
            open_tags: checker.stack().iter().map(|f| f.name.to_string()).collect(),
            depth: depths[line as usize - 1],
        };

        for token in Tokenizer::new(&normalized, &self.options.void_elements) {
            while let Some(line) = pending.next_if(|&line| line < token.line) {
                probes.push(snapshot(&checker, line));
            }
            checker.feed(&token);
        }
        for line in pending {
            probes.push(snapshot(&checker, line));
        }

        debug!("took {} probes", probes.len());
        probes
    }
}

#[cfg(test)]
mod tests;
