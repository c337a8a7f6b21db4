//! Plain-text reporting.

use std::fmt;

use crate::{Diagnostic, DiagnosticKind};

/// One human-readable line per diagnostic, in order.
pub fn format(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}

/// Whether an audit found nothing wrong.
pub fn is_balanced(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.is_empty()
}

/// Counts of diagnostics per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub extra_closing: usize,
    pub mismatches: usize,
    pub unclosed: usize,
}

impl Summary {
    pub fn of(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Summary::default();
        for diagnostic in diagnostics {
            match diagnostic.kind {
                DiagnosticKind::ExtraClosing => summary.extra_closing += 1,
                DiagnosticKind::Mismatch => summary.mismatches += 1,
                DiagnosticKind::UnclosedAtEnd => summary.unclosed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.extra_closing + self.mismatches + self.unclosed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total() {
            0 => f.write_str("balanced"),
            total => write!(
                f,
                "{} problem{}: {} extra closing, {} mismatched, {} unclosed",
                total,
                if total == 1 { "" } else { "s" },
                self.extra_closing,
                self.mismatches,
                self.unclosed
            ),
        }
    }
}
