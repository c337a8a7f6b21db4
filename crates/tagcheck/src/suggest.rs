//! Proposed fixes.
//!
//! A suggestion is only a description of an edit. Nothing here modifies text;
//! whoever applies an edit is responsible for re-auditing afterwards, since
//! one fix usually changes the diagnostics that follow it.

use std::fmt;

use tagcheck_tokenizer::Span;

use crate::{Diagnostic, DiagnosticKind};

/// A minimal text edit, in byte offsets of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Delete the text covered by `span`.
    Remove { span: Span },
    /// Insert `text` at the zero-width span `at`.
    Insert { at: Span, text: String },
}

/// A proposed fix for one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub edit: Edit,
    pub description: String,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Propose the smallest edit that resolves `diagnostic` on its own.
///
/// `source_len` is the byte length of the audited text; unclosed tags get
/// their closer appended at the end.
pub fn suggest(diagnostic: &Diagnostic, source_len: usize) -> Suggestion {
    match diagnostic.kind {
        DiagnosticKind::ExtraClosing => Suggestion {
            edit: Edit::Remove {
                span: diagnostic.span,
            },
            description: format!(
                "remove `</{}>` at line {}",
                diagnostic.found, diagnostic.line
            ),
        },
        DiagnosticKind::Mismatch => {
            let expected = diagnostic.expected.as_deref().unwrap_or_default();
            Suggestion {
                edit: Edit::Insert {
                    at: Span::at(diagnostic.span.start),
                    text: format!("</{}>", expected),
                },
                description: format!(
                    "insert `</{}>` before `</{}>` at line {}",
                    expected, diagnostic.found, diagnostic.line
                ),
            }
        }
        DiagnosticKind::UnclosedAtEnd => Suggestion {
            edit: Edit::Insert {
                at: Span::at(source_len as u32),
                text: format!("</{}>", diagnostic.found),
            },
            description: format!(
                "append `</{}>` to close the tag opened at line {}",
                diagnostic.found, diagnostic.line
            ),
        },
    }
}
