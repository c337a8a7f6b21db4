//! Options for an audit.

use tagcheck_tokenizer::{NormalizeOptions, VoidElements};

/// Options for [`Auditor`](crate::Auditor).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditOptions {
    /// Tag names always treated as self-closing (default: `br`, `hr`, `img`, `input`)
    pub void_elements: VoidElements,

    /// Which comment and template regions are blanked before tokenizing
    /// (default: all of them)
    pub normalize: NormalizeOptions,
}

impl AuditOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the void element set.
    pub fn void_elements(mut self, void_elements: VoidElements) -> Self {
        self.void_elements = void_elements;
        self
    }

    /// Add one name to the void element set.
    pub fn with_void(mut self, name: impl Into<String>) -> Self {
        self.void_elements.insert(name);
        self
    }

    /// Read tags inside `// ...` comments.
    pub fn keep_line_comments(mut self) -> Self {
        self.normalize.line_comments = false;
        self
    }

    /// Read tags inside `/* ... */` comments.
    pub fn keep_block_comments(mut self) -> Self {
        self.normalize.block_comments = false;
        self
    }

    /// Read tags inside template literals.
    pub fn keep_templates(mut self) -> Self {
        self.normalize.templates = false;
        self
    }
}
