//! Element names that never take a closing tag.

use std::collections::BTreeSet;

/// Names treated as self-closing when no set is configured.
pub const DEFAULT_VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

/// A set of tag names that are always self-closing.
///
/// Matching is exact and case-sensitive, so `<Input>` (a component) is not
/// the same as `<input>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoidElements {
    names: BTreeSet<String>,
}

impl VoidElements {
    /// A set with no names at all; every tag must be balanced.
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Add a name. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for VoidElements {
    fn default() -> Self {
        DEFAULT_VOID_ELEMENTS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for VoidElements {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for VoidElements {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_default_set() {
        let void = VoidElements::default();
        assert_eq!(void.iter().collect::<Vec<_>>(), ["br", "hr", "img", "input"]);
        assert!(!void.contains("div"));
    }

    #[test]
    fn test_case_sensitive() {
        let void = VoidElements::default();
        assert!(void.contains("input"));
        assert!(!void.contains("Input"));
    }

    #[test]
    fn test_extend_and_insert() {
        let mut void = VoidElements::empty();
        assert!(void.is_empty());
        void.extend(["meta", "link"]);
        assert!(void.insert("source"));
        assert!(!void.insert("meta"));
        assert_eq!(void.len(), 3);
    }
}
