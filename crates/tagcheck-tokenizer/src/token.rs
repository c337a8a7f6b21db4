//! Tag tokens.

use crate::Span;

/// How a tag affects the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
#[cfg_attr(feature = "facet", repr(u8))]
pub enum TokenKind {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
    /// `<name ... />` or a void element such as `<br>`
    SelfClosing,
}

impl TokenKind {
    /// Whether a token of this kind changes the nesting stack.
    pub fn is_structural(&self) -> bool {
        !matches!(self, TokenKind::SelfClosing)
    }
}

/// A tag found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Tag identifier, without `<`, `/` or attributes.
    pub name: &'src str,
    /// Span of the whole tag, `<` through `>`.
    pub span: Span,
    /// 1-based line of the `<`.
    pub line: u32,
    /// 1-based column of the `<`, counted in characters.
    pub column: u32,
    /// The tag as written, attributes included.
    pub text: &'src str,
}
