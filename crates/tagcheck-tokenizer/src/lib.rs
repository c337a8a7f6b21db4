//! Tokenizer for tag-like markup embedded in source files.
//!
//! Two stages live here: [`normalize`] blanks out comments and template
//! literals without moving any byte, and [`Tokenizer`] walks the result and
//! yields open, close and self-closing tags with their line numbers.

mod normalize;
pub use normalize::{NormalizeOptions, normalize};

mod span;
pub use span::Span;

mod token;
pub use token::{Token, TokenKind};

mod tokenizer;
pub use tokenizer::Tokenizer;

mod void;
pub use void::{DEFAULT_VOID_ELEMENTS, VoidElements};
