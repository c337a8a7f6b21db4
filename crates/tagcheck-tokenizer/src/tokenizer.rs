//! Tag tokenizer.
//!
//! A tag is `<`, an optional `/`, an identifier made of ASCII letters, digits,
//! `.` and `-`, then any attribute text up to the first `>` on the same line.
//! Anything else, including a `<` that does not start such a construct, is
//! skipped.

use crate::{Span, Token, TokenKind, VoidElements};
use tracing::trace;

/// Yields the tags of a (normalized) text in document order.
#[derive(Clone)]
pub struct Tokenizer<'src, 'v> {
    /// The text being tokenized.
    source: &'src str,
    /// Current byte position in `source`.
    pos: usize,
    /// 1-based number of the line containing `pos`.
    line: u32,
    /// Byte offset up to which `column` has been counted.
    column_pos: usize,
    /// Characters between the start of the line and `column_pos`.
    column: u32,
    void_elements: &'v VoidElements,
}

/// A syntactic match, before classification.
struct RawTag<'src> {
    closing: bool,
    name: &'src str,
    attributes: &'src str,
    start: usize,
    end: usize,
}

impl<'src, 'v> Tokenizer<'src, 'v> {
    pub fn new(source: &'src str, void_elements: &'v VoidElements) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column_pos: 0,
            column: 0,
            void_elements,
        }
    }

    /// The line the tokenizer is currently on.
    ///
    /// After the iterator returns `None` this is the number of the last line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Try to match a tag whose `<` is at `start`.
    fn scan_tag(&self, start: usize) -> Option<RawTag<'src>> {
        let bytes = self.source.as_bytes();
        let mut i = start + 1;

        let closing = bytes.get(i) == Some(&b'/');
        if closing {
            i += 1;
        }

        let name_start = i;
        while bytes.get(i).is_some_and(|&b| is_name_byte(b)) {
            i += 1;
        }
        if i == name_start {
            return None;
        }

        // Attributes run to the first `>`; a line break first means no tag.
        let rel = self.source[i..].find(['>', '\n'])?;
        if bytes[i + rel] != b'>' {
            return None;
        }

        Some(RawTag {
            closing,
            name: &self.source[name_start..i],
            attributes: &self.source[i..i + rel],
            start,
            end: i + rel + 1,
        })
    }

    /// Decide what a matched tag means, or drop it.
    fn classify(&mut self, raw: RawTag<'src>) -> Option<Token<'src>> {
        let source = self.source;
        let text = &source[raw.start..raw.end];

        // `<item.label` and friends are expressions, not elements.
        if raw.name.contains('.') {
            trace!("Skipping member access {:?} on line {}", text, self.line);
            return None;
        }

        let kind = if raw.attributes.trim_end().ends_with('/')
            || self.void_elements.contains(raw.name)
        {
            TokenKind::SelfClosing
        } else if raw.closing {
            TokenKind::Close
        } else {
            TokenKind::Open
        };

        let column = self.column_at(raw.start);
        let token = Token {
            kind,
            name: raw.name,
            span: Span::from(raw.start..raw.end),
            line: self.line,
            column,
            text,
        };
        trace!("Token {:?} {:?} at {}:{}", kind, raw.name, self.line, column);
        Some(token)
    }

    /// 1-based character column of `offset`, which must not precede the last
    /// offset asked for on this line.
    fn column_at(&mut self, offset: usize) -> u32 {
        self.column += self.source[self.column_pos..offset].chars().count() as u32;
        self.column_pos = offset;
        self.column + 1
    }
}

impl<'src> Iterator for Tokenizer<'src, '_> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(rel) = self.source[self.pos..].find(['<', '\n']) else {
                self.pos = self.source.len();
                return None;
            };
            let at = self.pos + rel;

            if self.source.as_bytes()[at] == b'\n' {
                self.line += 1;
                self.column_pos = at + 1;
                self.column = 0;
                self.pos = at + 1;
                continue;
            }

            match self.scan_tag(at) {
                Some(raw) => {
                    self.pos = raw.end;
                    if let Some(token) = self.classify(raw) {
                        return Some(token);
                    }
                }
                None => self.pos = at + 1,
            }
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_, '_> {}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-'
}
