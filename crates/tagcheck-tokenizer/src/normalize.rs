//! Blanking of regions that must not be read as markup.
//!
//! Comments and template literals are overwritten with spaces, one space per
//! removed byte, and line breaks are kept where they were. The output always
//! has the same byte length as the input, so line numbers and spans computed
//! on it are valid for the original text.
//!
//! This is a best-effort lexical pass with no grammar behind it: a `//` inside
//! a quoted string (`"http://..."`) still truncates the line, and escaped
//! backticks are not recognised.

use std::borrow::Cow;

use tracing::trace;

/// Which regions [`normalize`] strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// `// ...` up to the end of the line.
    pub line_comments: bool,
    /// `/* ... */`, possibly spanning lines.
    pub block_comments: bool,
    /// `` `...` `` template literal bodies, possibly spanning lines.
    pub templates: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            line_comments: true,
            block_comments: true,
            templates: true,
        }
    }
}

impl NormalizeOptions {
    /// Options that strip nothing.
    pub fn verbatim() -> Self {
        Self {
            line_comments: false,
            block_comments: false,
            templates: false,
        }
    }

    fn strips_anything(&self) -> bool {
        self.line_comments || self.block_comments || self.templates
    }
}

/// Blank comments and template bodies out of `source`.
///
/// Returns the input unchanged (borrowed) when there was nothing to strip.
/// Unterminated block comments and template literals are left as they are.
pub fn normalize(source: &str, options: NormalizeOptions) -> Cow<'_, str> {
    if !options.strips_anything() {
        return Cow::Borrowed(source);
    }

    let bytes = source.as_bytes();
    let mut out: Option<String> = None;
    // Start of the not-yet-copied verbatim run.
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let blank = match bytes[pos] {
            b'`' if options.templates => {
                find_byte(bytes, pos + 1, b'`').map(|close| (pos + 1, close))
            }
            b'/' if options.line_comments && bytes.get(pos + 1) == Some(&b'/') => {
                let end = find_byte(bytes, pos, b'\n').unwrap_or(bytes.len());
                Some((pos, end))
            }
            b'/' if options.block_comments && bytes.get(pos + 1) == Some(&b'*') => {
                find_pair(bytes, pos + 2, b'*', b'/').map(|close| (pos, close + 2))
            }
            _ => None,
        };

        match blank {
            Some((start, end)) => {
                trace!("Blanking {}..{}", start, end);
                let buf = out.get_or_insert_with(|| String::with_capacity(source.len()));
                buf.push_str(&source[copied..start]);
                push_blank(buf, &source[start..end]);
                copied = end;
                // A template's closing backtick is copied verbatim later.
                pos = if bytes[pos] == b'`' { end + 1 } else { end };
            }
            None => pos += 1,
        }
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&source[copied..]);
            debug_assert_eq!(buf.len(), source.len());
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(source),
    }
}

fn push_blank(buf: &mut String, region: &str) {
    for c in region.chars() {
        match c {
            '\n' | '\r' => buf.push(c),
            _ => buf.extend(std::iter::repeat_n(' ', c.len_utf8())),
        }
    }
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}

fn find_pair(bytes: &[u8], from: usize, first: u8, second: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(2)
        .position(|w| w[0] == first && w[1] == second)
        .map(|i| from + i)
}
