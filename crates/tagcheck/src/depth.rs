//! Brace and parenthesis depth, and per-line snapshots of the nesting state.
//!
//! Tag imbalance in JSX often comes together with a stray `}` or `)` from a
//! broken `{cond && (...)}` block, so the auditor can also report how deep
//! those delimiters are. Counting is plain character counting on the
//! normalized text; braces inside string literals are counted too.

use std::fmt;

/// Net nesting depth of `{}` and `()`.
///
/// Negative values mean more closers than openers so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelimiterDepth {
    pub braces: i64,
    pub parens: i64,
}

impl DelimiterDepth {
    pub fn is_balanced(&self) -> bool {
        self.braces == 0 && self.parens == 0
    }

    fn count(&mut self, c: char) {
        match c {
            '{' => self.braces += 1,
            '}' => self.braces -= 1,
            '(' => self.parens += 1,
            ')' => self.parens -= 1,
            _ => {}
        }
    }
}

impl fmt::Display for DelimiterDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "braces {}, parens {}", self.braces, self.parens)
    }
}

/// Net delimiter depth over the whole text.
pub fn delimiter_depth(text: &str) -> DelimiterDepth {
    let mut depth = DelimiterDepth::default();
    text.chars().for_each(|c| depth.count(c));
    depth
}

/// Cumulative depth at the end of every line; index 0 is line 1.
pub(crate) fn line_depths(text: &str) -> Vec<DelimiterDepth> {
    let mut depth = DelimiterDepth::default();
    text.split('\n')
        .map(|line| {
            line.chars().for_each(|c| depth.count(c));
            depth
        })
        .collect()
}

/// The nesting state after a given line has been processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// 1-based line number.
    pub line: u32,
    /// Open tags, oldest first.
    pub open_tags: Vec<String>,
    /// Delimiter depth up to and including this line.
    pub depth: DelimiterDepth,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: stack [{}], {}",
            self.line,
            self.open_tags.join(", "),
            self.depth
        )
    }
}
