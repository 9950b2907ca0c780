//! Character-level cursor over JSON source text.
//!
//! [`Scanner`] tracks the current offset, a 1-based line and 0-based column
//! for diagnostics, and supports exactly one step of pushback (enough for the
//! parser's single-character lookahead). Failures carry the source location
//! and a windowed excerpt of the surrounding text.

use crate::error::{tag_suffix, Error, ParseErrorKind, Result};

/// Number of characters shown in error context windows.
const CONTEXT_WINDOW: usize = 24;

pub(crate) struct Scanner {
    chars: Vec<char>,
    next: usize,
    line: usize,
    col: usize,
    last: char,
    // State saved for the one-step pushback.
    sb_line: usize,
    sb_col: usize,
    sb_last: char,
    // Pre-formatted debug tag suffix for errors.
    tag: String,
}

impl Scanner {
    pub(crate) fn new(source: &str, start_offset: usize, debug_tag: Option<&str>) -> Self {
        Scanner {
            chars: source.chars().collect(),
            next: start_offset,
            line: 1,
            col: 0,
            last: '\0',
            sb_line: 1,
            sb_col: 0,
            sb_last: '\0',
            tag: tag_suffix(debug_tag),
        }
    }

    /// Index of the next unread character.
    pub(crate) fn index(&self) -> usize {
        self.next
    }

    pub(crate) fn at_end(&self) -> bool {
        self.next >= self.chars.len()
    }

    /// Whether anything besides whitespace remains from the cursor on.
    /// Prescans once without moving the cursor.
    pub(crate) fn contains_non_white(&self) -> bool {
        self.chars[self.next.min(self.chars.len())..]
            .iter()
            .any(|&c| !is_white(c))
    }

    /// Reads the next character, failing with `UnexpectedEnd` at end of
    /// input. A `"\r\n"` or `"\n\r"` pair counts as a single line break.
    pub(crate) fn next(&mut self) -> Result<char> {
        match self.try_next() {
            Some(c) => Ok(c),
            None => Err(self.error(
                ParseErrorKind::UnexpectedEnd,
                "unexpected end of input".to_string(),
            )),
        }
    }

    /// Reads the next character, or `None` at end of input.
    pub(crate) fn try_next(&mut self) -> Option<char> {
        if self.at_end() {
            return None;
        }
        self.sb_last = self.last;
        self.sb_line = self.line;
        self.sb_col = self.col;
        let c = self.chars[self.next];
        self.next += 1;
        if c == '\n' || c == '\r' {
            if (c == '\n' && self.last != '\r') || (c == '\r' && self.last != '\n') {
                self.line += 1;
                self.col = 0;
            }
        } else {
            self.col += 1;
        }
        self.last = c;
        Some(c)
    }

    /// Skips whitespace and returns the next meaningful character, failing
    /// with `UnexpectedEnd` if the input runs out first.
    pub(crate) fn next_non_white(&mut self) -> Result<char> {
        loop {
            let c = self.next()?;
            if !is_white(c) {
                return Ok(c);
            }
        }
    }

    /// Like [`next_non_white`](Self::next_non_white) but returns `None`
    /// instead of failing at end of input.
    pub(crate) fn try_next_non_white(&mut self) -> Option<char> {
        loop {
            match self.try_next() {
                Some(c) if is_white(c) => continue,
                Some(c) => return Some(c),
                None => return None,
            }
        }
    }

    /// Consumes the given literal tail, comparing case-sensitively. On the
    /// first differing character it pushes that character back and returns
    /// `false`, so errors report the location of the mismatch.
    pub(crate) fn expect_literal(&mut self, tail: &str) -> Result<bool> {
        for expected in tail.chars() {
            if self.next()? != expected {
                self.step_back();
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Pushes the last read character back. Only valid directly after a
    /// successful read; restores the previous line and column.
    pub(crate) fn step_back(&mut self) {
        self.next -= 1;
        self.last = self.sb_last;
        self.line = self.sb_line;
        self.col = self.sb_col;
    }

    /// The text between `start` and the cursor.
    pub(crate) fn substring_from(&self, start: usize) -> String {
        self.chars[start..self.next].iter().collect()
    }

    /// Builds a parse error at the current location with a windowed context
    /// excerpt ending at the cursor.
    pub(crate) fn error(&self, kind: ParseErrorKind, msg: String) -> Error {
        Error::Parse {
            kind,
            msg,
            line: self.line,
            col: self.col,
            context: self.context_window(CONTEXT_WINDOW),
            tag: self.tag.clone(),
        }
    }

    /// Up to `count` characters ending at the cursor, with `...` markers on
    /// whichever sides were truncated.
    fn context_window(&self, count: usize) -> String {
        let end = self.next.min(self.chars.len());
        let start = end.saturating_sub(count);
        if start == end {
            return String::new();
        }
        let mut out = String::new();
        if start > 0 {
            out.push_str("...");
        }
        out.extend(&self.chars[start..end]);
        if end < self.chars.len() {
            out.push_str("...");
        }
        out
    }
}

pub(crate) fn is_white(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}
