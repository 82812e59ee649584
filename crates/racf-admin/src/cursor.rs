//! Sequential cursor over report lines.
//!
//! Interpreters consume a report strictly left to right. They may look at
//! most [`MAX_LOOKAHEAD`] lines past the current one and never move back.

use crate::error::AdminError;

/// One line of report output. `None` is a blank placeholder line.
pub type ReportLine = Option<String>;

/// How far past the current line an interpreter may look.
pub const MAX_LOOKAHEAD: usize = 4;

/// A forward-only position within a report.
#[derive(Debug, Clone)]
pub struct ReportCursor<'a> {
    lines: &'a [ReportLine],
    pos: usize,
}

impl<'a> ReportCursor<'a> {
    /// Start at the first line.
    pub fn new(lines: &'a [ReportLine]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Current index.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the report has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check if the cursor has run off the end.
    pub fn is_done(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Number of lines after the current one.
    pub fn remaining_after(&self) -> usize {
        self.lines.len().saturating_sub(self.pos + 1)
    }

    /// The current line (`None` for a blank placeholder or past the end).
    pub fn current(&self) -> Option<&'a str> {
        self.peek(0)
    }

    /// The line `offset` positions ahead. Blank placeholders and lines past
    /// the end both read as `None`; use [`Self::has_ahead`] to tell them apart.
    pub fn peek(&self, offset: usize) -> Option<&'a str> {
        debug_assert!(offset <= MAX_LOOKAHEAD);
        self.lines
            .get(self.pos + offset)
            .and_then(|line| line.as_deref())
    }

    /// Check that a line exists `offset` positions ahead.
    pub fn has_ahead(&self, offset: usize) -> bool {
        self.pos + offset < self.lines.len()
    }

    /// The current line, failing on a blank placeholder or end of report.
    pub fn require_current(&self) -> Result<&'a str, AdminError> {
        self.require(0)
    }

    /// The line `offset` ahead, failing when it is blank or missing.
    pub fn require(&self, offset: usize) -> Result<&'a str, AdminError> {
        self.peek(offset).ok_or_else(|| AdminError::MalformedReport {
            line: self.pos + offset,
            reason: if self.has_ahead(offset) {
                "expected report text, found a blank line".to_string()
            } else {
                "report ended early".to_string()
            },
        })
    }

    /// Move forward by `count` lines.
    pub fn advance(&mut self, count: usize) {
        self.pos += count;
    }
}
