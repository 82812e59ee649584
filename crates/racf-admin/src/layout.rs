//! Report layouts — column positions and fixed-width record shapes.
//!
//! Report output is not self-describing. Tabular blocks are laid out as a
//! heading line, a dashed rule and a data line; the rule's dash runs give
//! each column's start offset, and a column runs up to one character before
//! the next column starts (the last column runs to the end of the line).
//! Embedded records (user connect groups, group user rows) have fixed
//! shapes, recorded here per profile type.

// ---------------------------------------------------------------------------
//  Column layouts derived from dashed rules
// ---------------------------------------------------------------------------

/// Where a column stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEnd {
    /// One character before the given start offset of the next column.
    NextColumn(usize),
    /// End of whichever line is being sliced.
    LineEnd,
}

/// One column of a tabular block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Character offset the column starts at.
    pub start: usize,
    /// Where the column stops.
    pub end: ColumnEnd,
}

impl Column {
    /// Cut this column out of a line. Offsets past the end of the line are
    /// clamped, so short data lines yield short or empty slices.
    pub fn slice(self, line: &str) -> String {
        let end = match self.end {
            ColumnEnd::NextColumn(next) => next.saturating_sub(1),
            ColumnEnd::LineEnd => line.chars().count(),
        };
        slice_chars(line, self.start, end)
    }
}

/// The columns of one tabular block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<Column>,
}

impl ColumnLayout {
    /// Derive the columns from a dashed rule such as
    /// `-----  --------   ----------------`.
    pub fn from_rule(rule: &str) -> Self {
        let mut starts = Vec::new();
        let mut previous_dash = false;
        for (i, ch) in rule.chars().enumerate() {
            let dash = ch == '-';
            if dash && !previous_dash {
                starts.push(i);
            }
            previous_dash = dash;
        }
        let columns = starts
            .iter()
            .enumerate()
            .map(|(j, &start)| Column {
                start,
                end: match starts.get(j + 1) {
                    Some(&next) => ColumnEnd::NextColumn(next),
                    None => ColumnEnd::LineEnd,
                },
            })
            .collect();
        Self { columns }
    }

    /// Columns in left-to-right order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the rule had no dashes at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Slice a line by character offsets, clamping both ends.
pub fn slice_chars(line: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    line.chars().skip(start).take(end - start).collect()
}

/// Drop the first and last character (`(DAYS)` → `DAYS`).
pub fn strip_outer_chars(text: &str) -> &str {
    let mut chars = text.char_indices();
    let start = match chars.next() {
        Some((_, c)) => c.len_utf8(),
        None => return "",
    };
    match text.char_indices().next_back() {
        Some((last, _)) if last >= start => &text[start..last],
        _ => "",
    }
}

// ---------------------------------------------------------------------------
//  User reports
// ---------------------------------------------------------------------------

/// Rule printed under the `LOGON ALLOWED (DAYS) (TIME)` heading.
pub const USER_SEMI_TABULAR_RULE: &str = " ---------------------------------------------";

/// Number of lines a user semi-tabular block spans (heading, rule, data).
pub const USER_SEMI_TABULAR_LINES: usize = 3;

/// Prefix of the first line of a connect-group record.
pub const USER_GROUP_RECORD_PREFIX: &str = "  GROUP=";

/// Number of lines in a connect-group record.
pub const USER_GROUP_RECORD_LINES: usize = 4;

/// Offset, in the joined record text, where the `AUTH=` fields begin.
/// Everything before it is the `GROUP=<name>` column.
pub const USER_GROUP_RECORD_BODY_OFFSET: usize = 17;

// ---------------------------------------------------------------------------
//  Group reports
// ---------------------------------------------------------------------------

/// Heading that opens the user list of a group report.
pub const GROUP_USER_LIST_HEADER: &str =
    "USER(S)=      ACCESS=      ACCESS COUNT=      UNIVERSAL ACCESS=";

/// Field names of the whitespace-separated first line of a user row.
pub const GROUP_USER_ROW_FIELDS: [&str; 4] =
    ["userid", "access", "access count", "universal access"];

/// Number of lines in one user row (fields line plus two `key=value` lines).
pub const GROUP_USER_ROW_LINES: usize = 3;

// ---------------------------------------------------------------------------
//  Data set and general resource reports
// ---------------------------------------------------------------------------

/// Heading text that carries a data set profile's name.
pub const DATASET_NAME_MARKER: &str = "INFORMATION FOR DATASET ";

/// Line printed when a data set or resource has no installation data.
pub const NO_INSTALLATION_DATA: &str = "NO INSTALLATION DATA";
