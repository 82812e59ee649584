//! User report lines.
//!
//! ```text
//! USER=SQUIDWRD  NAME=SQUIDWARD            OWNER=LEONARD   CREATED=23.106
//!  LOGON ALLOWED   (DAYS)          (TIME)                   <- semi-tabular
//!  ---------------------------------------------
//!  ANYDAY                          ANYTIME
//!   GROUP=SYS1     AUTH=USE      CONNECT-OWNER=LEONARD   CONNECT-DATE=23.106
//!     CONNECTS=    00  UACC=NONE     LAST-CONNECT=UNKNOWN   <- group record
//!     CONNECT ATTRIBUTES=NONE
//!     REVOKE DATE=NONE   RESUME DATE=NONE
//!  CATEGORY-AUTHORIZATION                                   <- split pair
//!   NONE SPECIFIED
//! ```

use std::collections::BTreeMap;

use tracing::trace;

use crate::cast::cast;
use crate::cursor::ReportCursor;
use crate::error::{AdminError, Result};
use crate::interpret::kv::{add_key_value_pairs, normalize_key};
use crate::layout::{
    slice_chars, strip_outer_chars, USER_GROUP_RECORD_BODY_OFFSET, USER_GROUP_RECORD_LINES,
    USER_GROUP_RECORD_PREFIX, USER_SEMI_TABULAR_LINES, USER_SEMI_TABULAR_RULE,
};
use crate::profile::{Segment, Value};

/// Shape of one user report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLine<'a> {
    /// Heading line followed by the fixed separator rule and a data row.
    SemiTabular { heading: &'a str },
    /// First line of a four-line connect-group record.
    GroupRecord(&'a str),
    /// A label whose value sits alone on the following line.
    SplitPair { label: &'a str },
    /// One or more `KEY=value` pairs.
    KeyValue(&'a str),
}

/// Classify the current line. `None` when the cursor rests on a blank line.
pub fn classify<'a>(cursor: &ReportCursor<'a>) -> Option<UserLine<'a>> {
    let line = cursor.current()?;
    if cursor.peek(1) == Some(USER_SEMI_TABULAR_RULE) {
        return Some(UserLine::SemiTabular { heading: line });
    }
    if line.starts_with(USER_GROUP_RECORD_PREFIX) {
        return Some(UserLine::GroupRecord(line));
    }
    if !line.contains('=') && !line.trim().starts_with("NO-") {
        return Some(UserLine::SplitPair { label: line });
    }
    Some(UserLine::KeyValue(line))
}

/// Interpret the current line into `segment`, moving the cursor onto the
/// last line consumed.
pub fn interpret(cursor: &mut ReportCursor<'_>, segment: &mut Segment) -> Result<()> {
    let line_no = cursor.position();
    let Some(shape) = classify(cursor) else {
        return Ok(());
    };
    match shape {
        UserLine::SemiTabular { heading } => {
            let data = cursor.require(USER_SEMI_TABULAR_LINES - 1)?;
            add_semi_tabular(segment, heading, data, line_no)?;
            cursor.advance(USER_SEMI_TABULAR_LINES - 1);
        }
        UserLine::GroupRecord(first) => {
            let group = group_name(first).ok_or_else(|| AdminError::MalformedReport {
                line: line_no,
                reason: "connect-group record without a group name".to_string(),
            })?;
            let mut record = String::new();
            for offset in 0..USER_GROUP_RECORD_LINES {
                record.push_str(cursor.require(offset)?);
            }
            let body = slice_chars(
                &record,
                USER_GROUP_RECORD_BODY_OFFSET,
                record.chars().count(),
            );
            let mut fields = Segment::new();
            add_key_value_pairs(&mut fields, &body, line_no)?;
            trace!(group = %group, "connect-group record");

            let groups = segment
                .entry("groups".to_string())
                .or_insert_with(|| Value::Map(BTreeMap::new()));
            if !matches!(groups, Value::Map(_)) {
                *groups = Value::Map(BTreeMap::new());
            }
            if let Value::Map(groups) = groups {
                groups.insert(group.to_string(), Value::Map(fields));
            }
            cursor.advance(USER_GROUP_RECORD_LINES - 1);
        }
        UserLine::SplitPair { label } => {
            if !cursor.has_ahead(1) {
                return Err(AdminError::MalformedReport {
                    line: line_no + 1,
                    reason: format!("no value line after '{}'", label.trim()),
                });
            }
            let value = cursor.peek(1).unwrap_or("NONE");
            add_key_value_pairs(segment, &format!("{label}={value}"), line_no)?;
            cursor.advance(1);
        }
        UserLine::KeyValue(line) => add_key_value_pairs(segment, line, line_no)?,
    }
    Ok(())
}

/// `  GROUP=SYS1     AUTH=USE ...` → `SYS1`. The name keeps its case.
fn group_name(line: &str) -> Option<&str> {
    line.split('=').nth(1)?.split_whitespace().next()
}

/// Heading like ` LOGON ALLOWED   (DAYS)          (TIME)`: the first field
/// is a prefix joined to each parenthesised field name, and the data row is
/// split on whitespace.
fn add_semi_tabular(segment: &mut Segment, heading: &str, data: &str, line: usize) -> Result<()> {
    let mut headings = heading.split("  ").filter(|h| !h.is_empty());
    let Some(prefix) = headings.next() else {
        return Ok(());
    };
    let mut values = data.split_whitespace();
    for name in headings {
        let key = normalize_key(&format!("{prefix}{}", strip_outer_chars(name.trim())));
        let value = values.next().ok_or_else(|| AdminError::MalformedReport {
            line: line + USER_SEMI_TABULAR_LINES - 1,
            reason: format!("no value under '{}'", name.trim()),
        })?;
        segment.insert(key, cast(value));
    }
    Ok(())
}
