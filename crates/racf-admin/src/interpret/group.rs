//! Group report lines.
//!
//! Once the `USER(S)=` heading has opened the user list, every remaining
//! line of the segment with two more lines after it starts a three-line
//! user row:
//!
//! ```text
//!     USER(S)=      ACCESS=      ACCESS COUNT=      UNIVERSAL ACCESS=
//!       ESWIFT        USE            000000           NONE
//!          CONNECT ATTRIBUTES=NONE
//!          REVOKE DATE=NONE                 RESUME DATE=NONE
//! ```
//!
//! The row's last line is then also read as an ordinary line of the
//! segment, so its pairs land in both the row and the segment.

use crate::cast::cast;
use crate::cursor::ReportCursor;
use crate::error::{AdminError, Result};
use crate::interpret::kv::add_key_value_pairs;
use crate::layout::{GROUP_USER_LIST_HEADER, GROUP_USER_ROW_FIELDS, GROUP_USER_ROW_LINES};
use crate::profile::{Segment, Value};

const USERS: &str = "users";
const NAME_MARKER: &str = "INFORMATION FOR GROUP ";

/// Shape of one group report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLine<'a> {
    /// The heading that opens the user list.
    UserListHeader,
    /// One or more `KEY=value` pairs.
    KeyValue(&'a str),
    /// `NO <FIELD>`: the named field is absent.
    Absent { field: &'a str },
    /// `TERMUACC` or `NOTERMUACC`.
    TermUacc(bool),
    /// `INFORMATION FOR GROUP <NAME>`.
    Name(&'a str),
    /// Nothing to record.
    Other,
}

/// Classify one line. Rules are tried in priority order.
pub fn classify(line: &str) -> GroupLine<'_> {
    if line.contains(GROUP_USER_LIST_HEADER) {
        GroupLine::UserListHeader
    } else if line.contains('=') {
        GroupLine::KeyValue(line)
    } else if let Some((_, rest)) = line.split_once("NO ") {
        GroupLine::Absent {
            field: rest.split("NO ").next().unwrap_or(rest),
        }
    } else if line.contains("TERMUACC") {
        GroupLine::TermUacc(!line.contains("NO"))
    } else if let Some((_, name)) = line.split_once(NAME_MARKER) {
        GroupLine::Name(name)
    } else {
        GroupLine::Other
    }
}

/// Interpret the current line into `segment`, moving the cursor onto the
/// last line consumed.
pub fn interpret(cursor: &mut ReportCursor<'_>, segment: &mut Segment) -> Result<()> {
    if segment.contains_key(USERS) && cursor.remaining_after() >= GROUP_USER_ROW_LINES - 1 {
        add_user_row(cursor, segment)?;
        cursor.advance(GROUP_USER_ROW_LINES - 1);
    }

    let line_no = cursor.position();
    let Some(line) = cursor.current() else {
        return Ok(());
    };
    match classify(line) {
        GroupLine::UserListHeader => {
            segment.insert(USERS.to_string(), Value::List(Vec::new()));
        }
        GroupLine::KeyValue(line) => add_key_value_pairs(segment, line, line_no)?,
        GroupLine::Absent { field } => {
            segment.insert(field.trim().to_lowercase(), Value::Null);
        }
        GroupLine::TermUacc(value) => {
            segment.insert("termuacc".to_string(), Value::Bool(value));
        }
        GroupLine::Name(name) => {
            segment.insert("name".to_string(), Value::Str(name.to_lowercase()));
        }
        GroupLine::Other => {}
    }
    Ok(())
}

/// Read the three lines of one user row into a new entry of `users`.
fn add_user_row(cursor: &ReportCursor<'_>, segment: &mut Segment) -> Result<()> {
    let line_no = cursor.position();
    let first = cursor.require_current()?;
    let tokens: Vec<&str> = first.split_whitespace().collect();
    if tokens.len() < GROUP_USER_ROW_FIELDS.len() {
        return Err(AdminError::MalformedReport {
            line: line_no,
            reason: format!(
                "user row has {} fields, expected {}",
                tokens.len(),
                GROUP_USER_ROW_FIELDS.len()
            ),
        });
    }

    let mut row = Segment::new();
    for (field, token) in GROUP_USER_ROW_FIELDS.iter().zip(&tokens) {
        row.insert((*field).to_string(), cast(token));
    }
    for offset in 1..GROUP_USER_ROW_LINES {
        add_key_value_pairs(&mut row, cursor.require(offset)?, line_no + offset)?;
    }

    match segment.get_mut(USERS) {
        Some(Value::List(users)) => users.push(Value::Map(row)),
        _ => {
            segment.insert(USERS.to_string(), Value::List(vec![Value::Map(row)]));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ReportLine;

    fn lines(raw: &[&str]) -> Vec<ReportLine> {
        raw.iter().map(|l| Some(l.to_string())).collect()
    }

    fn s(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    fn run(report: &[ReportLine]) -> Segment {
        let mut cursor = ReportCursor::new(report);
        let mut segment = Segment::new();
        while !cursor.is_done() {
            interpret(&mut cursor, &mut segment).unwrap();
            cursor.advance(1);
        }
        segment
    }

    #[test]
    fn test_classify_shapes() {
        assert_eq!(
            classify("    USER(S)=      ACCESS=      ACCESS COUNT=      UNIVERSAL ACCESS="),
            GroupLine::UserListHeader
        );
        assert_eq!(
            classify("    NO MODEL DATA SET"),
            GroupLine::Absent {
                field: "MODEL DATA SET"
            }
        );
        assert_eq!(classify("    TERMUACC"), GroupLine::TermUacc(true));
        assert_eq!(classify("    NOTERMUACC"), GroupLine::TermUacc(false));
        assert_eq!(
            classify("INFORMATION FOR GROUP TESTGRP0"),
            GroupLine::Name("TESTGRP0")
        );
        assert_eq!(classify("    SUBGROUP(S)"), GroupLine::Other);
    }

    #[test]
    fn test_header_fields() {
        let segment = run(&lines(&[
            "INFORMATION FOR GROUP TESTGRP0",
            "    SUPERIOR GROUP=SYS1         OWNER=ESWIFT     CREATED=23.106",
            "    NO INSTALLATION DATA",
            "    NOTERMUACC",
        ]));
        assert_eq!(segment["name"], s("testgrp0"));
        assert_eq!(segment["superiorgroup"], s("sys1"));
        assert_eq!(segment["owner"], s("eswift"));
        assert_eq!(segment["created"], Value::Float(23.106));
        assert_eq!(segment["installation data"], Value::Null);
        assert_eq!(segment["termuacc"], Value::Bool(false));
    }

    #[test]
    fn test_user_rows() {
        let segment = run(&lines(&[
            "    USER(S)=      ACCESS=      ACCESS COUNT=      UNIVERSAL ACCESS=",
            "      ESWIFT        USE            000000           NONE",
            "         CONNECT ATTRIBUTES=NONE",
            "         REVOKE DATE=NONE                 RESUME DATE=NONE",
            "      LEONARD       JOIN           000002           READ",
            "         CONNECT ATTRIBUTES=SPECIAL",
            "         REVOKE DATE=NONE                 RESUME DATE=NONE",
        ]));
        let users = segment["users"].as_list().unwrap();
        assert_eq!(users.len(), 2);

        let eswift = users[0].as_map().unwrap();
        assert_eq!(eswift["userid"], s("eswift"));
        assert_eq!(eswift["access"], s("use"));
        assert_eq!(eswift["access count"], Value::Int(0));
        assert_eq!(eswift["universal access"], Value::Null);
        assert_eq!(eswift["connectattributes"], Value::Null);

        let leonard = users[1].as_map().unwrap();
        assert_eq!(leonard["access count"], Value::Int(2));
        assert_eq!(leonard["universal access"], s("read"));
        assert_eq!(leonard["connectattributes"], s("special"));

        // The row's last line is also read as a segment line.
        assert_eq!(segment["revokedate"], Value::Null);
        assert_eq!(segment["resumedate"], Value::Null);
    }

    #[test]
    fn test_short_user_row_is_malformed() {
        let report = lines(&[
            "    USER(S)=      ACCESS=      ACCESS COUNT=      UNIVERSAL ACCESS=",
            "      ESWIFT        USE",
            "         CONNECT ATTRIBUTES=NONE",
            "         REVOKE DATE=NONE",
        ]);
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        interpret(&mut cursor, &mut segment).unwrap();
        cursor.advance(1);
        let err = interpret(&mut cursor, &mut segment).unwrap_err();
        assert!(matches!(err, AdminError::MalformedReport { line: 1, .. }));
    }
}
