//! Key/value pair adder shared by the user and group interpreters.
//!
//! Handles lines shaped like `KEY1=val1  KEY2=val2  KEY THREE=val3`: fields
//! are separated by runs of two or more spaces, keys may contain single
//! spaces and hyphens, and a value followed by a single space and the next
//! key is split apart on whitespace.

use crate::cast::cast;
use crate::error::{AdminError, Result};
use crate::profile::{Segment, Value};

/// Keys whose values accumulate across lines instead of being replaced.
const LIST_FIELDS: &[&str] = &["attributes", "classauthorizations"];

/// Prefix marking a field the report says is absent (`NO-INSTALLATION-DATA`).
const ABSENT_PREFIX: &str = "NO-";

/// Sentinel stored for absent fields; it casts to null.
const ABSENT_VALUE: &str = "N/A";

/// Lower-case a report key and drop spaces and hyphens
/// (`PASS-INTERVAL` → `passinterval`, `REVOKE DATE` → `revokedate`).
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Split on runs of two spaces, dropping empty pieces.
fn split_fields(text: &str) -> Vec<&str> {
    text.split("  ").filter(|piece| !piece.is_empty()).collect()
}

/// Add every `key=value` pair on one report line to `segment`.
///
/// `line` is the report index of the line, used for error reporting only.
pub fn add_key_value_pairs(segment: &mut Segment, message: &str, line: usize) -> Result<()> {
    let tokens: Vec<&str> = message.trim().split('=').collect();
    let mut key = tokens[0].to_string();

    for (i, token) in tokens.iter().enumerate().skip(1) {
        let fields = split_fields(token);
        let Some(first) = fields.first() else {
            return Err(AdminError::MalformedReport {
                line,
                reason: format!("no value after '{}='", key.trim()),
            });
        };
        let mut value = first.trim().to_string();

        if let Some(stripped) = key.strip_prefix(ABSENT_PREFIX) {
            key = stripped.to_string();
            value = ABSENT_VALUE.to_string();
        }
        let current_key = normalize_key(&key);

        if LIST_FIELDS.contains(&current_key.as_str()) {
            let items = value
                .split_whitespace()
                .filter(|item| *item != "NONE")
                .map(cast);
            match segment.get_mut(&current_key) {
                Some(Value::List(existing)) => existing.extend(items),
                _ => {
                    segment.insert(current_key.clone(), Value::List(items.collect()));
                }
            }
        } else {
            segment.insert(current_key.clone(), cast(&value));
        }

        key = fields[1..].concat();
        if fields.len() == 1 {
            // `value NEXTKEY` with a single space: the last word is the next key.
            let is_last = i == tokens.len() - 1;
            if !is_last && first.contains(' ') {
                let words: Vec<&str> = first.split_whitespace().collect();
                if let (Some(head), Some(tail)) = (words.first(), words.last()) {
                    segment.insert(current_key, cast(head));
                    key = (*tail).to_string();
                }
            } else {
                key = (*first).to_string();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(segment: &mut Segment, message: &str) {
        add_key_value_pairs(segment, message, 0).unwrap();
    }

    fn s(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(" PASS-INTERVAL"), "passinterval");
        assert_eq!(normalize_key("REVOKE DATE"), "revokedate");
        assert_eq!(normalize_key("CLASS AUTHORIZATIONS"), "classauthorizations");
    }

    #[test]
    fn test_double_space_separated_pairs() {
        let mut segment = Segment::new();
        add(
            &mut segment,
            "USER=SQUIDWRD  NAME=SQUIDWARD            OWNER=LEONARD   CREATED=23.106",
        );
        assert_eq!(segment["user"], s("squidwrd"));
        assert_eq!(segment["name"], s("squidward"));
        assert_eq!(segment["owner"], s("leonard"));
        assert_eq!(segment["created"], Value::Float(23.106));
    }

    #[test]
    fn test_single_space_before_next_key() {
        let mut segment = Segment::new();
        add(
            &mut segment,
            " DEFAULT-GROUP=SYS1     PASSDATE=00.000 PASS-INTERVAL=186 PHRASEDATE=N/A",
        );
        assert_eq!(segment["defaultgroup"], s("sys1"));
        assert_eq!(segment["passdate"], Value::Float(0.0));
        assert_eq!(segment["passinterval"], Value::Int(186));
        assert_eq!(segment["phrasedate"], Value::Null);
    }

    #[test]
    fn test_keys_with_spaces() {
        let mut segment = Segment::new();
        add(&mut segment, " REVOKE DATE=NONE   RESUME DATE=NONE");
        assert_eq!(segment["revokedate"], Value::Null);
        assert_eq!(segment["resumedate"], Value::Null);
    }

    #[test]
    fn test_value_with_leading_spaces() {
        let mut segment = Segment::new();
        add(&mut segment, "UID= 0000002424");
        assert_eq!(segment["uid"], Value::Int(2424));
    }

    #[test]
    fn test_absent_prefix_forces_null() {
        let mut segment = Segment::new();
        add(&mut segment, "NO-HOME=/u/nobody");
        assert_eq!(segment["home"], Value::Null);
    }

    #[test]
    fn test_line_without_equals_adds_nothing() {
        let mut segment = Segment::new();
        add(&mut segment, " NO-INSTALLATION-DATA");
        assert!(segment.is_empty());
    }

    #[test]
    fn test_attributes_drop_none() {
        let mut segment = Segment::new();
        add(&mut segment, " ATTRIBUTES=NONE");
        assert_eq!(segment["attributes"], Value::List(vec![]));
        add(&mut segment, " ATTRIBUTES=SPECIAL OPERATIONS");
        assert_eq!(
            segment["attributes"],
            Value::List(vec![s("special"), s("operations")])
        );
    }

    #[test]
    fn test_class_authorizations_accumulate() {
        let mut segment = Segment::new();
        add(&mut segment, "CLASSAUTHORIZATIONS=CLASSA CLASSB");
        add(&mut segment, "CLASSAUTHORIZATIONS=CLASSC");
        assert_eq!(
            segment["classauthorizations"],
            Value::List(vec![s("classa"), s("classb"), s("classc")])
        );
    }

    #[test]
    fn test_missing_value_is_malformed() {
        let mut segment = Segment::new();
        let err = add_key_value_pairs(&mut segment, "KEY=", 7).unwrap_err();
        assert!(matches!(err, AdminError::MalformedReport { line: 7, .. }));
    }
}
