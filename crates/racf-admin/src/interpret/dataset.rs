//! Data set and general resource report lines.
//!
//! ```text
//! INFORMATION FOR DATASET ESWIFT.TEST.T1136242.P3020470
//!
//! LEVEL  OWNER      UNIVERSAL ACCESS  WARNING  ERASE       <- semi-tabular
//! -----  --------   ----------------  -------  -----
//!  00    ESWIFT          READ          NO      NO
//!
//! AUDITING                                                 <- label/value
//! --------
//! FAILURES(READ)
//! ```

use crate::cursor::ReportCursor;
use crate::error::Result;
use crate::layout::{ColumnLayout, DATASET_NAME_MARKER, NO_INSTALLATION_DATA};
use crate::profile::{Segment, Value};
use crate::split::split_and_cast;

/// Shape of one data set or resource report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSetLine<'a> {
    /// `FIELD=value`.
    KeyValue(&'a str),
    /// Column headings; the next line is a dashed rule, then one data row.
    SemiTabular { heading: &'a str, rule: &'a str },
    /// A label, its underline, then the value on the line after.
    LabelValue { label: &'a str },
    /// `NO INSTALLATION DATA`.
    NoInstallationData,
    /// Nothing to record.
    Other,
}

/// Classify the current line. Rules are tried in priority order.
pub fn classify<'a>(cursor: &ReportCursor<'a>) -> DataSetLine<'a> {
    let Some(line) = cursor.current() else {
        return DataSetLine::Other;
    };
    if line.contains('=') {
        return DataSetLine::KeyValue(line);
    }
    let two_more = cursor.remaining_after() >= 2;
    if two_more && line.contains("  ") {
        if let Some(rule) = cursor.peek(1).filter(|next| next.contains("--")) {
            return DataSetLine::SemiTabular {
                heading: line,
                rule,
            };
        }
    }
    if two_more && cursor.peek(1).is_some_and(|next| next.contains('-')) {
        return DataSetLine::LabelValue { label: line };
    }
    if line.contains(NO_INSTALLATION_DATA) {
        return DataSetLine::NoInstallationData;
    }
    DataSetLine::Other
}

/// Interpret the current line into `segment`, moving the cursor onto the
/// last line consumed.
pub fn interpret(cursor: &mut ReportCursor<'_>, segment: &mut Segment) -> Result<()> {
    match classify(cursor) {
        DataSetLine::KeyValue(line) => {
            let (field, value) = line.split_once('=').unwrap_or((line, ""));
            segment.insert(field.trim().to_lowercase(), split_and_cast(value));
        }
        DataSetLine::SemiTabular { heading, rule } => {
            let data = cursor.require(2)?;
            add_semi_tabular(segment, heading, rule, data);
            cursor.advance(2);
        }
        DataSetLine::LabelValue { label } => {
            let field = label
                .split(' ')
                .filter(|word| !word.is_empty())
                .map(|word| word.trim().to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            let value = cursor.require(2)?;
            segment.insert(field, split_and_cast(value));
            cursor.advance(1);
        }
        DataSetLine::NoInstallationData => {
            segment.insert("installation data".to_string(), Value::Null);
        }
        DataSetLine::Other => {}
    }

    // Checked on whichever line the cursor now rests on.
    if let Some(line) = cursor.current() {
        if let Some((_, name)) = line.split_once(DATASET_NAME_MARKER) {
            segment.insert("name".to_string(), Value::Str(name.to_lowercase()));
        }
    }
    Ok(())
}

/// Slice the heading and data rows at the columns of the dashed rule.
///
/// Field names are the trimmed, lower-cased heading text with inner
/// whitespace replaced by `_` (`UNIVERSAL ACCESS` → `universal_access`).
fn add_semi_tabular(segment: &mut Segment, heading: &str, rule: &str, data: &str) {
    for column in ColumnLayout::from_rule(rule).columns() {
        let field = column
            .slice(heading)
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        segment.insert(field, split_and_cast(&column.slice(data)));
    }
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

    #[test]
    fn test_classify_shapes() {
        let report = lines(&[
            "OWNER=ESWIFT",
            "LEVEL  OWNER",
            "-----  -----",
            " 00    ESWIFT",
            "NOTIFY",
            "------",
            "NO USER TO BE NOTIFIED",
            "NO INSTALLATION DATA",
        ]);
        let mut cursor = ReportCursor::new(&report);
        assert_eq!(classify(&cursor), DataSetLine::KeyValue("OWNER=ESWIFT"));
        cursor.advance(1);
        assert!(matches!(classify(&cursor), DataSetLine::SemiTabular { .. }));
        cursor.advance(3);
        assert_eq!(classify(&cursor), DataSetLine::LabelValue { label: "NOTIFY" });
        cursor.advance(3);
        assert_eq!(classify(&cursor), DataSetLine::NoInstallationData);
    }

    #[test]
    fn test_semi_tabular_block() {
        let report = lines(&[
            "LEVEL  OWNER      UNIVERSAL ACCESS  YOUR ACCESS  WARNING",
            "-----  --------   ----------------  -----------  -------",
            " 00    ESWIFT          READ               READ    NO",
            "tail",
        ]);
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        interpret(&mut cursor, &mut segment).unwrap();
        assert_eq!(cursor.position(), 2);
        assert_eq!(segment["level"], Value::Int(0));
        assert_eq!(segment["owner"], s("eswift"));
        assert_eq!(segment["universal_access"], s("read"));
        assert_eq!(segment["your_access"], s("read"));
        assert_eq!(segment["warning"], Value::Null);
    }

    #[test]
    fn test_label_value_block() {
        let report = lines(&["AUDITING", "--------", "FAILURES(READ)"]);
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        interpret(&mut cursor, &mut segment).unwrap();
        assert_eq!(cursor.position(), 1);
        assert_eq!(segment["auditing"], s("failures(read)"));
    }

    #[test]
    fn test_label_value_near_end_is_ignored() {
        let report = lines(&["AUDITING", "--------"]);
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        interpret(&mut cursor, &mut segment).unwrap();
        assert!(segment.is_empty());
    }

    #[test]
    fn test_key_value_splits_on_first_equals_only() {
        let report = lines(&["CLASS=ELIJTEST"]);
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        interpret(&mut cursor, &mut segment).unwrap();
        assert_eq!(segment["class"], s("elijtest"));

        let report = lines(&["APPLICATION DATA=KEY=VAL"]);
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        interpret(&mut cursor, &mut segment).unwrap();
        assert_eq!(segment["application data"], s("key=val"));
    }

    #[test]
    fn test_dataset_name() {
        let report = lines(&["INFORMATION FOR DATASET ESWIFT.TEST.T1136242.P3020470"]);
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        interpret(&mut cursor, &mut segment).unwrap();
        assert_eq!(segment["name"], s("eswift.test.t1136242.p3020470"));
    }

    #[test]
    fn test_missing_data_row_is_malformed() {
        let report = vec![
            Some("LEVEL  OWNER".to_string()),
            Some("-----  -----".to_string()),
            None,
        ];
        let mut cursor = ReportCursor::new(&report);
        let mut segment = Segment::new();
        assert!(interpret(&mut cursor, &mut segment).is_err());
    }
}
