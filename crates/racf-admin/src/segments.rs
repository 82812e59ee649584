//! Segment dictionary builder — report lines to a [`Profile`].
//!
//! A report opens in the `base` segment. A line reading exactly
//! `<SEGMENT> INFORMATION` (followed by its dashed underline) switches to a
//! fresh segment; `NO <SEGMENT> INFORMATION` lines, single-space marker lines
//! and blank placeholders are skipped. Every other line goes to the line
//! interpreter for the profile type.

use tracing::trace;

use crate::cursor::{ReportCursor, ReportLine};
use crate::error::Result;
use crate::interpret;
use crate::profile::{Profile, BASE_SEGMENT};
use crate::types::ProfileType;

/// Heading lines recognised for a set of segments.
#[derive(Debug, Clone, Default)]
pub struct SegmentHeadings {
    /// `(heading text, segment name)`.
    headings: Vec<(String, String)>,
    absent: Vec<String>,
}

impl SegmentHeadings {
    /// Build the heading texts for every segment except `base`.
    pub fn new<I, S>(valid_segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut headings = Self::default();
        for segment in valid_segments {
            let segment = segment.as_ref();
            if segment == BASE_SEGMENT {
                continue;
            }
            let heading = format!("{} INFORMATION", segment.to_uppercase());
            headings.absent.push(format!("NO {heading}"));
            let name = heading
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase();
            headings.headings.push((heading, name));
        }
        headings
    }

    /// Segment a heading line opens, if it is one.
    pub fn segment_for(&self, line: &str) -> Option<&str> {
        self.headings
            .iter()
            .find(|(heading, _)| heading == line)
            .map(|(_, name)| name.as_str())
    }

    /// Check if the line says a segment is not present.
    pub fn is_absent_marker(&self, line: &str) -> bool {
        self.absent.iter().any(|marker| marker == line)
    }
}

/// Partition report lines into segments and interpret each line.
///
/// The report is consumed strictly left to right; a segment heading never
/// reopens an earlier position. A line of the wrong shape fails the whole
/// build, so no partial profile is returned.
pub fn build_profile<I, S>(
    profile_type: ProfileType,
    valid_segments: I,
    lines: &[ReportLine],
) -> Result<Profile>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let headings = SegmentHeadings::new(valid_segments);
    let mut profile = Profile::new();
    let mut current = BASE_SEGMENT.to_string();
    let mut cursor = ReportCursor::new(lines);

    while !cursor.is_done() {
        let line = match cursor.current() {
            None | Some(" ") => {
                cursor.advance(1);
                continue;
            }
            Some(line) if headings.is_absent_marker(line) => {
                cursor.advance(1);
                continue;
            }
            Some(line) => line,
        };

        if cursor.has_ahead(1) {
            if let Some(name) = headings.segment_for(line) {
                trace!(segment = name, line = cursor.position(), "segment heading");
                current = name.to_string();
                profile.open_segment(&current);
                // Heading and its underline.
                cursor.advance(2);
                continue;
            }
        }

        interpret::interpret(profile_type, &mut cursor, profile.segment_entry(&current))?;
        cursor.advance(1);
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;
    use crate::profile::Value;

    fn lines(raw: &[Option<&str>]) -> Vec<ReportLine> {
        raw.iter().map(|l| l.map(str::to_string)).collect()
    }

    #[test]
    fn test_headings() {
        let headings = SegmentHeadings::new(["base", "omvs", "tso"]);
        assert_eq!(headings.segment_for("OMVS INFORMATION"), Some("omvs"));
        assert_eq!(headings.segment_for("TSO INFORMATION"), Some("tso"));
        assert_eq!(headings.segment_for("BASE INFORMATION"), None);
        assert_eq!(headings.segment_for(" OMVS INFORMATION"), None);
        assert!(headings.is_absent_marker("NO OMVS INFORMATION"));
        assert!(!headings.is_absent_marker("NO TSO"));
    }

    #[test]
    fn test_segment_boundary() {
        let report = lines(&[
            Some("FIELD=value"),
            Some("OMVS INFORMATION"),
            Some("----"),
            Some("UID=0001"),
        ]);
        let profile = build_profile(ProfileType::User, ["base", "omvs"], &report).unwrap();
        assert_eq!(
            profile.get("base", "field"),
            Some(&Value::Str("value".to_string()))
        );
        assert_eq!(profile.get("omvs", "uid"), Some(&Value::Int(1)));
        assert_eq!(profile.segment_names().collect::<Vec<_>>(), vec!["base", "omvs"]);
    }

    #[test]
    fn test_blank_and_absent_lines_skipped() {
        let report = lines(&[
            Some("USER=SQUIDWRD"),
            None,
            Some(" "),
            Some("NO TSO INFORMATION"),
            Some("OMVS INFORMATION"),
            Some("----------------"),
            None,
            Some("UID= 0000002424"),
        ]);
        let profile =
            build_profile(ProfileType::User, ["base", "omvs", "tso"], &report).unwrap();
        assert!(profile.segment("tso").is_none());
        assert_eq!(profile.get("omvs", "uid"), Some(&Value::Int(2424)));
    }

    #[test]
    fn test_heading_on_last_line_is_not_a_segment() {
        let report = lines(&[Some("A=1"), Some("OMVS INFORMATION")]);
        let result = build_profile(ProfileType::User, ["base", "omvs"], &report);
        // Interpreted as a label whose value line is missing.
        assert!(matches!(
            result,
            Err(AdminError::MalformedReport { line: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_heading_stays_in_current_segment() {
        let report = lines(&[Some("DFP INFORMATION"), Some("------")]);
        let profile = build_profile(ProfileType::Dataset, ["base"], &report).unwrap();
        assert_eq!(profile.segment_names().collect::<Vec<_>>(), vec!["base"]);
    }

    #[test]
    fn test_permission_reports_are_not_interpreted() {
        let report = lines(&[Some("A=1")]);
        let result = build_profile(ProfileType::Permission, ["base"], &report);
        assert!(matches!(
            result,
            Err(AdminError::UnsupportedOperation { .. })
        ));
    }
}
