//! Structured extraction — a decoded result to a [`Profile`].

use serde::Serialize;
use tracing::debug;

use crate::error::{AdminError, Result};
use crate::profile::Profile;
use crate::result::SecurityResult;
use crate::segments::build_profile;
use crate::types::ProfileType;

/// A profile extracted from a successful result, with the result's codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractResult {
    /// The structured profile.
    pub profile: Profile,
    /// Top-level return code (always 0).
    #[serde(rename = "returncode")]
    pub return_code: i64,
    /// Top-level reason code (always 0).
    #[serde(rename = "reasoncode")]
    pub reason_code: i64,
}

/// Turn a decoded result into a profile.
///
/// Fails with [`AdminError::SecurityRequest`] carrying the whole result when
/// either code is non-zero or the result holds an error payload. Otherwise
/// the first command's report lines are partitioned into `valid_segments`
/// and interpreted for `profile_type`.
pub fn extract<I, S>(
    profile_type: ProfileType,
    valid_segments: I,
    result: SecurityResult,
) -> Result<ExtractResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !result.is_success() {
        return Err(AdminError::SecurityRequest {
            result: Box::new(result),
        });
    }
    let profile = build_profile(profile_type, valid_segments, result.messages())?;
    debug!(
        profile_type = %profile_type,
        segments = ?profile.segment_names().collect::<Vec<_>>(),
        "formatted profile"
    );
    Ok(ExtractResult {
        profile,
        return_code: result.return_code,
        reason_code: result.reason_code,
    })
}

/// Decode a result document and extract its profile.
pub fn extract_xml<I, S>(
    profile_type: ProfileType,
    valid_segments: I,
    xml: &str,
) -> Result<ExtractResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extract(profile_type, valid_segments, SecurityResult::from_xml(xml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Value;

    const RESOURCE: &str = r#"<?xml version="1.0" encoding="IBM-1047"?>
<securityresult xmlns="http://www.ibm.com/systems/zos/saf/IRRSMO00Result1">
  <resource name="TESTING" class="ELIJTEST" operation="listdata" requestid="ResourceRequest">
    <command>
      <safreturncode>0</safreturncode>
      <returncode>0</returncode>
      <reasoncode>0</reasoncode>
      <image>RLIST   ELIJTEST             (TESTING) </image>
      <message>CLASS      NAME</message>
      <message>-----      ----</message>
      <message>ELIJTEST   TESTING</message>
      <message> </message>
      <message>LEVEL  OWNER      UNIVERSAL ACCESS  YOUR ACCESS  WARNING</message>
      <message>-----  --------   ----------------  -----------  -------</message>
      <message> 00    ESWIFT          READ               READ    NO</message>
      <message> </message>
      <message>INSTALLATION DATA</message>
      <message>-----------------</message>
      <message>NONE</message>
    </command>
  </resource>
  <returncode>0</returncode>
  <reasoncode>0</reasoncode>
</securityresult>"#;

    #[test]
    fn test_extract_resource() {
        let extracted = extract_xml(ProfileType::Resource, ["base"], RESOURCE).unwrap();
        let base = extracted.profile.base();
        assert_eq!(base["class"], Value::Str("elijtest".into()));
        assert_eq!(base["name"], Value::Str("testing".into()));
        assert_eq!(base["owner"], Value::Str("eswift".into()));
        assert_eq!(base["universal_access"], Value::Str("read".into()));
        assert_eq!(base["installation data"], Value::Null);
        assert_eq!(extracted.return_code, 0);
        assert_eq!(extracted.reason_code, 0);
    }

    #[test]
    fn test_non_zero_codes_carry_the_result() {
        let xml = RESOURCE.replace(
            "<returncode>0</returncode>\n  <reasoncode>0</reasoncode>\n</securityresult>",
            "<returncode>4</returncode>\n  <reasoncode>16</reasoncode>\n</securityresult>",
        );
        let err = extract_xml(ProfileType::Resource, ["base"], &xml).unwrap_err();
        let result = err.security_result().unwrap();
        assert_eq!(result.return_code, 4);
        assert_eq!(result.reason_code, 16);
        assert_eq!(result.messages().len(), 11);
    }

    #[test]
    fn test_error_payload_with_zero_codes_fails() {
        let xml = r#"<securityresult xmlns="http://www.ibm.com/systems/zos/saf/IRRSMO00Result1">
  <resource name="TESTING" class="ELIJTEST" operation="listdata" requestid="ResourceRequest">
    <error>
      <errorfunction>10</errorfunction>
      <errorcode>2000</errorcode>
      <errorreason>68</errorreason>
      <errormessage>Invalid attribute value specified.</errormessage>
    </error>
  </resource>
  <returncode>0</returncode>
  <reasoncode>0</reasoncode>
</securityresult>"#;
        let err = extract_xml(ProfileType::Resource, ["base"], xml).unwrap_err();
        match err {
            AdminError::SecurityRequest { result } => {
                assert_eq!(result.return_code, 0);
                assert_eq!(result.reason_code, 0);
                assert!(result.is_error());
                assert!(!result.is_success());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_serialized_shape() {
        let extracted = extract_xml(ProfileType::Resource, ["base"], RESOURCE).unwrap();
        let json = serde_json::to_value(&extracted).unwrap();
        assert_eq!(json["profile"]["base"]["level"], 0);
        assert_eq!(json["returncode"], 0);
    }
}
