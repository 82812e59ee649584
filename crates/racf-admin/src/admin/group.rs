//! Group administration.

use crate::error::Result;
use crate::extract::ExtractResult;
use crate::result::SecurityResult;
use crate::traits::{TraitTable, TraitValue};
use crate::transport::Transport;
use crate::types::ProfileType;

use super::{int_field, AdminOptions, SecurityAdmin};

/// Valid group traits.
pub fn group_traits() -> TraitTable {
    TraitTable::new(ProfileType::Group)
        .with_segment(
            "base",
            &[
                ("connects", "racf:connects"),
                ("group_authority", "racf:gauth"),
                ("group_userid", "racf:guserid"),
                ("installation_data", "racf:data"),
                ("data_set_model", "racf:model"),
                ("owner", "racf:owner"),
                ("superior_group", "racf:supgroup"),
                ("terminal_universal_access", "racf:termuacc"),
                ("universal", "racf:universal"),
            ],
        )
        .with_segment(
            "dfp",
            &[
                ("data_application", "dataappl"),
                ("data_class", "dataclas"),
                ("management_class", "mgmtclas"),
                ("storage_class", "storclas"),
            ],
        )
        .with_segment(
            "omvs",
            &[("auto_gid", "autogid"), ("gid", "gid"), ("shared", "shared")],
        )
        .with_segment("ovm", &[("gid", "gid")])
        .with_segment("tme", &[("roles", "roles")])
}

/// Administration of group profiles.
#[derive(Debug)]
pub struct GroupAdmin<T: Transport> {
    admin: SecurityAdmin<T>,
}

impl<T: Transport> GroupAdmin<T> {
    pub fn new(transport: T, options: AdminOptions) -> Self {
        Self {
            admin: SecurityAdmin::new(transport, group_traits(), options),
        }
    }

    pub fn admin(&self) -> &SecurityAdmin<T> {
        &self.admin
    }

    pub fn admin_mut(&mut self) -> &mut SecurityAdmin<T> {
        &mut self.admin
    }

    pub fn into_inner(self) -> SecurityAdmin<T> {
        self.admin
    }

    // ─────── Profile operations ───────

    pub fn add<I, K>(&mut self, group: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.add(group, None, traits)
    }

    pub fn alter<I, K>(&mut self, group: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.alter(group, None, traits)
    }

    pub fn delete(&mut self, group: &str) -> Result<SecurityResult> {
        self.admin
            .delete(group, None, Vec::<(&str, TraitValue)>::new())
    }

    pub fn extract(&mut self, group: &str, segments: &[&str]) -> Result<ExtractResult> {
        self.admin.extract(group, None, segments)
    }

    // ─────── OMVS / OVM ───────

    pub fn set_omvs_gid(&mut self, group: &str, gid: i64) -> Result<SecurityResult> {
        self.alter(group, [("omvs:gid", TraitValue::Int(gid))])
    }

    pub fn set_ovm_gid(&mut self, group: &str, gid: i64) -> Result<SecurityResult> {
        self.alter(group, [("ovm:gid", TraitValue::Int(gid))])
    }

    pub fn get_omvs_gid(&mut self, group: &str) -> Result<Option<i64>> {
        let extracted = self.extract(group, &["omvs"])?;
        Ok(int_field(&extracted.profile, "omvs", "gid"))
    }

    pub fn get_ovm_gid(&mut self, group: &str) -> Result<Option<i64>> {
        let extracted = self.extract(group, &["ovm"])?;
        Ok(int_field(&extracted.profile, "ovm", "gid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;
    use crate::profile::Value;
    use crate::transport::ReplayTransport;

    const ALTER_OK: &str = r#"<securityresult xmlns="http://www.ibm.com/systems/zos/saf/IRRSMO00Result1">
  <group name="TESTGRP0" operation="set" requestid="GroupRequest">
    <command>
      <safreturncode>0</safreturncode>
      <returncode>0</returncode>
      <reasoncode>0</reasoncode>
      <image>ALTGROUP TESTGRP0  OMVS     (GID         (1234567))</image>
    </command>
  </group>
  <returncode>0</returncode>
  <reasoncode>0</reasoncode>
</securityresult>"#;

    const EXTRACT_OMVS: &str = r#"<securityresult xmlns="http://www.ibm.com/systems/zos/saf/IRRSMO00Result1">
  <group name="TESTGRP0" operation="listdata" requestid="GroupRequest">
    <command>
      <safreturncode>0</safreturncode>
      <returncode>0</returncode>
      <reasoncode>0</reasoncode>
      <image>LISTGRP  TESTGRP0  OMVS    </image>
      <message>INFORMATION FOR GROUP TESTGRP0</message>
      <message>    SUPERIOR GROUP=SYS1          OWNER=ESWIFT     CREATED=23.106</message>
      <message>    NO INSTALLATION DATA</message>
      <message>    NO MODEL DATA SET</message>
      <message>    TERMUACC</message>
      <message>    NO SUBGROUPS</message>
      <message>    NO USERS</message>
      <message> </message>
      <message>OMVS INFORMATION</message>
      <message>----------------</message>
      <message>GID= 0001234567</message>
    </command>
  </group>
  <returncode>0</returncode>
  <reasoncode>0</reasoncode>
</securityresult>"#;

    fn group_admin(responses: &[&str]) -> GroupAdmin<ReplayTransport> {
        let mut transport = ReplayTransport::new();
        for response in responses {
            transport.push_response(TextEncoding::Utf8.encode(response).unwrap());
        }
        let options = AdminOptions {
            encoding: TextEncoding::Utf8,
            ..AdminOptions::default()
        };
        GroupAdmin::new(transport, options)
    }

    #[test]
    fn test_set_omvs_and_ovm_gid() {
        let mut admin = group_admin(&[ALTER_OK, ALTER_OK]);
        admin.set_omvs_gid("TESTGRP0", 1234567).unwrap();
        admin.set_ovm_gid("TESTGRP0", 1234567).unwrap();
        let requests = admin.admin().transport().requests();
        let first = String::from_utf8(requests[0].clone()).unwrap();
        let second = String::from_utf8(requests[1].clone()).unwrap();
        assert!(first.contains(
            r#"<group name="TESTGRP0" operation="set" requestid="GroupRequest"><omvs><gid operation="set">1234567</gid></omvs>"#
        ));
        assert!(second.contains(r#"<ovm><gid operation="set">1234567</gid></ovm>"#));
    }

    #[test]
    fn test_get_omvs_gid() {
        let mut admin = group_admin(&[EXTRACT_OMVS]);
        assert_eq!(admin.get_omvs_gid("TESTGRP0").unwrap(), Some(1234567));
    }

    #[test]
    fn test_get_ovm_gid_without_segment() {
        let mut admin = group_admin(&[EXTRACT_OMVS]);
        assert_eq!(admin.get_ovm_gid("TESTGRP0").unwrap(), None);
    }

    #[test]
    fn test_extract_base_fields() {
        let mut admin = group_admin(&[EXTRACT_OMVS]);
        let extracted = admin.extract("TESTGRP0", &["omvs"]).unwrap();
        let base = extracted.profile.base();
        assert_eq!(base["name"], Value::from("testgrp0"));
        assert_eq!(base["superiorgroup"], Value::from("sys1"));
        assert_eq!(base["installation data"], Value::Null);
        assert_eq!(base["termuacc"], Value::Bool(true));
    }
}
