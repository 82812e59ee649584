//! Administration facades.
//!
//! [`SecurityAdmin`] drives one request through its whole life: validate
//! traits against the profile type's [`TraitTable`], render and encode the
//! request, hand it to the [`Transport`], decode and check the result, and
//! for extracts interpret the report into a [`Profile`]. The per-type
//! facades ([`UserAdmin`], [`GroupAdmin`], ...) add named setters and getters
//! on top.

mod access;
mod dataset;
mod group;
mod resource;
mod user;

pub use access::{access_traits, AccessAdmin};
pub use dataset::{data_set_traits, DataSetAdmin};
pub use group::{group_traits, GroupAdmin};
pub use resource::{resource_traits, ResourceAdmin};
pub use user::{user_traits, UserAdmin};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::encoding::TextEncoding;
use crate::error::{AdminError, Result};
use crate::extract::{extract, ExtractResult};
use crate::profile::{Profile, Value};
use crate::redact::RequestContext;
use crate::request::SecurityRequest;
use crate::result::SecurityResult;
use crate::traits::{TraitTable, TraitValue};
use crate::transport::Transport;
use crate::types::{ProfileType, RequestOperation};

/// Base traits shared by data set and general resource profiles.
pub(crate) const COMMON_BASE_TRAITS: &[(&str, &str)] = &[
    ("access_control_list_count", "racf:aclcnt"),
    ("access_control_list_alter_count", "racf:aclacnt"),
    ("access_control_list_alter_access", "racf:aclacs"),
    ("access_control_list_id", "racf:aclid"),
    ("conditional_access_list_count", "racf:acl2cnt"),
    ("conditional_access_list_alter_count", "racf:acl2acnt"),
    ("conditional_access_list_access", "racf:acl2acs"),
    ("conditional_access_list_condition", "racf:acl2cond"),
    ("conditional_access_list_entity", "racf:acl2ent"),
    ("conditional_access_list_id", "racf:acl2id"),
    ("alter_access_count", "racf:acsaltr"),
    ("control_access_count", "racf:acscntl"),
    ("read_access_count", "racf:acsread"),
    ("update_access_count", "racf:acsupdt"),
    ("all", "racf:all"),
    ("audit_alter", "racf:audaltr"),
    ("audit_control", "racf:audcntl"),
    ("audit_none", "racf:audnone"),
    ("audit_read", "racf:audread"),
    ("audit_update", "racf:audupdt"),
    ("authorized_user", "racf:authuser"),
    ("volume_family", "racf:fvolume"),
    ("global_audit_alter", "racf:gaudaltr"),
    ("global_audit_control", "racf:gaudcntl"),
    ("global_audit_none", "racf:gaudnone"),
    ("global_audit_read", "racf:gaudread"),
    ("global_audit_update", "racf:gaudupdt"),
    ("generic", "racf:generic"),
];

/// Library options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminOptions {
    /// Encoding of request and result documents.
    pub encoding: TextEncoding,
    /// Log request traits, documents and formatted profiles (redacted).
    pub debug: bool,
}

/// A rendered request and the secrets needed to redact anything derived
/// from it.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// The request, traits included.
    pub request: SecurityRequest,
    /// The unredacted document that will be sent.
    pub xml: String,
    /// Redaction context travelling with the request.
    pub context: RequestContext,
}

impl PreparedRequest {
    /// The document with secrets masked, safe to print or log.
    pub fn redacted_xml(&self) -> String {
        self.context.redact(&self.xml)
    }
}

/// Generic administration for one profile type.
#[derive(Debug)]
pub struct SecurityAdmin<T: Transport> {
    transport: T,
    table: TraitTable,
    options: AdminOptions,
}

impl<T: Transport> SecurityAdmin<T> {
    /// Administer the profile type `table` describes over `transport`.
    pub fn new(transport: T, table: TraitTable, options: AdminOptions) -> Self {
        Self {
            transport,
            table,
            options,
        }
    }

    pub fn profile_type(&self) -> ProfileType {
        self.table.profile_type()
    }

    pub fn table(&self) -> &TraitTable {
        &self.table
    }

    /// Mutable table, for registering custom field segments.
    pub fn table_mut(&mut self) -> &mut TraitTable {
        &mut self.table
    }

    pub fn options(&self) -> AdminOptions {
        self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    // ─────── Request lifecycle ───────

    /// Validate traits and render the request document without sending it.
    ///
    /// Unknown traits are dropped with a warning. `segments` only matters
    /// for extracts.
    pub fn prepare<I, K>(
        &self,
        operation: RequestOperation,
        name: &str,
        class: Option<&str>,
        traits: I,
        segments: &[&str],
    ) -> Result<PreparedRequest>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        let profile_type = self.profile_type();
        if profile_type == ProfileType::Permission && operation == RequestOperation::Extract {
            return Err(AdminError::UnsupportedOperation {
                profile_type: profile_type.to_string(),
                operation: operation.to_string(),
            });
        }

        let traits = self.table.resolve_all(traits);
        let context = RequestContext::from_traits(&traits);
        if self.options.debug {
            for line in context.describe_traits(&traits) {
                debug!("REQUEST TRAIT: {}", line);
            }
        }

        let mut request = SecurityRequest::new(profile_type, operation, name)
            .with_traits(traits)
            .with_segments(segments.iter().copied().filter(|s| self.table.has_segment(s)));
        if let Some(class) = class {
            request = request.with_class(class);
        }
        let xml = request.to_xml(self.options.encoding)?;
        Ok(PreparedRequest {
            request,
            xml,
            context,
        })
    }

    /// Send a prepared request and decode the result.
    ///
    /// The returned result (and the one carried by an error) has the
    /// request's secrets masked.
    pub fn submit(&mut self, prepared: PreparedRequest) -> Result<SecurityResult> {
        let PreparedRequest {
            request,
            xml,
            context,
        } = prepared;
        info!(
            "ADMIN: {} {} {}",
            request.operation(),
            request.profile_type(),
            request.name()
        );
        if self.options.debug {
            debug!("REQUEST XML: {}", context.redact(&xml));
        }

        let encoding = self.options.encoding;
        let response = self.transport.call(&encoding.encode(&xml)?)?;
        let result_xml = context.redact(&encoding.decode(&response)?);
        if self.options.debug {
            debug!("RESULT XML: {}", result_xml);
        }

        let result = SecurityResult::from_xml(&result_xml)?;
        if !result.is_success() {
            info!(
                "ADMIN: {} {} {} failed (return code {}, reason code {})",
                request.operation(),
                request.profile_type(),
                request.name(),
                result.return_code,
                result.reason_code
            );
            return Err(AdminError::SecurityRequest {
                result: Box::new(result),
            });
        }
        Ok(result)
    }

    // ─────── Operations ───────

    /// Create a profile.
    pub fn add<I, K>(&mut self, name: &str, class: Option<&str>, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        let prepared = self.prepare(RequestOperation::Add, name, class, traits, &[])?;
        self.submit(prepared)
    }

    /// Change an existing profile.
    pub fn alter<I, K>(
        &mut self,
        name: &str,
        class: Option<&str>,
        traits: I,
    ) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        let prepared = self.prepare(RequestOperation::Alter, name, class, traits, &[])?;
        self.submit(prepared)
    }

    /// Delete a profile, optionally naming traits that identify it (the
    /// access list entry of a permission, for instance).
    pub fn delete<I, K>(
        &mut self,
        name: &str,
        class: Option<&str>,
        traits: I,
    ) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        let prepared = self.prepare(RequestOperation::Delete, name, class, traits, &[])?;
        self.submit(prepared)
    }

    /// List a profile and interpret its report.
    pub fn extract(
        &mut self,
        name: &str,
        class: Option<&str>,
        segments: &[&str],
    ) -> Result<ExtractResult> {
        let prepared = self.prepare(
            RequestOperation::Extract,
            name,
            class,
            Vec::<(&str, TraitValue)>::new(),
            segments,
        )?;
        let result = self.submit(prepared)?;
        let extracted = extract(self.profile_type(), self.table.segments(), result)?;
        if self.options.debug {
            match serde_json::to_string_pretty(&extracted.profile) {
                Ok(json) => debug!("FORMATTED PROFILE: {}", json),
                Err(e) => debug!("FORMATTED PROFILE: unavailable ({})", e),
            }
        }
        Ok(extracted)
    }
}

// ─────── Accessors ───────

/// Text of a field; `None` when absent or null.
pub(crate) fn text_field(profile: &Profile, segment: &str, field: &str) -> Option<String> {
    match profile.get_non_null(segment, field)? {
        Value::Str(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Integer value of a field; `None` when absent, null or not an integer.
pub(crate) fn int_field(profile: &Profile, segment: &str, field: &str) -> Option<i64> {
    profile.get(segment, field)?.as_i64()
}

/// String items of a list field (a lone scalar counts as one item).
pub(crate) fn list_field(profile: &Profile, segment: &str, field: &str) -> Vec<String> {
    match profile.get_non_null(segment, field) {
        Some(Value::List(items)) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(Value::to_string)
            .collect(),
        Some(other) => vec![other.to_string()],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ReplayTransport;

    const ALTER_OK: &str = r#"<?xml version="1.0" encoding="IBM-1047"?>
<securityresult xmlns="http://www.ibm.com/systems/zos/saf/IRRSMO00Result1">
  <user name="SQUIDWRD" operation="set" requestid="UserRequest">
    <command>
      <safreturncode>0</safreturncode>
      <returncode>0</returncode>
      <reasoncode>0</reasoncode>
      <image>ALTUSER SQUIDWRD PASSWORD (GIyTTqdF) NOSPECIAL</image>
    </command>
  </user>
  <returncode>0</returncode>
  <reasoncode>0</reasoncode>
</securityresult>"#;

    fn admin(response: &str) -> SecurityAdmin<ReplayTransport> {
        let transport = ReplayTransport::new().with_response(
            TextEncoding::Ibm1047
                .encode(response)
                .expect("fixture is Latin-1"),
        );
        SecurityAdmin::new(transport, user_traits(), AdminOptions::default())
    }

    #[test]
    fn test_prepare_does_not_send() {
        let admin = admin(ALTER_OK);
        let prepared = admin
            .prepare(
                RequestOperation::Alter,
                "SQUIDWRD",
                None,
                [("base:password", TraitValue::from("GIyTTqdF"))],
                &[],
            )
            .unwrap();
        assert!(prepared.xml.contains("GIyTTqdF"));
        assert!(prepared.redacted_xml().contains("********"));
        assert!(!prepared.redacted_xml().contains("GIyTTqdF"));
        assert!(admin.transport().requests().is_empty());
    }

    #[test]
    fn test_submit_encodes_and_redacts_result() {
        let mut admin = admin(ALTER_OK);
        let result = admin
            .alter(
                "SQUIDWRD",
                None,
                [
                    ("base:password", TraitValue::from("GIyTTqdF")),
                    ("base:special", TraitValue::Bool(false)),
                ],
            )
            .unwrap();
        let image = result.commands()[0].fields["image"].to_string();
        assert_eq!(image, "ALTUSER SQUIDWRD PASSWORD (********) NOSPECIAL");

        let sent = TextEncoding::Ibm1047
            .decode(&admin.transport().requests()[0])
            .unwrap();
        assert!(sent.contains(r#"<racf:password operation="set">GIyTTqdF</racf:password>"#));
        assert!(sent.contains(r#"<racf:special operation="del"/>"#));
    }

    #[test]
    fn test_permission_extract_unsupported() {
        let admin = SecurityAdmin::new(
            ReplayTransport::new(),
            access_traits(),
            AdminOptions::default(),
        );
        let err = admin
            .prepare(
                RequestOperation::Extract,
                "TESTING",
                Some("ELIJTEST"),
                Vec::<(&str, TraitValue)>::new(),
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, AdminError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_unknown_extract_segments_ignored() {
        let admin = admin(ALTER_OK);
        let prepared = admin
            .prepare(
                RequestOperation::Extract,
                "SQUIDWRD",
                None,
                Vec::<(&str, TraitValue)>::new(),
                &["omvs", "bogus"],
            )
            .unwrap();
        assert!(prepared.xml.contains("<omvs/>"));
        assert!(!prepared.xml.contains("bogus"));
    }

    #[test]
    fn test_accessors() {
        let mut profile = Profile::new();
        let base = profile.segment_entry("base");
        base.insert("owner".into(), Value::from("eswift"));
        base.insert("uid".into(), Value::Int(7));
        base.insert("notify".into(), Value::Null);
        base.insert(
            "attributes".into(),
            Value::List(vec![Value::from("special"), Value::from("auditor")]),
        );
        assert_eq!(text_field(&profile, "base", "owner").as_deref(), Some("eswift"));
        assert_eq!(text_field(&profile, "base", "notify"), None);
        assert_eq!(int_field(&profile, "base", "uid"), Some(7));
        assert_eq!(int_field(&profile, "base", "owner"), None);
        assert_eq!(list_field(&profile, "base", "attributes"), vec!["special", "auditor"]);
        assert!(list_field(&profile, "base", "missing").is_empty());
    }
}
