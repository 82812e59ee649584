//! General resource administration.

use crate::error::Result;
use crate::extract::ExtractResult;
use crate::result::SecurityResult;
use crate::traits::{TraitTable, TraitValue};
use crate::transport::Transport;
use crate::types::ProfileType;

use super::{text_field, AdminOptions, SecurityAdmin, COMMON_BASE_TRAITS};

/// Valid general resource traits.
pub fn resource_traits() -> TraitTable {
    TraitTable::new(ProfileType::Resource)
        .with_segment("base", COMMON_BASE_TRAITS)
        .with_segment(
            "base",
            &[
                ("application_data", "racf:appldata"),
                ("audit", "racf:audit"),
                ("category", "racf:category"),
                ("installation_data", "racf:data"),
                ("level", "racf:level"),
                ("member", "racf:member"),
                ("notify_userid", "racf:notify"),
                ("owner", "racf:owner"),
                ("security_label", "racf:seclabel"),
                ("security_level", "racf:seclevel"),
                ("single_data_set_tape_volume", "racf:singldsn"),
                ("time_zone", "racf:timezone"),
                ("universal_access", "racf:uacc"),
                ("volume", "racf:volume"),
                ("warn_on_insufficient_access", "racf:warning"),
            ],
        )
        .with_segment(
            "session",
            &[
                ("security_checking_level", "convsec"),
                ("session_key_interval", "interval"),
                ("locked", "lock"),
                ("session_key", "sesskey"),
            ],
        )
        .with_segment(
            "stdata",
            &[
                ("group", "group"),
                ("privileged", "privlege"),
                ("trace", "trace"),
                ("trusted", "trusted"),
                ("user", "user"),
            ],
        )
        .with_segment("dlfdata", &[("job_names", "jobname"), ("retain_object_after_use", "retain")])
        .with_segment(
            "proxy",
            &[
                ("bind_distinguished_name", "binddn"),
                ("bind_password", "bindpw"),
                ("ldap_host", "ldaphost"),
            ],
        )
        .with_segment("tme", &[("children", "children"), ("groups", "groups"), ("roles", "roles")])
}

/// Administration of general resource profiles.
#[derive(Debug)]
pub struct ResourceAdmin<T: Transport> {
    admin: SecurityAdmin<T>,
}

impl<T: Transport> ResourceAdmin<T> {
    pub fn new(transport: T, options: AdminOptions) -> Self {
        Self {
            admin: SecurityAdmin::new(transport, resource_traits(), options),
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

    pub fn add<I, K>(&mut self, resource: &str, class: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.add(resource, Some(class), traits)
    }

    pub fn alter<I, K>(&mut self, resource: &str, class: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.alter(resource, Some(class), traits)
    }

    pub fn delete(&mut self, resource: &str, class: &str) -> Result<SecurityResult> {
        self.admin
            .delete(resource, Some(class), Vec::<(&str, TraitValue)>::new())
    }

    pub fn extract(
        &mut self,
        resource: &str,
        class: &str,
        segments: &[&str],
    ) -> Result<ExtractResult> {
        self.admin.extract(resource, Some(class), segments)
    }

    // ─────── Access ───────

    pub fn set_universal_access(
        &mut self,
        resource: &str,
        class: &str,
        access: &str,
    ) -> Result<SecurityResult> {
        self.alter(
            resource,
            class,
            [("base:universal_access", TraitValue::from(access))],
        )
    }

    /// Universal access as reported (lower case).
    pub fn get_universal_access(&mut self, resource: &str, class: &str) -> Result<Option<String>> {
        let extracted = self.extract(resource, class, &[])?;
        Ok(text_field(&extracted.profile, "base", "universal_access"))
    }

    /// The caller's own access to the resource.
    pub fn get_your_access(&mut self, resource: &str, class: &str) -> Result<Option<String>> {
        let extracted = self.extract(resource, class, &[])?;
        Ok(text_field(&extracted.profile, "base", "your_access"))
    }
}
