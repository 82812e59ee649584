//! Data set profile administration.

use crate::error::Result;
use crate::extract::ExtractResult;
use crate::result::SecurityResult;
use crate::traits::{TraitTable, TraitValue};
use crate::transport::Transport;
use crate::types::ProfileType;

use super::{text_field, AdminOptions, SecurityAdmin, COMMON_BASE_TRAITS};

/// Valid data set traits.
pub fn data_set_traits() -> TraitTable {
    TraitTable::new(ProfileType::Dataset)
        .with_segment("base", COMMON_BASE_TRAITS)
        .with_segment(
            "base",
            &[
                ("alter_volume", "racf:altvol"),
                ("category", "racf:category"),
                ("installation_data", "racf:data"),
                ("erase_data_sets_on_delete", "racf:erase"),
                ("tape_data_set_file_sequence_number", "racf:fileseq"),
                ("level", "racf:level"),
                ("data_set_model_profile", "racf:model"),
                ("notify_userid", "racf:notify"),
                ("owner", "racf:owner"),
                ("retention_period", "racf:retpd"),
                ("security_label", "racf:seclabel"),
                ("security_level", "racf:seclevel"),
                ("universal_access", "racf:uacc"),
                ("unit", "racf:unit"),
                ("volume", "racf:volume"),
                ("warn_on_insufficient_access", "racf:warning"),
            ],
        )
        .with_segment("dfp", &[("owner", "resowner"), ("ckds_data_key", "datakey")])
        .with_segment("tme", &[("roles", "roles")])
}

/// Administration of data set profiles.
#[derive(Debug)]
pub struct DataSetAdmin<T: Transport> {
    admin: SecurityAdmin<T>,
}

impl<T: Transport> DataSetAdmin<T> {
    pub fn new(transport: T, options: AdminOptions) -> Self {
        Self {
            admin: SecurityAdmin::new(transport, data_set_traits(), options),
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

    pub fn add<I, K>(&mut self, data_set: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.add(data_set, None, traits)
    }

    pub fn alter<I, K>(&mut self, data_set: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.alter(data_set, None, traits)
    }

    pub fn delete(&mut self, data_set: &str) -> Result<SecurityResult> {
        self.admin
            .delete(data_set, None, Vec::<(&str, TraitValue)>::new())
    }

    pub fn extract(&mut self, data_set: &str, segments: &[&str]) -> Result<ExtractResult> {
        self.admin.extract(data_set, None, segments)
    }

    // ─────── Access ───────

    pub fn set_universal_access(&mut self, data_set: &str, access: &str) -> Result<SecurityResult> {
        self.alter(data_set, [("base:universal_access", TraitValue::from(access))])
    }

    pub fn get_universal_access(&mut self, data_set: &str) -> Result<Option<String>> {
        let extracted = self.extract(data_set, &[])?;
        Ok(text_field(&extracted.profile, "base", "universal_access"))
    }

    pub fn get_your_access(&mut self, data_set: &str) -> Result<Option<String>> {
        let extracted = self.extract(data_set, &[])?;
        Ok(text_field(&extracted.profile, "base", "your_access"))
    }
}
