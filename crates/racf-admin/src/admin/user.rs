//! User administration.

use tracing::info;

use crate::error::Result;
use crate::extract::ExtractResult;
use crate::result::SecurityResult;
use crate::traits::{TraitTable, TraitValue};
use crate::transport::Transport;
use crate::types::ProfileType;

use super::{int_field, list_field, text_field, AdminOptions, SecurityAdmin};

/// Valid user traits.
pub fn user_traits() -> TraitTable {
    TraitTable::new(ProfileType::User)
        .with_segment(
            "base",
            &[
                ("adsp", "racf:adsp"),
                ("auditor", "racf:auditor"),
                ("auth", "racf:auth"),
                ("category", "racf:category"),
                ("class_authorizations", "racf:clauth"),
                ("connects", "racf:connects"),
                ("connect_group", "racf:cgroup"),
                ("connect_auth_date", "racf:cauthda"),
                ("connect_owner", "racf:cowner"),
                ("default_group", "racf:dfltgrp"),
                ("group", "racf:group"),
                ("installation_data", "racf:data"),
                ("model", "racf:model"),
                ("name", "racf:name"),
                ("operations", "racf:oper"),
                ("owner", "racf:owner"),
                ("password", "racf:password"),
                ("passphrase", "racf:phrase"),
                ("password_interval", "racf:passint"),
                ("resume_date", "racf:resume"),
                ("revoke_date", "racf:revoke"),
                ("revoked", "racf:revokefl"),
                ("security_label", "racf:seclabel"),
                ("security_level", "racf:seclevel"),
                ("special", "racf:special"),
                ("universal_access", "racf:uacc"),
                ("audit_responsibility", "racf:uaudit"),
                ("logon_allowed_days", "racf:whendays"),
                ("logon_allowed_time", "racf:whentime"),
            ],
        )
        .with_segment(
            "omvs",
            &[
                ("max_address_space_size", "assize"),
                ("auto_uid", "autouid"),
                ("max_cpu_time", "cputime"),
                ("max_files_per_process", "filemax"),
                ("home_directory", "home"),
                ("max_non_shared_memory", "memlimit"),
                ("max_file_mapping_pages", "mmaparea"),
                ("max_processes", "procmax"),
                ("default_shell", "program"),
                ("shared", "shared"),
                ("max_shared_memory", "shmemmax"),
                ("max_threads", "threads"),
                ("uid", "uid"),
            ],
        )
        .with_segment(
            "tso",
            &[
                ("account_number", "acctnum"),
                ("logon_command", "command"),
                ("sysout_destination_id", "dest"),
                ("hold_class", "holdclass"),
                ("job_class", "jobclass"),
                ("max_region_size", "maxsize"),
                ("message_class", "msgclass"),
                ("logon_procedure", "proc"),
                ("security_label", "seclabel"),
                ("region_size", "size"),
                ("sysout_class", "sysoutclass"),
                ("data_set_allocation_unit", "unit"),
                ("user_data", "userdata"),
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
            "language",
            &[("primary", "primary"), ("secondary", "secondary")],
        )
        .with_segment(
            "ovm",
            &[
                ("file_system_root", "fsroot"),
                ("home_directory", "vhome"),
                ("default_shell", "vprogram"),
                ("uid", "vuid"),
            ],
        )
        .with_segment(
            "netview",
            &[
                ("default_console", "consname"),
                ("control", "ctl"),
                ("domains", "domains"),
                ("logon_commands", "ic"),
                ("message_receiver", "msgrecvr"),
                ("operator_class", "opclass"),
                ("security_control", "ngmfadmn"),
            ],
        )
        .with_segment("cics", &[("operator_id", "opident"), ("operator_priority", "opprty")])
        .with_segment("workattr", &[("account_number", "waaccnt"), ("user_name", "waname")])
}

/// Administration of user profiles.
#[derive(Debug)]
pub struct UserAdmin<T: Transport> {
    admin: SecurityAdmin<T>,
}

impl<T: Transport> UserAdmin<T> {
    pub fn new(transport: T, options: AdminOptions) -> Self {
        Self {
            admin: SecurityAdmin::new(transport, user_traits(), options),
        }
    }

    /// The generic admin underneath.
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

    pub fn add<I, K>(&mut self, userid: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.add(userid, None, traits)
    }

    pub fn alter<I, K>(&mut self, userid: &str, traits: I) -> Result<SecurityResult>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        self.admin.alter(userid, None, traits)
    }

    pub fn delete(&mut self, userid: &str) -> Result<SecurityResult> {
        self.admin
            .delete(userid, None, Vec::<(&str, TraitValue)>::new())
    }

    /// Extract a user with `base` plus the listed segments.
    pub fn extract(&mut self, userid: &str, segments: &[&str]) -> Result<ExtractResult> {
        self.admin.extract(userid, None, segments)
    }

    // ─────── Authorities ───────

    pub fn give_special_authority(&mut self, userid: &str) -> Result<SecurityResult> {
        info!("USER: giving SPECIAL to {}", userid);
        self.alter(userid, [("base:special", TraitValue::Bool(true))])
    }

    pub fn take_away_special_authority(&mut self, userid: &str) -> Result<SecurityResult> {
        info!("USER: taking SPECIAL from {}", userid);
        self.alter(userid, [("base:special", TraitValue::Bool(false))])
    }

    pub fn give_auditor_authority(&mut self, userid: &str) -> Result<SecurityResult> {
        info!("USER: giving AUDITOR to {}", userid);
        self.alter(userid, [("base:auditor", TraitValue::Bool(true))])
    }

    pub fn take_away_auditor_authority(&mut self, userid: &str) -> Result<SecurityResult> {
        info!("USER: taking AUDITOR from {}", userid);
        self.alter(userid, [("base:auditor", TraitValue::Bool(false))])
    }

    pub fn give_operations_authority(&mut self, userid: &str) -> Result<SecurityResult> {
        info!("USER: giving OPERATIONS to {}", userid);
        self.alter(userid, [("base:operations", TraitValue::Bool(true))])
    }

    pub fn take_away_operations_authority(&mut self, userid: &str) -> Result<SecurityResult> {
        info!("USER: taking OPERATIONS from {}", userid);
        self.alter(userid, [("base:operations", TraitValue::Bool(false))])
    }

    /// Check for SPECIAL among the user's attributes.
    pub fn has_special_authority(&mut self, userid: &str) -> Result<bool> {
        self.has_attribute(userid, "special")
    }

    pub fn has_auditor_authority(&mut self, userid: &str) -> Result<bool> {
        self.has_attribute(userid, "auditor")
    }

    pub fn has_operations_authority(&mut self, userid: &str) -> Result<bool> {
        self.has_attribute(userid, "operations")
    }

    fn has_attribute(&mut self, userid: &str, attribute: &str) -> Result<bool> {
        let extracted = self.extract(userid, &[])?;
        Ok(list_field(&extracted.profile, "base", "attributes")
            .iter()
            .any(|a| a == attribute))
    }

    // ─────── Credentials ───────

    /// Set a new password. It never appears in logs or returned results.
    pub fn set_password(&mut self, userid: &str, password: &str) -> Result<SecurityResult> {
        self.alter(userid, [("base:password", TraitValue::from(password))])
    }

    /// Set a new pass phrase. It never appears in logs or returned results.
    pub fn set_passphrase(&mut self, userid: &str, passphrase: &str) -> Result<SecurityResult> {
        self.alter(userid, [("base:passphrase", TraitValue::from(passphrase))])
    }

    // ─────── Class authorizations ───────

    /// Classes the user may define profiles in (lower case, as reported).
    pub fn get_class_authorizations(&mut self, userid: &str) -> Result<Vec<String>> {
        let extracted = self.extract(userid, &[])?;
        Ok(list_field(&extracted.profile, "base", "classauthorizations"))
    }

    pub fn add_class_authorizations(
        &mut self,
        userid: &str,
        classes: &[&str],
    ) -> Result<SecurityResult> {
        self.alter(
            userid,
            [("add:base:class_authorizations", class_list(classes))],
        )
    }

    pub fn remove_class_authorizations(
        &mut self,
        userid: &str,
        classes: &[&str],
    ) -> Result<SecurityResult> {
        self.alter(
            userid,
            [("remove:base:class_authorizations", class_list(classes))],
        )
    }

    /// Remove every class authorization the user has. `None` when there
    /// were none to remove.
    pub fn delete_all_class_authorizations(
        &mut self,
        userid: &str,
    ) -> Result<Option<SecurityResult>> {
        let current = self.get_class_authorizations(userid)?;
        if current.is_empty() {
            return Ok(None);
        }
        let classes: Vec<String> = current.iter().map(|c| c.to_uppercase()).collect();
        self.alter(
            userid,
            [(
                "remove:base:class_authorizations",
                TraitValue::List(classes),
            )],
        )
        .map(Some)
    }

    // ─────── OMVS segment ───────

    pub fn set_omvs_uid(&mut self, userid: &str, uid: i64) -> Result<SecurityResult> {
        self.alter(userid, [("omvs:uid", TraitValue::Int(uid))])
    }

    pub fn set_omvs_home(&mut self, userid: &str, home: &str) -> Result<SecurityResult> {
        self.alter(userid, [("omvs:home_directory", TraitValue::from(home))])
    }

    pub fn set_omvs_program(&mut self, userid: &str, program: &str) -> Result<SecurityResult> {
        self.alter(userid, [("omvs:default_shell", TraitValue::from(program))])
    }

    pub fn get_omvs_uid(&mut self, userid: &str) -> Result<Option<i64>> {
        let extracted = self.extract(userid, &["omvs"])?;
        Ok(int_field(&extracted.profile, "omvs", "uid"))
    }

    pub fn get_omvs_home(&mut self, userid: &str) -> Result<Option<String>> {
        let extracted = self.extract(userid, &["omvs"])?;
        Ok(text_field(&extracted.profile, "omvs", "home"))
    }

    pub fn get_omvs_program(&mut self, userid: &str) -> Result<Option<String>> {
        let extracted = self.extract(userid, &["omvs"])?;
        Ok(text_field(&extracted.profile, "omvs", "program"))
    }

    // ─────── TSO segment ───────

    pub fn get_tso_proc(&mut self, userid: &str) -> Result<Option<String>> {
        let extracted = self.extract(userid, &["tso"])?;
        Ok(text_field(&extracted.profile, "tso", "proc"))
    }

    pub fn get_tso_size(&mut self, userid: &str) -> Result<Option<i64>> {
        let extracted = self.extract(userid, &["tso"])?;
        Ok(int_field(&extracted.profile, "tso", "size"))
    }
}

fn class_list(classes: &[&str]) -> TraitValue {
    TraitValue::List(classes.iter().map(|c| c.to_string()).collect())
}
