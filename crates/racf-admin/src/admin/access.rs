//! Access list administration (PERMIT).
//!
//! Permissions are entries on the access list of a data set or general
//! resource profile. They can be added, changed and removed; they have no
//! report of their own to extract.

use tracing::info;

use crate::error::Result;
use crate::result::SecurityResult;
use crate::traits::{TraitTable, TraitValue};
use crate::transport::Transport;
use crate::types::ProfileType;

use super::{AdminOptions, SecurityAdmin};

/// Valid permission traits.
pub fn access_traits() -> TraitTable {
    TraitTable::new(ProfileType::Permission).with_segment(
        "base",
        &[
            ("access", "racf:access"),
            ("auth_id", "racf:id"),
            ("model_profile_class", "racf:fclass"),
            ("model_profile", "racf:fprofile"),
            ("model_profile_generic", "racf:fgeneric"),
            ("model_profile_volume", "racf:fvolume"),
            ("reset", "racf:reset"),
            ("volume", "racf:volume"),
            ("when_partner_lu_name", "racf:whenappc"),
            ("when_console", "racf:whencons"),
            ("when_jes", "racf:whenjes"),
            ("when_program", "racf:whenprog"),
            ("when_service", "racf:whenserv"),
            ("when_sysid", "racf:whensys"),
            ("when_terminal", "racf:whenterm"),
        ],
    )
}

/// Administration of access list entries.
#[derive(Debug)]
pub struct AccessAdmin<T: Transport> {
    admin: SecurityAdmin<T>,
}

impl<T: Transport> AccessAdmin<T> {
    pub fn new(transport: T, options: AdminOptions) -> Self {
        Self {
            admin: SecurityAdmin::new(transport, access_traits(), options),
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

    /// Permit `auth_id` (a user or group) `access` to `resource` in `class`.
    pub fn add(
        &mut self,
        resource: &str,
        class: &str,
        auth_id: &str,
        access: &str,
    ) -> Result<SecurityResult> {
        info!("ACCESS: permit {} {} to {}({})", auth_id, access, class, resource);
        self.admin.add(resource, Some(class), entry(auth_id, access))
    }

    /// Change the access level of an existing entry.
    pub fn alter(
        &mut self,
        resource: &str,
        class: &str,
        auth_id: &str,
        access: &str,
    ) -> Result<SecurityResult> {
        self.admin.alter(resource, Some(class), entry(auth_id, access))
    }

    /// Remove `auth_id` from the access list.
    pub fn delete(&mut self, resource: &str, class: &str, auth_id: &str) -> Result<SecurityResult> {
        info!("ACCESS: remove {} from {}({})", auth_id, class, resource);
        self.admin.delete(
            resource,
            Some(class),
            [("base:auth_id", TraitValue::from(auth_id))],
        )
    }
}

fn entry(auth_id: &str, access: &str) -> [(&'static str, TraitValue); 2] {
    [
        ("base:access", TraitValue::from(access)),
        ("base:auth_id", TraitValue::from(auth_id)),
    ]
}
