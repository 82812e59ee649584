//! Core request types — profile types and request operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of profile a request administers.
///
/// Each kind has its own request element, its own report layout and its own
/// line interpreter. Data set and general resource reports share a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// User profile (ADDUSER/ALTUSER/LISTUSER/DELUSER).
    User,
    /// Group profile (ADDGROUP/ALTGROUP/LISTGRP/DELGROUP).
    Group,
    /// Data set profile (ADDSD/ALTDSD/LISTDSD/DELDSD).
    Dataset,
    /// General resource profile (RDEFINE/RALTER/RLIST/RDELETE).
    Resource,
    /// Access list entry on a data set or general resource (PERMIT).
    Permission,
}

impl ProfileType {
    /// Name of the request/result element for this profile type.
    pub fn element(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Dataset => "dataset",
            Self::Resource => "resource",
            Self::Permission => "permission",
        }
    }

    /// Request identifier placed on the outbound element.
    pub fn request_id(self) -> &'static str {
        match self {
            Self::User => "UserRequest",
            Self::Group => "GroupRequest",
            Self::Dataset => "DatasetRequest",
            Self::Resource => "ResourceRequest",
            Self::Permission => "AccessRequest",
        }
    }

    /// Whether requests for this profile type must name a resource class.
    pub fn requires_class(self) -> bool {
        matches!(self, Self::Resource | Self::Permission)
    }

    /// Look up a profile type by its element name (case-insensitive).
    pub fn from_element(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "group" => Some(Self::Group),
            "dataset" => Some(Self::Dataset),
            "resource" => Some(Self::Resource),
            "permission" => Some(Self::Permission),
            _ => None,
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element())
    }
}

/// Operation requested on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestOperation {
    /// Create a profile.
    Add,
    /// Modify an existing profile.
    Alter,
    /// Delete a profile.
    Delete,
    /// List the profile (report output is parsed into a `Profile`).
    Extract,
}

impl RequestOperation {
    /// Value of the `operation` attribute on the request element.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Add | Self::Alter => "set",
            Self::Delete => "del",
            Self::Extract => "listdata",
        }
    }
}

impl fmt::Display for RequestOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Alter => write!(f, "ALTER"),
            Self::Delete => write!(f, "DELETE"),
            Self::Extract => write!(f, "EXTRACT"),
        }
    }
}
