//! CLI command implementations.

pub mod extract;
pub mod parse;
pub mod request;

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use racf_admin::admin::{access_traits, data_set_traits, group_traits, resource_traits, user_traits};
use racf_admin::{ProfileType, RequestOperation, TraitTable, TraitValue};
use serde::Serialize;

/// Profile types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileKind {
    User,
    Group,
    Dataset,
    Resource,
    Permission,
}

impl ProfileKind {
    pub fn profile_type(self) -> ProfileType {
        match self {
            Self::User => ProfileType::User,
            Self::Group => ProfileType::Group,
            Self::Dataset => ProfileType::Dataset,
            Self::Resource => ProfileType::Resource,
            Self::Permission => ProfileType::Permission,
        }
    }

    /// The trait table for this profile type. Its segments are the
    /// segments a report may contain.
    pub fn traits(self) -> TraitTable {
        match self {
            Self::User => user_traits(),
            Self::Group => group_traits(),
            Self::Dataset => data_set_traits(),
            Self::Resource => resource_traits(),
            Self::Permission => access_traits(),
        }
    }
}

/// Request operations accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperationKind {
    Add,
    Alter,
    Delete,
    Extract,
}

impl From<OperationKind> for RequestOperation {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Add => RequestOperation::Add,
            OperationKind::Alter => RequestOperation::Alter,
            OperationKind::Delete => RequestOperation::Delete,
            OperationKind::Extract => RequestOperation::Extract,
        }
    }
}

/// Parse `segment:key=value` (optionally `add:segment:key=value`).
pub fn parse_trait(arg: &str) -> Result<(String, TraitValue), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected segment:key=value, got '{arg}'"))?;
    if !name.contains(':') {
        return Err(format!("trait '{name}' has no segment (expected segment:key)"));
    }
    let value = match value.parse::<TraitValue>() {
        Ok(value) => value,
        Err(never) => match never {},
    };
    Ok((name.to_string(), value))
}

/// Fail unless a class was given for profile types that need one.
pub fn require_class(kind: ProfileKind, class: Option<&str>) -> Result<()> {
    if kind.profile_type().requires_class() && class.is_none() {
        miette::bail!(
            help = "pass --class <CLASS>",
            "{} profiles need a resource class",
            kind.profile_type()
        );
    }
    Ok(())
}

/// Print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .into_diagnostic()?;
    println!("{json}");
    Ok(())
}
