//! Request command - prints the request document without sending it.

use miette::Result;
use racf_admin::{RequestOperation, ReplayTransport, SecurityAdmin, TraitValue};

use super::{require_class, OperationKind, ProfileKind};
use crate::config::Config;

/// Run the request command.
///
/// Secrets are masked in the printed document.
pub fn run(
    operation: OperationKind,
    kind: ProfileKind,
    name: String,
    class: Option<String>,
    traits: Vec<(String, TraitValue)>,
    segments: Vec<String>,
    config: &Config,
) -> Result<()> {
    require_class(kind, class.as_deref())?;

    let admin = SecurityAdmin::new(ReplayTransport::new(), kind.traits(), config.admin);
    let operation = RequestOperation::from(operation);
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    let prepared = admin.prepare(operation, &name, class.as_deref(), traits, &segments)?;

    tracing::debug!(
        "Prepared {} {} {} with {} trait(s)",
        operation,
        kind.profile_type(),
        name,
        prepared.request.traits().len()
    );
    println!("{}", prepared.redacted_xml());
    Ok(())
}
