//! Extract command - runs a full extract against a recorded response.

use std::path::PathBuf;

use miette::{Result, WrapErr};
use racf_admin::{ReplayTransport, SecurityAdmin};

use super::{print_json, require_class, ProfileKind};
use crate::config::Config;

/// Run the extract command.
pub fn run(
    kind: ProfileKind,
    name: String,
    class: Option<String>,
    replay: PathBuf,
    segments: Vec<String>,
    config: &Config,
) -> Result<()> {
    require_class(kind, class.as_deref())?;

    let mut transport = ReplayTransport::new();
    transport
        .push_file(&replay)
        .wrap_err_with(|| format!("Failed to load replay file: {}", replay.display()))?;

    let mut admin = SecurityAdmin::new(transport, kind.traits(), config.admin);
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    let extracted = admin.extract(&name, class.as_deref(), &segments)?;

    print_json(&extracted, config.output.pretty)
}
