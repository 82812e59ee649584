//! Parse command - structures a saved service result offline.

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result, WrapErr};
use racf_admin::extract_xml;

use super::{print_json, ProfileKind};
use crate::config::Config;

/// Run the parse command.
pub fn run(kind: ProfileKind, input: PathBuf, config: &Config) -> Result<()> {
    let bytes = std::fs::read(&input)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read result file: {}", input.display()))?;
    let text = config.admin.encoding.decode(&bytes)?;

    tracing::info!("Parsing {} result: {}", kind.profile_type(), input.display());

    let table = kind.traits();
    let extracted = extract_xml(kind.profile_type(), table.segments(), &text)
        .wrap_err_with(|| format!("Failed to extract profile from {}", input.display()))?;
    print_json(&extracted, config.output.pretty)
}
