//! Secret redaction for logged and returned documents.
//!
//! A [`RequestContext`] is built from a request's traits and travels with
//! that request and its result. Nothing outlives the call.

use crate::traits::Trait;

/// Traits whose values never appear in logs or returned results.
const SECRET_TRAITS: &[&str] = &["base:password", "base:passphrase"];

/// Secrets of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    secrets: Vec<String>,
}

impl RequestContext {
    /// Collect the secret values among `traits`.
    pub fn from_traits(traits: &[Trait]) -> Self {
        let mut secrets: Vec<String> = traits
            .iter()
            .filter(|t| SECRET_TRAITS.contains(&t.name().as_str()))
            .filter_map(|t| t.value.text())
            .filter(|s| !s.is_empty())
            .collect();
        // Longest first, so a secret containing another is masked whole.
        secrets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        secrets.dedup();
        Self { secrets }
    }

    /// Check if there is anything to redact.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Replace every secret in `text` with a run of `*` of the same length.
    pub fn redact(&self, text: &str) -> String {
        self.secrets.iter().fold(text.to_string(), |acc, secret| {
            acc.replace(secret.as_str(), &"*".repeat(secret.chars().count()))
        })
    }

    /// `segment:key = value` lines for logging, secrets masked.
    pub fn describe_traits(&self, traits: &[Trait]) -> Vec<String> {
        traits
            .iter()
            .map(|t| {
                format!(
                    "{} [{}] = {}",
                    t.name(),
                    t.operation.attribute(),
                    self.redact(&t.value.to_string())
                )
            })
            .collect()
    }
}
