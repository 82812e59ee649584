//! Request traits — the fields a caller asks to set, add, remove or delete.
//!
//! Callers name traits as `segment:key` (`base:special`, `omvs:uid`). An
//! operation prefix (`add:`, `remove:`, `delete:`) selects something other
//! than a plain set; a plain boolean `false` means delete. Each profile type
//! has a [`TraitTable`] mapping trait names to request element names, and
//! its segment list is also the set of segments its reports may contain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::profile::BASE_SEGMENT;
use crate::types::ProfileType;

/// What to do with a trait's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitOperation {
    /// Replace the field's value.
    #[default]
    Set,
    /// Add to a list-valued field.
    Add,
    /// Remove from a list-valued field.
    Remove,
    /// Delete the field.
    Delete,
}

impl TraitOperation {
    /// Value of the `operation` attribute on a trait element.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Delete => "del",
        }
    }

    /// Parse an operation prefix (`add`, `remove`, `delete`).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// A trait value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    /// Flags such as `base:special`.
    Bool(bool),
    /// Numbers such as `omvs:uid`.
    Int(i64),
    /// Free text.
    Str(String),
    /// Several values, sent space-separated.
    List(Vec<String>),
}

impl TraitValue {
    /// Text sent in the trait element, if any. Booleans carry no text.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Bool(_) => None,
            Self::Int(n) => Some(n.to_string()),
            Self::Str(s) => Some(s.clone()),
            Self::List(items) => Some(items.join(" ")),
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            other => f.write_str(&other.text().unwrap_or_default()),
        }
    }
}

/// `true`/`false` become booleans, whole numbers integers, anything
/// with a space a list, everything else text.
impl FromStr for TraitValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => match s.parse::<i64>() {
                Ok(n) => Self::Int(n),
                Err(_) if s.contains(' ') => {
                    Self::List(s.split_whitespace().map(str::to_string).collect())
                }
                Err(_) => Self::Str(s.to_string()),
            },
        })
    }
}

impl From<bool> for TraitValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for TraitValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for TraitValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for TraitValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// One validated trait of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trait {
    /// Segment the trait belongs to.
    pub segment: String,
    /// Trait name without segment (`special`, `uid`).
    pub key: String,
    /// Request element name (`racf:special`).
    pub element: String,
    /// The value.
    pub value: TraitValue,
    /// What to do with it.
    pub operation: TraitOperation,
}

impl Trait {
    /// `segment:key`.
    pub fn name(&self) -> String {
        format!("{}:{}", self.segment, self.key)
    }
}

/// Fields of one segment: `(trait key, element name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SegmentTraits {
    name: String,
    fields: Vec<(String, String)>,
}

/// Valid traits for one profile type, by segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitTable {
    profile_type: ProfileType,
    segments: Vec<SegmentTraits>,
}

impl TraitTable {
    /// An empty table with only a `base` segment.
    pub fn new(profile_type: ProfileType) -> Self {
        Self {
            profile_type,
            segments: vec![SegmentTraits {
                name: BASE_SEGMENT.to_string(),
                fields: Vec::new(),
            }],
        }
    }

    /// Add fields to a segment, creating it if needed.
    pub fn with_segment(mut self, segment: &str, fields: &[(&str, &str)]) -> Self {
        self.add_segment(segment, fields.iter().map(|(k, e)| (*k, *e)));
        self
    }

    /// Add a caller-defined segment (installation custom fields). Element
    /// names are the keys themselves.
    pub fn add_custom_segment<I, S>(&mut self, segment: &str, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        self.add_segment(segment, keys.iter().map(|k| (k.as_str(), k.as_str())));
    }

    fn add_segment<'a>(&mut self, segment: &str, fields: impl Iterator<Item = (&'a str, &'a str)>) {
        let index = match self.segments.iter().position(|s| s.name == segment) {
            Some(index) => index,
            None => {
                self.segments.push(SegmentTraits {
                    name: segment.to_string(),
                    fields: Vec::new(),
                });
                self.segments.len() - 1
            }
        };
        let entry = &mut self.segments[index];
        for (key, element) in fields {
            entry.fields.retain(|(k, _)| k != key);
            entry.fields.push((key.to_string(), element.to_string()));
        }
    }

    /// Profile type the table describes.
    pub fn profile_type(&self) -> ProfileType {
        self.profile_type
    }

    /// Segment names, `base` first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.name.as_str())
    }

    /// Check if a segment is known.
    pub fn has_segment(&self, segment: &str) -> bool {
        self.segments.iter().any(|s| s.name == segment)
    }

    /// Element name for `segment` / `key`.
    pub fn element(&self, segment: &str, key: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.name == segment)?
            .fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, e)| e.as_str())
    }

    /// Validate one `[operation:]segment:key` trait. `None` when the
    /// segment or key is unknown or the prefix is not an operation.
    pub fn resolve(&self, name: &str, value: TraitValue) -> Option<Trait> {
        let parts: Vec<&str> = name.split(':').collect();
        let (operation, segment, key) = match parts.as_slice() {
            [segment, key] => {
                let operation = if value == TraitValue::Bool(false) {
                    TraitOperation::Delete
                } else {
                    TraitOperation::Set
                };
                (operation, *segment, *key)
            }
            [prefix, segment, key] => (TraitOperation::from_prefix(prefix)?, *segment, *key),
            _ => return None,
        };
        let element = self.element(segment, key)?;
        Some(Trait {
            segment: segment.to_string(),
            key: key.to_string(),
            element: element.to_string(),
            value,
            operation,
        })
    }

    /// Validate a batch of traits, dropping (with a warning) any the table
    /// does not know.
    pub fn resolve_all<I, K>(&self, traits: I) -> Vec<Trait>
    where
        I: IntoIterator<Item = (K, TraitValue)>,
        K: AsRef<str>,
    {
        traits
            .into_iter()
            .filter_map(|(name, value)| {
                let name = name.as_ref();
                let resolved = self.resolve(name, value);
                if resolved.is_none() {
                    warn!(
                        profile_type = %self.profile_type,
                        name,
                        "dropping unknown trait"
                    );
                }
                resolved
            })
            .collect()
    }
}
