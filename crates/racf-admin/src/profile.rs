//! Parsed profile data structures — typed scalars, segments and profiles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the segment every profile carries.
pub const BASE_SEGMENT: &str = "base";

/// A value read out of a report.
///
/// The scalar variants are the result of casting one free-text token; `List`
/// holds delimited values, and `Map` holds embedded sub-records (the
/// per-group connect records of a user, the user rows of a group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Blank, `NONE`, `N/A` and friends.
    Null,
    /// Status phrases such as `IN EFFECT` / `NOT IN EFFECT`.
    Bool(bool),
    /// Whole numbers, including `N DAYS` durations.
    Int(i64),
    /// Numbers written with a decimal point (dates like `23.106` land here).
    Float(f64),
    /// Anything else.
    Str(String),
    /// A delimited list of values.
    List(Vec<Value>),
    /// A nested record.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the list payload, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the nested record, if this is a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// `None` for null, `Some(self)` otherwise.
    pub fn non_null(&self) -> Option<&Value> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Map(map) => write!(f, "{{{} fields}}", map.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One named bucket of fields within a profile.
pub type Segment = BTreeMap<String, Value>;

static EMPTY_SEGMENT: Segment = BTreeMap::new();

/// The structured form of one extract request: segment name → segment.
///
/// A profile always has a `base` segment. Other segments are opened when
/// their heading shows up in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    segments: BTreeMap<String, Segment>,
}

impl Profile {
    /// Create a profile holding only an empty base segment.
    pub fn new() -> Self {
        let mut segments = BTreeMap::new();
        segments.insert(BASE_SEGMENT.to_string(), Segment::new());
        Self { segments }
    }

    /// Open a fresh, empty segment, replacing any segment of the same name.
    pub fn open_segment(&mut self, name: &str) -> &mut Segment {
        self.segments.insert(name.to_string(), Segment::new());
        self.segment_entry(name)
    }

    /// Mutable access to a segment, creating it if absent.
    pub fn segment_entry(&mut self, name: &str) -> &mut Segment {
        self.segments.entry(name.to_string()).or_default()
    }

    /// Look up a segment by name.
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.get(name)
    }

    /// The base segment.
    pub fn base(&self) -> &Segment {
        self.segments.get(BASE_SEGMENT).unwrap_or(&EMPTY_SEGMENT)
    }

    /// Look up one field of one segment.
    pub fn get(&self, segment: &str, field: &str) -> Option<&Value> {
        self.segments.get(segment).and_then(|s| s.get(field))
    }

    /// Look up one field, treating null the same as absent.
    pub fn get_non_null(&self, segment: &str, field: &str) -> Option<&Value> {
        self.get(segment, field).and_then(Value::non_null)
    }

    /// Segment names in sorted order.
    pub fn segment_names(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    /// Consume the profile, yielding the segment map.
    pub fn into_segments(self) -> BTreeMap<String, Segment> {
        self.segments
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}
