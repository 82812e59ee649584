//! Per-profile-type line interpreters.
//!
//! Each interpreter classifies the line under the cursor into one of its
//! line shapes, records what the shape carries into the current segment and
//! leaves the cursor on the last line it consumed. The segment builder then
//! steps past it.

pub mod dataset;
pub mod group;
pub mod kv;
pub mod user;

use crate::cursor::ReportCursor;
use crate::error::{AdminError, Result};
use crate::profile::Segment;
use crate::types::{ProfileType, RequestOperation};

/// Interpret the line under the cursor for a report of `profile_type`.
pub fn interpret(
    profile_type: ProfileType,
    cursor: &mut ReportCursor<'_>,
    segment: &mut Segment,
) -> Result<()> {
    match profile_type {
        ProfileType::Dataset | ProfileType::Resource => dataset::interpret(cursor, segment),
        ProfileType::User => user::interpret(cursor, segment),
        ProfileType::Group => group::interpret(cursor, segment),
        ProfileType::Permission => Err(AdminError::UnsupportedOperation {
            profile_type: profile_type.to_string(),
            operation: RequestOperation::Extract.to_string(),
        }),
    }
}
