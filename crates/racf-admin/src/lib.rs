//! # RACF Profile Administration
//!
//! Builds IRRSMO00 security requests and turns the service's listing
//! reports back into structured profiles.
//!
//! ## Features
//!
//! - **Report parsing** — LISTUSER/LISTGRP/LISTDSD/RLIST output partitioned
//!   into segments and interpreted line by line into typed values
//! - **Result decoding** — `<securityresult>` documents with their return
//!   and reason codes, command messages or error details
//! - **Request building** — `<securityrequest>` documents from
//!   `segment:key` traits validated per profile type
//! - **Administration** — user, group, data set, general resource and
//!   access list facades over a pluggable [`Transport`]
//! - **Redaction** — passwords and pass phrases masked in logs and results
//! - **IBM-1047** — request and result documents in EBCDIC
//!
//! ## Example
//!
//! ```rust
//! use racf_admin::{extract_xml, ProfileType, Value};
//!
//! let xml = r#"<securityresult>
//!   <user name="SQUIDWRD" operation="listdata" requestid="UserRequest">
//!     <command>
//!       <returncode>0</returncode>
//!       <reasoncode>0</reasoncode>
//!       <message>USER=SQUIDWRD  NAME=SQUIDWARD            OWNER=LEONARD   CREATED=23.106</message>
//!       <message> </message>
//!       <message>OMVS INFORMATION</message>
//!       <message>----------------</message>
//!       <message>UID= 0000002424</message>
//!     </command>
//!   </user>
//!   <returncode>0</returncode>
//!   <reasoncode>0</reasoncode>
//! </securityresult>"#;
//!
//! let extracted = extract_xml(ProfileType::User, ["base", "omvs"], xml).unwrap();
//! assert_eq!(extracted.profile.get("base", "owner"), Some(&Value::from("leonard")));
//! assert_eq!(extracted.profile.get("omvs", "uid"), Some(&Value::Int(2424)));
//! ```

pub mod admin;
pub mod cast;
pub mod cursor;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod interpret;
pub mod layout;
pub mod profile;
pub mod redact;
pub mod request;
pub mod result;
pub mod segments;
pub mod split;
pub mod traits;
pub mod transport;
pub mod types;

pub use admin::{
    AccessAdmin, AdminOptions, DataSetAdmin, GroupAdmin, PreparedRequest, ResourceAdmin,
    SecurityAdmin, UserAdmin,
};
pub use encoding::TextEncoding;
pub use error::{AdminError, Result};
pub use extract::{extract, extract_xml, ExtractResult};
pub use profile::{Profile, Segment, Value};
pub use redact::RequestContext;
pub use request::SecurityRequest;
pub use result::{CommandResult, ResultPayload, SecurityResult};
pub use segments::build_profile;
pub use traits::{Trait, TraitOperation, TraitTable, TraitValue};
pub use transport::{ReplayTransport, Transport};
pub use types::{ProfileType, RequestOperation};
