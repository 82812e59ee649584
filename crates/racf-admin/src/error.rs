//! Security administration error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::result::SecurityResult;

/// Errors produced while building requests, calling the service or
/// interpreting its reports.
#[derive(Debug, Error, Diagnostic)]
pub enum AdminError {
    /// The service rejected the request or returned an error payload.
    #[error(
        "security request failed (return code {}, reason code {})",
        result.return_code,
        result.reason_code
    )]
    #[diagnostic(
        code(racf_admin::security_request),
        help("Inspect the attached result for the service's messages")
    )]
    SecurityRequest {
        /// The complete decoded result, codes included.
        result: Box<SecurityResult>,
    },

    /// A report line was missing or did not have the expected shape.
    #[error("malformed report at line {line}: {reason}")]
    #[diagnostic(code(racf_admin::malformed_report))]
    MalformedReport {
        /// Zero-based index of the offending line.
        line: usize,
        /// What was expected.
        reason: String,
    },

    /// The result document could not be decoded.
    #[error("malformed security result: {message}")]
    #[diagnostic(code(racf_admin::malformed_result))]
    MalformedResult {
        /// The decoder's complaint.
        message: String,
    },

    /// Text could not be converted to or from the configured encoding.
    #[error("encoding error: {message}")]
    #[diagnostic(code(racf_admin::encoding))]
    Encoding {
        /// The error description.
        message: String,
    },

    /// The transport failed to deliver the request.
    #[error("transport error: {message}")]
    #[diagnostic(code(racf_admin::transport))]
    Transport {
        /// The error description.
        message: String,
    },

    /// The profile type does not support the requested operation.
    #[error("{operation} is not supported for {profile_type} profiles")]
    #[diagnostic(code(racf_admin::unsupported_operation))]
    UnsupportedOperation {
        /// Profile type the request named.
        profile_type: String,
        /// The rejected operation.
        operation: String,
    },
}

/// Convenience result type for administration operations.
pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    /// The decoded result carried by a request failure.
    pub fn security_result(&self) -> Option<&SecurityResult> {
        match self {
            Self::SecurityRequest { result } => Some(result),
            _ => None,
        }
    }

    pub(crate) fn malformed_result(message: impl Into<String>) -> Self {
        Self::MalformedResult {
            message: message.into(),
        }
    }
}

impl From<roxmltree::Error> for AdminError {
    fn from(err: roxmltree::Error) -> Self {
        Self::malformed_result(err.to_string())
    }
}
