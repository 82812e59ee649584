//! Transport seam — the opaque byte-in/byte-out call into the service.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AdminError, Result};

/// Delivers one encoded request and returns the encoded result.
///
/// Implementations block until the service answers. Errors are passed to
/// the caller unchanged.
pub trait Transport {
    /// Send `request`, returning the raw result document.
    fn call(&mut self, request: &[u8]) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        (**self).call(request)
    }
}

/// Replays recorded result documents in order and keeps every request it
/// was handed.
#[derive(Debug, Clone, Default)]
pub struct ReplayTransport {
    responses: VecDeque<Vec<u8>>,
    requests: Vec<Vec<u8>>,
}

impl ReplayTransport {
    /// A transport with nothing to replay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one response.
    pub fn with_response(mut self, response: impl Into<Vec<u8>>) -> Self {
        self.push_response(response);
        self
    }

    /// Queue one response.
    pub fn push_response(&mut self, response: impl Into<Vec<u8>>) {
        self.responses.push_back(response.into());
    }

    /// Queue the contents of a saved result file.
    pub fn push_file(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path).map_err(|e| AdminError::Transport {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        self.push_response(bytes);
        Ok(())
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> &[Vec<u8>] {
        &self.requests
    }

    /// Number of responses not yet replayed.
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Transport for ReplayTransport {
    fn call(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.requests.push(request.to_vec());
        let response = self.responses.pop_front().ok_or_else(|| AdminError::Transport {
            message: "no recorded response left to replay".to_string(),
        })?;
        debug!(
            request_bytes = request.len(),
            response_bytes = response.len(),
            "replayed response"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order_and_records_requests() {
        let mut transport = ReplayTransport::new()
            .with_response("first")
            .with_response("second");
        assert_eq!(transport.call(b"a").unwrap(), b"first");
        assert_eq!(transport.call(b"b").unwrap(), b"second");
        assert_eq!(transport.requests(), &[b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(transport.remaining(), 0);
    }

    #[test]
    fn test_exhausted_replay_is_a_transport_error() {
        let mut transport = ReplayTransport::new();
        let err = transport.call(b"a").unwrap_err();
        assert!(matches!(err, AdminError::Transport { .. }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_boxed_transport() {
        let mut transport: Box<dyn Transport> = Box::new(ReplayTransport::new().with_response("x"));
        assert_eq!(transport.call(b"").unwrap(), b"x");
    }
}
