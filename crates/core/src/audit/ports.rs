//! Port interface for the transaction audit sink

use async_trait::async_trait;
use responsys_domain::TransactionRecord;
use thiserror::Error;

/// Failures reported by an audit sink.
///
/// These never reach API callers; the transport client logs and drops them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecorderError {
    #[error("Audit sink I/O error: {0}")]
    Io(String),

    #[error("Audit record serialization failed: {0}")]
    Serialization(String),

    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Durably stores one record per outbound HTTP call.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    /// Persist `record`. Called once per request, before the outcome is
    /// returned to the caller.
    async fn record(&self, record: &TransactionRecord) -> Result<(), RecorderError>;
}
