//! Audit sink that emits records as tracing events

use async_trait::async_trait;
use responsys_core::endpoints::redact_url;
use responsys_core::{RecorderError, TransactionRecorder};
use responsys_domain::TransactionRecord;

/// Logs every transaction under the `responsys::audit` target.
///
/// Successful calls log at `info`, failed ones at `warn`. Request and
/// response bodies are only included at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTransactionRecorder;

impl TracingTransactionRecorder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransactionRecorder for TracingTransactionRecorder {
    async fn record(&self, record: &TransactionRecord) -> Result<(), RecorderError> {
        match record.response_error.as_deref() {
            Some(error) => tracing::warn!(
                target: "responsys::audit",
                record_id = %record.id,
                request_uri = %redact_url(&record.request_uri),
                status = record.response_status,
                response_time = record.response_time,
                error,
                "transaction failed"
            ),
            None => tracing::info!(
                target: "responsys::audit",
                record_id = %record.id,
                request_uri = %redact_url(&record.request_uri),
                status = record.response_status,
                response_time = record.response_time,
                "transaction completed"
            ),
        }

        tracing::debug!(
            target: "responsys::audit",
            record_id = %record.id,
            request = %record.request,
            response = %record.response,
            "transaction bodies"
        );
        Ok(())
    }
}
