//! Recorder that forwards to several sinks

use std::sync::Arc;

use async_trait::async_trait;
use responsys_domain::TransactionRecord;
use tracing::warn;

use super::ports::{RecorderError, TransactionRecorder};

/// Writes each record to every inner sink.
///
/// All sinks are attempted even if one fails; the first failure is returned.
#[derive(Default, Clone)]
pub struct FanoutRecorder {
    sinks: Vec<Arc<dyn TransactionRecorder>>,
}

impl FanoutRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn TransactionRecorder>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl TransactionRecorder for FanoutRecorder {
    async fn record(&self, record: &TransactionRecord) -> Result<(), RecorderError> {
        let mut first_error = None;

        for (index, sink) in self.sinks.iter().enumerate() {
            if let Err(err) = sink.record(record).await {
                warn!(sink = index, error = %err, "audit sink failed");
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}
