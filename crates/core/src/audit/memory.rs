//! In-memory transaction log

use async_trait::async_trait;
use responsys_domain::TransactionRecord;
use tokio::sync::RwLock;

use super::ports::{RecorderError, TransactionRecorder};

/// Keeps every record in memory, in recording order.
#[derive(Debug, Default)]
pub struct MemoryTransactionLog {
    records: RwLock<Vec<TransactionRecord>>,
}

impl MemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub async fn records(&self) -> Vec<TransactionRecord> {
        self.records.read().await.clone()
    }

    pub async fn last(&self) -> Option<TransactionRecord> {
        self.records.read().await.last().cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl TransactionRecorder for MemoryTransactionLog {
    async fn record(&self, record: &TransactionRecord) -> Result<(), RecorderError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}
