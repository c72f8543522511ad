//! Append-only JSON Lines audit log

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use responsys_core::{RecorderError, TransactionRecorder};
use responsys_domain::TransactionRecord;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Writes each transaction as one JSON object per line.
///
/// The file and its parent directories are created on first write. Appends
/// are serialized so concurrent records never interleave.
#[derive(Debug)]
pub struct JsonLinesTransactionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesTransactionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every record in the file, oldest first.
    ///
    /// A missing file yields an empty list.
    pub async fn read_all(&self) -> Result<Vec<TransactionRecord>, RecorderError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RecorderError::Io(e.to_string())),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| RecorderError::Serialization(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl TransactionRecorder for JsonLinesTransactionLog {
    async fn record(&self, record: &TransactionRecord) -> Result<(), RecorderError> {
        let mut line =
            serde_json::to_string(record).map_err(|e| RecorderError::Serialization(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| RecorderError::Io(e.to_string()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RecorderError::Io(e.to_string()))?;

        file.write_all(line.as_bytes()).await.map_err(|e| RecorderError::Io(e.to_string()))?;
        file.flush().await.map_err(|e| RecorderError::Io(e.to_string()))?;

        tracing::trace!(record_id = %record.id, path = %self.path.display(), "transaction appended");
        Ok(())
    }
}
