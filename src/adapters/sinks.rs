use crate::core::{EventSink, Result, ServiceResolutionEvent};
use crate::utils::error::DiagError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Writes each event to the `service_resolution` tracing target.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

#[async_trait]
impl EventSink for TracingSink {
    async fn export(&self, event: &ServiceResolutionEvent) -> Result<()> {
        let fields = serde_json::to_string(&event.fields)?;
        tracing::info!(
            target: "service_resolution",
            name = %event.name,
            resolved_at = %event.resolved_at.to_rfc3339(),
            fields = %fields,
            "Service resolved"
        );
        Ok(())
    }
}

/// Appends events to a file, one JSON object per line.
pub struct JsonLinesSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventSink for JsonLinesSink {
    async fn export(&self, event: &ServiceResolutionEvent) -> Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line).await.map_err(|e| DiagError::ExportError {
            message: format!("{}: {}", self.path.display(), e),
        })?;
        file.flush().await?;
        Ok(())
    }
}
