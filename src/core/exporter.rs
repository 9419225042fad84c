use crate::core::channel::LogStream;
use crate::core::{EventSink, ServiceResolutionEvent};
use serde::Serialize;
use std::future::Future;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub exported: usize,
    pub failed: usize,
}

/// Drains a [`LogStream`] into an [`EventSink`], on the consumer side.
pub struct ResolutionLogExporter<S: EventSink> {
    sink: S,
}

impl<S: EventSink> ResolutionLogExporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Export events until `shutdown` resolves, then flush whatever is still queued.
    ///
    /// Also stops if the channel itself has been dropped.
    pub async fn run<F>(&self, stream: LogStream, shutdown: F) -> ExportSummary
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut summary = ExportSummary::default();

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                next = stream.recv() => match next {
                    Some(event) => self.export_one(&event, &mut summary).await,
                    None => {
                        tracing::debug!("Resolution log channel closed");
                        return summary;
                    }
                },
            }
        }

        let pending = stream.drain_pending();
        if !pending.is_empty() {
            tracing::debug!("Flushing {} pending event(s) on shutdown", pending.len());
        }
        for event in &pending {
            self.export_one(event, &mut summary).await;
        }

        tracing::info!(
            "Resolution log exporter stopped: {} exported, {} failed",
            summary.exported,
            summary.failed
        );
        summary
    }

    async fn export_one(&self, event: &ServiceResolutionEvent, summary: &mut ExportSummary) {
        match self.sink.export(event).await {
            Ok(()) => summary.exported += 1,
            Err(e) => {
                summary.failed += 1;
                tracing::warn!("Failed to export resolution event '{}': {}", event.name, e);
            }
        }
    }
}
