use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{db::ScanHistoryStore, models::ScanResult};

/// Queues scan results for persistence off the request path
#[derive(Clone)]
pub struct HistoryWriter {
    write_tx: mpsc::UnboundedSender<ScanResult>,
}

/// Handle for gracefully shutting down the history writer
pub struct HistoryWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl HistoryWriterHandle {
    /// Signals the writer to stop and waits until queued scans are flushed
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("History writer shutdown signal sent");

        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "History writer task ended abnormally");
        }
    }
}

impl HistoryWriter {
    /// Spawns the background writer task on the current runtime
    pub fn spawn(store: Arc<dyn ScanHistoryStore>) -> (Self, HistoryWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            Self::writer_task(store, write_rx, shutdown_rx).await;
        });

        (Self { write_tx }, HistoryWriterHandle { shutdown_tx, task })
    }

    async fn writer_task(
        store: Arc<dyn ScanHistoryStore>,
        mut write_rx: mpsc::UnboundedReceiver<ScanResult>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!(store = store.name(), "History writer task started");

        loop {
            tokio::select! {
                Some(scan) = write_rx.recv() => {
                    Self::write(store.as_ref(), scan).await;
                }
                Some(()) = shutdown_rx.recv() => {
                    // Stop accepting new scans, then drain what is already queued
                    write_rx.close();
                    let mut flushed = 0;
                    while let Some(scan) = write_rx.recv().await {
                        Self::write(store.as_ref(), scan).await;
                        flushed += 1;
                    }

                    tracing::info!(flushed, "History writer task stopped");
                    break;
                }
                // Every writer and the handle are gone
                else => break,
            }
        }
    }

    async fn write(store: &dyn ScanHistoryStore, scan: ScanResult) {
        if let Err(e) = store.save(&scan).await {
            tracing::error!(error = %e, scan_id = %scan.scan_id, "Failed to persist scan result");
        }
    }

    /// Queues a scan for persistence and returns immediately.
    ///
    /// Returns `false` if the writer has shut down and the scan was dropped.
    pub fn save_in_background(&self, scan: ScanResult) -> bool {
        match self.write_tx.send(scan) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(scan_id = %e.0.scan_id, "History writer is closed, scan dropped");
                false
            }
        }
    }
}
