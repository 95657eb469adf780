//! Batched, best-effort diagnostic file sink.
//!
//! Diagnostics are pushed onto an unbounded channel and written as JSON lines
//! by a spawned task, `flush_every` entries at a time. The strategy never waits
//! on the writer; write failures are logged and the entries dropped.

use std::path::PathBuf;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};
use wheelhouse_execution::{DiagnosticSink, SpinDiagnostic};

/// Sending half; cheap to clone and safe to move into a blocking task.
#[derive(Clone)]
pub struct FileSink {
    tx: mpsc::UnboundedSender<SpinDiagnostic>,
}

/// Handle to the writer task.
pub struct Writer {
    handle: JoinHandle<u64>,
}

impl FileSink {
    /// Spawn the writer task. Must be called from within a tokio runtime.
    pub fn spawn(path: PathBuf, flush_every: usize) -> (Self, Writer) {
        let (tx, mut rx) = mpsc::unbounded_channel::<SpinDiagnostic>();
        let flush_every = flush_every.max(1);

        let handle = tokio::spawn(async move {
            let mut file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
            {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to open diagnostics file");
                    None
                }
            };

            let mut buffer = String::new();
            let mut pending = 0usize;
            let mut written = 0u64;
            while let Some(diagnostic) = rx.recv().await {
                match serde_json::to_string(&diagnostic) {
                    Ok(line) => {
                        buffer.push_str(&line);
                        buffer.push('\n');
                        pending += 1;
                    }
                    Err(e) => warn!(error = %e, "failed to serialize diagnostic"),
                }
                if pending >= flush_every {
                    written += flush(&mut file, &mut buffer, pending).await;
                    pending = 0;
                }
            }

            // Final flush
            if pending > 0 {
                written += flush(&mut file, &mut buffer, pending).await;
            }
            debug!(path = %path.display(), written, "diagnostics writer stopped");
            written
        });

        (Self { tx }, Writer { handle })
    }
}

async fn flush(file: &mut Option<tokio::fs::File>, buffer: &mut String, pending: usize) -> u64 {
    let Some(handle) = file.as_mut() else {
        buffer.clear();
        return 0;
    };
    let mut result = handle.write_all(buffer.as_bytes()).await;
    if result.is_ok() {
        result = handle.flush().await;
    }
    buffer.clear();
    match result {
        Ok(()) => pending as u64,
        Err(e) => {
            warn!(error = %e, dropped = pending, "failed to write diagnostics batch");
            0
        }
    }
}

impl DiagnosticSink for FileSink {
    fn record(&self, diagnostic: &SpinDiagnostic) {
        if self.tx.send(diagnostic.clone()).is_err() {
            warn!("diagnostics writer is gone");
        }
    }
}

impl Writer {
    /// Wait for every queued diagnostic to be written once all [FileSink]s
    /// are dropped. Returns the number of lines written.
    pub async fn finish(self) -> u64 {
        match self.handle.await {
            Ok(written) => written,
            Err(e) => {
                warn!(error = %e, "diagnostics writer panicked");
                0
            }
        }
    }
}
