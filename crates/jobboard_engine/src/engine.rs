use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use board_logging::{board_debug, board_warn};

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineEvent, FailureKind, FetchError};

enum EngineCommand {
    FetchUpdates { request_id: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine: {0}")]
    Startup(#[from] std::io::Error),
    #[error("engine stopped; request {request_id} was not sent")]
    Stopped { request_id: u64 },
}

/// Runs fetches on a background tokio runtime and reports `EngineEvent`s.
///
/// Every accepted request produces exactly one `UpdatesFetched`, even when
/// the fetch task panics. Dropping the handle stops the background thread
/// once queued commands have been handed to the runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    next_request_id: AtomicU64,
}

impl EngineHandle {
    pub fn start(
        settings: FetchSettings,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)), event_tx)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("jobboard-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher, command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx,
            next_request_id: AtomicU64::new(1),
        })
    }

    /// Queues one request and returns its id.
    ///
    /// Fails when the engine thread is gone; no event follows in that case.
    pub fn fetch_updates(&self) -> Result<u64, EngineError> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        self.cmd_tx
            .send(EngineCommand::FetchUpdates { request_id })
            .map_err(|_| EngineError::Stopped { request_id })?;
        Ok(request_id)
    }
}

async fn handle_command(
    fetcher: Arc<dyn Fetcher>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchUpdates { request_id } => {
            board_debug!("Request {} started", request_id);
            let task = tokio::spawn(async move { fetcher.fetch_updates().await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(FetchError::new(FailureKind::Aborted, err.to_string())),
            };
            if let Err(err) = &result {
                board_warn!("Request {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::UpdatesFetched { request_id, result });
        }
    }
}
