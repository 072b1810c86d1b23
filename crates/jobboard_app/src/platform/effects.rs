use std::sync::mpsc;
use std::thread;

use board_logging::{board_debug, board_info, board_warn};
use jobboard_core::{Effect, FetchFailure, JobPosting, Msg};
use jobboard_engine::{
    EngineError, EngineEvent, EngineHandle, FailureKind, FetchError, FetchSettings, PostingRecord,
};

/// Time format for the "last updated" status line.
const FETCHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::Unavailable(err.to_string())
    }
}

/// Write-only access to a clipboard. Lives on the clipboard worker thread.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard, opened on first write and kept open so the copied
/// text stays available on platforms where the owner must stay alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => Ok(clipboard.set_text(text.to_string())?),
            None => Err(ClipboardError::Unavailable("not opened".to_string())),
        }
    }
}

struct CopyRequest {
    index: usize,
    text: String,
}

pub struct EffectRunner {
    engine: EngineHandle,
    copy_tx: mpsc::Sender<CopyRequest>,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, EngineError> {
        Self::with_clipboard(settings, msg_tx, SystemClipboard::default)
    }

    /// `make_clipboard` runs on the clipboard worker thread.
    pub fn with_clipboard<W, F>(
        settings: FetchSettings,
        msg_tx: mpsc::Sender<Msg>,
        make_clipboard: F,
    ) -> Result<Self, EngineError>
    where
        W: ClipboardWriter + 'static,
        F: FnOnce() -> W + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::start(settings, event_tx)?;
        spawn_event_loop(event_rx, msg_tx.clone())?;
        let copy_tx = spawn_clipboard_worker(make_clipboard, msg_tx.clone())?;
        Ok(Self {
            engine,
            copy_tx,
            msg_tx,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchUpdates => match self.engine.fetch_updates() {
                    Ok(request_id) => board_info!("FetchUpdates request_id={}", request_id),
                    Err(err) => {
                        board_warn!("FetchUpdates not sent: {}", err);
                        let _ = self.msg_tx.send(map_engine_error(&err));
                    }
                },
                Effect::CopyToClipboard { index, text } => {
                    board_debug!("CopyToClipboard index={} text_len={}", index, text.len());
                    if self.copy_tx.send(CopyRequest { index, text }).is_err() {
                        board_warn!("Clipboard worker is gone; copy of row {} dropped", index);
                    }
                }
                Effect::ScheduleCopiedReset { generation, delay } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = msg_tx.send(Msg::CopiedExpired { generation });
                    });
                }
                Effect::OpenLink { url } => {
                    board_info!("OpenLink url={}", url);
                    if let Err(err) = open::that_detached(&url) {
                        board_warn!("Failed to open {}: {}", url, err);
                    }
                }
            }
        }
    }
}

fn spawn_event_loop(
    event_rx: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
) -> std::io::Result<()> {
    thread::Builder::new()
        .name("jobboard-events".to_string())
        .spawn(move || {
            for event in event_rx {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

fn spawn_clipboard_worker<W, F>(
    make_clipboard: F,
    msg_tx: mpsc::Sender<Msg>,
) -> std::io::Result<mpsc::Sender<CopyRequest>>
where
    W: ClipboardWriter + 'static,
    F: FnOnce() -> W + Send + 'static,
{
    let (copy_tx, copy_rx) = mpsc::channel::<CopyRequest>();
    thread::Builder::new()
        .name("jobboard-clipboard".to_string())
        .spawn(move || {
            let mut clipboard = make_clipboard();
            for request in copy_rx {
                match clipboard.write_text(&request.text) {
                    Ok(()) => {
                        let _ = msg_tx.send(Msg::ShareCopied {
                            index: request.index,
                        });
                    }
                    // Not surfaced to the user; the copied marker simply never appears.
                    Err(err) => board_warn!("Copy of row {} failed: {}", request.index, err),
                }
            }
        })?;
    Ok(copy_tx)
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UpdatesFetched { result, .. } => match result {
            Ok(records) => Msg::FetchSucceeded {
                postings: records.into_iter().map(map_posting).collect(),
                fetched_at: chrono::Local::now().format(FETCHED_AT_FORMAT).to_string(),
            },
            Err(err) => Msg::FetchFailed(map_failure(err)),
        },
    }
}

fn map_engine_error(err: &EngineError) -> Msg {
    Msg::FetchFailed(FetchFailure::Failed(err.to_string()))
}

fn map_posting(record: PostingRecord) -> JobPosting {
    JobPosting {
        company_name: record.company_name,
        role: record.role,
        years_of_experience: record.years_of_experience,
        batch_eligible: record.batch_eligible,
        apply_link: record.apply_link,
        salary: record.salary,
    }
}

fn map_failure(err: FetchError) -> FetchFailure {
    match err.kind {
        FailureKind::ServiceUnavailable => FetchFailure::ServiceUnavailable(err.message),
        _ => FetchFailure::Failed(err.to_string()),
    }
}
