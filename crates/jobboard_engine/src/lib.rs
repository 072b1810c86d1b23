//! Job board engine: updates endpoint client, response decoding and effect execution.
mod engine;
mod envelope;
mod fetch;
mod payload;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use envelope::{extract_payload_text, SERVICE_UNAVAILABLE};
pub use fetch::{updates_endpoint, FetchSettings, Fetcher, ReqwestFetcher, UPDATES_PATH};
pub use payload::{parse_postings, strip_code_fences};
pub use types::{EngineEvent, FailureKind, FetchError, PostingRecord};
