use crate::JobPosting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for the latest postings.
    FetchClicked,
    /// Engine delivered a parsed posting list, in received order.
    FetchSucceeded {
        postings: Vec<JobPosting>,
        fetched_at: String,
    },
    /// Engine gave up on the request.
    FetchFailed(FetchFailure),
    /// User asked to copy the posting at a display index.
    ShareClicked { index: usize },
    /// Clipboard write for a display index completed.
    ShareCopied { index: usize },
    /// Reset timer for a copy generation fired.
    CopiedExpired { generation: u64 },
    /// User asked to open the apply link at a display index.
    ApplyClicked { index: usize },
    SelectNext,
    SelectPrevious,
    /// User acknowledged the current alert.
    AlertDismissed,
}

/// Why a fetch produced no postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Upstream reported code 503 inside an otherwise successful response.
    ServiceUnavailable(String),
    /// Network, HTTP status, shape or payload failure.
    Failed(String),
}

impl FetchFailure {
    pub fn message(&self) -> &str {
        match self {
            FetchFailure::ServiceUnavailable(message) | FetchFailure::Failed(message) => message,
        }
    }
}
