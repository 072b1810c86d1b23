use std::time::Duration;

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one request to the updates endpoint.
    FetchUpdates,
    /// Write a share block to the system clipboard.
    CopyToClipboard { index: usize, text: String },
    /// Post `Msg::CopiedExpired { generation }` once `delay` has elapsed.
    ScheduleCopiedReset { generation: u64, delay: Duration },
    /// Open an apply link in the system browser.
    OpenLink { url: String },
}
