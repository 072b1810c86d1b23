#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub loading: bool,
    pub rows: Vec<PostingRowView>,
    pub selected: Option<usize>,
    /// Front of the alert queue; the only one on screen.
    pub alert: Option<String>,
    /// Alerts waiting behind the one shown.
    pub queued_alerts: usize,
    pub last_updated: Option<String>,
}

/// One table row with display substitutes already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingRowView {
    pub index: usize,
    pub company_name: String,
    pub role: String,
    pub years_of_experience: String,
    pub batch_eligible: String,
    pub salary: String,
    pub apply_link: String,
    pub copied: bool,
}
