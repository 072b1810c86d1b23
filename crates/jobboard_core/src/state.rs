use std::collections::VecDeque;
use std::time::Duration;

use crate::view_model::{AppViewModel, PostingRowView};
use crate::JobPosting;

/// How long the copied marker stays on a row after a successful share.
pub const COPIED_RESET_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// Display order: most recent first.
    postings: Vec<JobPosting>,
    loading: bool,
    copied: Option<usize>,
    copy_generation: u64,
    selected: usize,
    /// Shown one at a time, oldest first.
    alerts: VecDeque<String>,
    last_updated: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            loading: self.loading,
            rows: self
                .postings
                .iter()
                .enumerate()
                .map(|(index, posting)| PostingRowView {
                    index,
                    company_name: posting.company_name.clone(),
                    role: posting.role.clone(),
                    years_of_experience: posting.years_display().to_string(),
                    batch_eligible: posting.batch_display(),
                    salary: posting.salary_display().to_string(),
                    apply_link: posting.apply_link.clone(),
                    copied: self.copied == Some(index),
                })
                .collect(),
            selected: self.selected(),
            alert: self.alerts.front().cloned(),
            queued_alerts: self.alerts.len().saturating_sub(1),
            last_updated: self.last_updated.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn posting(&self, index: usize) -> Option<&JobPosting> {
        self.postings.get(index)
    }

    pub fn copied(&self) -> Option<usize> {
        self.copied
    }

    pub fn copy_generation(&self) -> u64 {
        self.copy_generation
    }

    /// The alert currently on screen.
    pub fn alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.loading = true;
        self.mark_dirty();
    }

    pub(crate) fn end_fetch(&mut self) {
        self.loading = false;
        self.mark_dirty();
    }

    /// Replaces every posting with `received`, reversed for display.
    pub(crate) fn replace_postings(&mut self, mut received: Vec<JobPosting>, fetched_at: String) {
        received.reverse();
        self.postings = received;
        self.selected = 0;
        self.copied = None;
        self.last_updated = Some(fetched_at);
        self.mark_dirty();
    }

    /// Queues an alert behind any that are already showing.
    pub(crate) fn raise_alert(&mut self, message: &str) {
        self.alerts.push_back(format!("Error: {message}"));
        self.mark_dirty();
    }

    pub(crate) fn dismiss_alert(&mut self) -> bool {
        let had_alert = self.alerts.pop_front().is_some();
        if had_alert {
            self.mark_dirty();
        }
        had_alert
    }

    /// Marks `index` as just copied and returns the new copy generation.
    pub(crate) fn mark_copied(&mut self, index: usize) -> u64 {
        self.copy_generation += 1;
        self.copied = Some(index);
        self.mark_dirty();
        self.copy_generation
    }

    pub(crate) fn expire_copied(&mut self, generation: u64) {
        if generation == self.copy_generation && self.copied.is_some() {
            self.copied = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn move_selection(&mut self, forward: bool) {
        let Some(last) = self.postings.len().checked_sub(1) else {
            return;
        };
        let next = if forward {
            (self.selected + 1).min(last)
        } else {
            self.selected.saturating_sub(1)
        };
        if next != self.selected {
            self.selected = next;
            self.mark_dirty();
        }
    }

    /// Display index of the cursor row, `None` while the table is empty.
    pub fn selected(&self) -> Option<usize> {
        (!self.postings.is_empty()).then_some(self.selected)
    }
}
