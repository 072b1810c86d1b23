//! Job board core: pure state machine, share formatting and view-model helpers.
mod effect;
mod msg;
mod posting;
mod share;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{FetchFailure, Msg};
pub use posting::JobPosting;
pub use share::{share_text, NOT_AVAILABLE, NOT_DISCLOSED};
pub use state::{AppState, COPIED_RESET_DELAY};
pub use update::update;
pub use view_model::{AppViewModel, PostingRowView};
