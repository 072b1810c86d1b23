use url::Url;

use crate::{share_text, AppState, Effect, Msg, COPIED_RESET_DELAY};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FetchClicked => {
            // The fetch button is disabled while a request is in flight.
            if state.is_loading() {
                Vec::new()
            } else {
                state.begin_fetch();
                vec![Effect::FetchUpdates]
            }
        }
        Msg::FetchSucceeded {
            postings,
            fetched_at,
        } => {
            state.replace_postings(postings, fetched_at);
            state.end_fetch();
            Vec::new()
        }
        Msg::FetchFailed(failure) => {
            state.raise_alert(failure.message());
            state.end_fetch();
            Vec::new()
        }
        Msg::ShareClicked { index } => match state.posting(index) {
            Some(posting) => vec![Effect::CopyToClipboard {
                index,
                text: share_text(posting),
            }],
            None => Vec::new(),
        },
        Msg::ShareCopied { index } => {
            if state.posting(index).is_none() {
                // The list was replaced while the clipboard write was pending.
                return (state, Vec::new());
            }
            let generation = state.mark_copied(index);
            vec![Effect::ScheduleCopiedReset {
                generation,
                delay: COPIED_RESET_DELAY,
            }]
        }
        Msg::CopiedExpired { generation } => {
            state.expire_copied(generation);
            Vec::new()
        }
        Msg::ApplyClicked { index } => {
            let Some(link) = state.posting(index).map(|p| p.apply_link.clone()) else {
                return (state, Vec::new());
            };
            if is_openable_link(&link) {
                vec![Effect::OpenLink {
                    url: link.trim().to_string(),
                }]
            } else {
                state.raise_alert(&format!("cannot open apply link {link:?}"));
                Vec::new()
            }
        }
        Msg::SelectNext => {
            state.move_selection(true);
            Vec::new()
        }
        Msg::SelectPrevious => {
            state.move_selection(false);
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
    };

    (state, effects)
}

fn is_openable_link(raw: &str) -> bool {
    Url::parse(raw.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
