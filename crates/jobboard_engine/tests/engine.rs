use std::sync::{mpsc, Arc};
use std::time::Duration;

use jobboard_engine::{EngineEvent, EngineHandle, FailureKind, FetchError, Fetcher, PostingRecord};
use pretty_assertions::assert_eq;
use serde_json::json;

struct FixedFetcher;

#[async_trait::async_trait]
impl Fetcher for FixedFetcher {
    async fn fetch_updates(&self) -> Result<Vec<PostingRecord>, FetchError> {
        let record = serde_json::from_value(json!({
            "company_name": "Acme",
            "role": "SDE",
            "apply_link": "https://acme.example"
        }))
        .expect("record decodes");
        Ok(vec![record])
    }
}

struct PanickingFetcher;

#[async_trait::async_trait]
impl Fetcher for PanickingFetcher {
    async fn fetch_updates(&self) -> Result<Vec<PostingRecord>, FetchError> {
        panic!("fetcher blew up");
    }
}

fn next_event(event_rx: &mpsc::Receiver<EngineEvent>) -> EngineEvent {
    event_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn injected_fetcher_result_is_reported() {
    let (event_tx, event_rx) = mpsc::channel();
    let engine = EngineHandle::with_fetcher(Arc::new(FixedFetcher), event_tx).expect("engine starts");

    let request_id = engine.fetch_updates().expect("engine running");

    let EngineEvent::UpdatesFetched {
        request_id: got_id,
        result,
    } = next_event(&event_rx);
    assert_eq!(got_id, request_id);
    let postings = result.expect("fetch ok");
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].company_name, "Acme");
}

#[test]
fn panicking_fetch_still_reports_a_failure() {
    let (event_tx, event_rx) = mpsc::channel();
    let engine =
        EngineHandle::with_fetcher(Arc::new(PanickingFetcher), event_tx).expect("engine starts");

    let request_id = engine.fetch_updates().expect("engine running");

    let EngineEvent::UpdatesFetched {
        request_id: got_id,
        result,
    } = next_event(&event_rx);
    assert_eq!(got_id, request_id);
    let err = result.unwrap_err();
    assert_eq!(err.kind, FailureKind::Aborted);
}

#[test]
fn request_ids_increase_per_fetch() {
    let (event_tx, event_rx) = mpsc::channel();
    let engine = EngineHandle::with_fetcher(Arc::new(FixedFetcher), event_tx).expect("engine starts");

    let first = engine.fetch_updates().expect("engine running");
    let second = engine.fetch_updates().expect("engine running");
    assert!(second > first);

    let mut seen = vec![next_event(&event_rx), next_event(&event_rx)]
        .into_iter()
        .map(|EngineEvent::UpdatesFetched { request_id, .. }| request_id)
        .collect::<Vec<_>>();
    seen.sort_unstable();
    assert_eq!(seen, vec![first, second]);
}
