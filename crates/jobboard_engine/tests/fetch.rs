use std::sync::mpsc;
use std::time::Duration;

use jobboard_engine::{
    EngineEvent, EngineHandle, FailureKind, FetchSettings, Fetcher, PostingRecord, ReqwestFetcher,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope_with_text(text: &str) -> serde_json::Value {
    json!({
        "messages": {
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        }
    })
}

async fn serve(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/fetch_updates"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn fetcher_for(server: &MockServer) -> ReqwestFetcher {
    ReqwestFetcher::new(FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    })
}

#[tokio::test]
async fn fetcher_posts_and_parses_fenced_payload() {
    let server = MockServer::start().await;
    let text = "```json\n[\n  {\"company_name\": \"Acme\", \"role\": \"SDE\", \"years_of_experience\": \"0-1 years\", \"batch_eligible\": [\"2024\", 2025], \"apply_link\": \"https://acme.example/apply\", \"salary\": \"12 LPA\"},\n  {\"company_name\": \"Globex\", \"role\": \"Intern\", \"years_of_experience\": null, \"batch_eligible\": [], \"apply_link\": \"https://globex.example\"}\n]\n```\n";
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope_with_text(text)),
    )
    .await;

    let postings = fetcher_for(&server).fetch_updates().await.expect("fetch ok");

    assert_eq!(
        postings,
        vec![
            PostingRecord {
                company_name: "Acme".to_string(),
                role: "SDE".to_string(),
                years_of_experience: Some("0-1 years".to_string()),
                batch_eligible: vec!["2024".to_string(), "2025".to_string()],
                apply_link: "https://acme.example/apply".to_string(),
                salary: Some("12 LPA".to_string()),
            },
            PostingRecord {
                company_name: "Globex".to_string(),
                role: "Intern".to_string(),
                years_of_experience: None,
                batch_eligible: Vec::new(),
                apply_link: "https://globex.example".to_string(),
                salary: None,
            },
        ]
    );
}

#[tokio::test]
async fn base_url_trailing_slash_is_tolerated() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope_with_text("[]")),
    )
    .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: format!("{}/", server.uri()),
        ..FetchSettings::default()
    });

    assert_eq!(fetcher.fetch_updates().await.expect("fetch ok"), Vec::new());
}

#[tokio::test]
async fn fetcher_reports_service_unavailable_message() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "messages": {
                "error": {
                    "code": 503,
                    "message": "The model is overloaded. Please try again later.",
                    "status": "UNAVAILABLE"
                }
            }
        })),
    )
    .await;

    let err = fetcher_for(&server).fetch_updates().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::ServiceUnavailable);
    assert_eq!(err.message, "The model is overloaded. Please try again later.");
    assert_eq!(
        err.to_string(),
        "The model is overloaded. Please try again later."
    );
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(500)).await;

    let err = fetcher_for(&server).fetch_updates().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn fetcher_rejects_malformed_payload() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope_with_text("Sorry, no jobs today.")),
    )
    .await;

    let err = fetcher_for(&server).fetch_updates().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedPayload);
}

#[tokio::test]
async fn fetcher_rejects_non_json_body() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"),
    )
    .await;

    let err = fetcher_for(&server).fetch_updates().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::UnexpectedShape);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope_with_text("[]")),
    )
    .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..FetchSettings::default()
    });

    let err = fetcher.fetch_updates().await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 10, .. }
    ));
}

#[tokio::test]
async fn fetcher_times_out_when_configured() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(250))
            .set_body_json(envelope_with_text("[]")),
    )
    .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..FetchSettings::default()
    });

    let err = fetcher.fetch_updates().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_reports_network_failure() {
    // Nothing listens on the discard port of the loopback address.
    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        ..FetchSettings::default()
    });

    let err = fetcher.fetch_updates().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn fetcher_rejects_invalid_base_url() {
    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: "not a url".to_string(),
        ..FetchSettings::default()
    });

    let err = fetcher.fetch_updates().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_handle_reports_through_channel() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope_with_text(
            "[{\"company_name\": \"Acme\", \"role\": \"SDE\", \"batch_eligible\": [], \"apply_link\": \"https://acme.example\"}]",
        )),
    )
    .await;

    let (event_tx, event_rx) = mpsc::channel();
    let engine = EngineHandle::start(
        FetchSettings {
            base_url: server.uri(),
            ..FetchSettings::default()
        },
        event_tx,
    )
    .expect("engine starts");

    let request_id = engine.fetch_updates().expect("engine running");
    let event = tokio::task::spawn_blocking(move || event_rx.recv_timeout(Duration::from_secs(5)))
        .await
        .expect("join")
        .expect("engine event");

    let EngineEvent::UpdatesFetched {
        request_id: got_id,
        result,
    } = event;
    assert_eq!(got_id, request_id);
    let postings = result.expect("fetch ok");
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].company_name, "Acme");
}
