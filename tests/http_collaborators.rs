use httpmock::prelude::*;
use serde_json::json;

use recommend_core::backend::{BackendError, GeminiBackend, GeminiConfig, GenerativeBackend};
use recommend_core::catalog::Catalog;
use recommend_core::fetch::http::DEFAULT_USER_AGENT;
use recommend_core::fetch::{HttpPageFetcher, PageFetcher, FAILURE_MARKER};
use recommend_core::types::RecommendRequest;
use recommend_core::Recommender;

const MODEL_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn gemini_config(server: &MockServer) -> GeminiConfig {
    GeminiConfig {
        model: "gemini-test".into(),
        base_url: server.base_url(),
        timeout_secs: 5,
        ..GeminiConfig::new("test-key")
    }
}

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ], "role": "model" } }
        ]
    })
}

fn fetcher() -> HttpPageFetcher {
    HttpPageFetcher::new(5, DEFAULT_USER_AGENT).unwrap()
}

#[test]
fn gemini_returns_first_candidate_text() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(MODEL_PATH).header("x-goog-api-key", "test-key");
        then.status(200).json_body(gemini_reply("{\"recommendations\": []}"));
    });

    let backend = GeminiBackend::new(gemini_config(&server)).unwrap();
    let text = backend.generate("hello").unwrap();

    mock.assert();
    assert_eq!(text, "{\"recommendations\": []}");
}

#[test]
fn gemini_error_status_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(MODEL_PATH);
        then.status(500).body("quota exceeded");
    });

    let backend = GeminiBackend::new(gemini_config(&server)).unwrap();
    match backend.generate("hello") {
        Err(BackendError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn gemini_without_candidates_is_an_empty_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(MODEL_PATH);
        then.status(200).json_body(json!({ "candidates": [] }));
    });

    let backend = GeminiBackend::new(gemini_config(&server)).unwrap();
    assert!(matches!(backend.generate("hello"), Err(BackendError::EmptyResponse)));
}

#[test]
fn gemini_requires_an_api_key() {
    let result = GeminiBackend::new(GeminiConfig::new("  "));
    assert!(matches!(result, Err(BackendError::Unavailable(_))));
}

#[test]
fn recommender_uses_gemini_answer_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path(MODEL_PATH);
        then.status(200).json_body(gemini_reply(
            "```json\n{\"recommendations\": [\"Core Java (Advanced Level) (New) | SHL\", \"Java 8 (New) | SHL\"]}\n```",
        ));
    });

    let catalog = Catalog::builtin().unwrap();
    let recommender =
        Recommender::new(fetcher()).with_backend(GeminiBackend::new(gemini_config(&server)).unwrap());

    let response = recommender
        .handle(
            RecommendRequest::new("Java developers, assessment under 40 minutes").with_max_results(5),
            &catalog,
        )
        .unwrap();

    mock.assert();
    let names: Vec<&str> = response.recommendations.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Core Java (Advanced Level) (New) | SHL", "Java 8 (New) | SHL"]);
}

#[test]
fn page_fetcher_flattens_html() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/jobs/42");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(
                "<html><head><title>Careers</title></head><body>\
                 <h1>Java Developer</h1>\
                 <p>Assessment under 40 minutes</p>\
                 </body></html>",
            );
    });

    let text = fetcher().fetch_text(&server.url("/jobs/42"));

    mock.assert();
    assert!(text.contains("Java Developer"), "got {text:?}");
    assert!(text.contains("Assessment under 40 minutes"), "got {text:?}");
    assert!(!text.contains("<h1>"));
}

#[test]
fn page_fetcher_reports_http_errors_in_band() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404);
    });

    let text = fetcher().fetch_text(&server.url("/gone"));
    assert!(text.starts_with(FAILURE_MARKER), "got {text:?}");
}

#[test]
fn page_fetcher_reports_connection_errors_in_band() {
    let text = fetcher().fetch_text("http://127.0.0.1:1/unreachable");
    assert!(text.starts_with(FAILURE_MARKER), "got {text:?}");
}

#[test]
fn url_query_is_ranked_on_the_fetched_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/listing");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html><body><p>Java developers, assessment under 40 minutes</p></body></html>");
    });

    let catalog = Catalog::builtin().unwrap();
    let recommender = Recommender::new(fetcher());
    let result = recommender.recommend(&server.url("/listing"), catalog.items(), 2);

    assert_eq!(result.names(), vec!["Java 8 (New) | SHL", "Core Java (Advanced Level) (New) | SHL"]);
}
