use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_test::TestServer;
use parla_api::{build_router, ServerConfig};
use parla_translate::{RetryConfig, TranslateConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;

fn test_server(config: ServerConfig) -> TestServer {
    TestServer::new(build_router(config).unwrap()).unwrap()
}

/// Echoes `[<tl>] <q>` back, or answers 500 when the text is "fail please".
async fn fake_translate(Query(params): Query<HashMap<String, String>>) -> Response {
    let text = params.get("q").cloned().unwrap_or_default();
    if text == "fail please" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    let target = params.get("tl").cloned().unwrap_or_default();
    Json(json!([[[format!("[{target}] {text}"), text, null, null, 1]], null, "en"])).into_response()
}

async fn start_fake_upstream() -> SocketAddr {
    let app = Router::new().route("/translate_a/single", get(fake_translate));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn translating_server() -> TestServer {
    let addr = start_fake_upstream().await;
    test_server(ServerConfig {
        translate: TranslateConfig {
            endpoint: format!("http://{}/translate_a/single", addr),
            timeout: Duration::from_secs(5),
            retry: RetryConfig::none(),
            ..TranslateConfig::default()
        },
        ..ServerConfig::default()
    })
}

#[tokio::test]
async fn health_and_about() {
    let server = test_server(ServerConfig::default());

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");

    let about = server.get("/about").await.json::<Value>();
    assert_eq!(about["name"], "Parla");
    assert_eq!(about["activities"].as_array().unwrap().len(), 4);

    let activities = server.get("/activities").await.json::<Value>();
    assert_eq!(activities[1]["activity"], "translation");
    assert_eq!(activities[1]["path"], "/translate");
}

#[tokio::test]
async fn analyze_returns_full_report() {
    let server = test_server(ServerConfig::default());

    let response = server
        .post("/analyze")
        .json(&json!({ "text": "The cats were chasing the mice. The cats won!" }))
        .await;
    response.assert_status_ok();

    let report = response.json::<Value>();
    assert_eq!(report["stats"]["stopwords"], 4);
    assert_eq!(report["stopwords"], json!(["the", "were", "the", "the"]));
    assert_eq!(report["processed_text"], "cats chasing mice. cats won!");
    assert_eq!(report["word_cloud"][0]["word"], "cats");
    assert_eq!(report["tokens"][1], json!({ "Token": "chasing", "Lemma": "chase" }));
    assert_eq!(report["summary"], "the cats were");
}

#[tokio::test]
async fn analyze_honours_keyword_count() {
    let server = test_server(ServerConfig {
        summary_keywords: 1,
        ..ServerConfig::default()
    });

    let default_count = server
        .post("/analyze")
        .json(&json!({ "text": "b a b a c" }))
        .await
        .json::<Value>();
    assert_eq!(default_count["summary"], "b");

    let explicit = server
        .post("/analyze")
        .json(&json!({ "text": "b a b a c", "keywords": 5 }))
        .await
        .json::<Value>();
    assert_eq!(explicit["summary"], "b a c");
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let server = test_server(ServerConfig::default());

    for path in ["/analyze", "/sentiment", "/wordcloud"] {
        let response = server.post(path).json(&json!({ "text": "   " })).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert!(body["error"].as_str().unwrap().contains("enter a text"), "{path}");
    }
}

#[tokio::test]
async fn summarize_ranks_by_frequency() {
    let server = test_server(ServerConfig::default());
    let text = "The cat sat on the mat. The cat ran.";

    let summary = server
        .post("/summarize")
        .json(&json!({ "text": text }))
        .await
        .json::<Value>();
    assert_eq!(summary["summary"], "the cat sat");
    assert_eq!(summary["k"], 3);

    let none = server
        .post("/summarize")
        .json(&json!({ "text": text, "k": 0 }))
        .await
        .json::<Value>();
    assert_eq!(none["summary"], "");

    let empty = server
        .post("/summarize")
        .json(&json!({ "text": "" }))
        .await
        .json::<Value>();
    assert_eq!(empty["summary"], "");
}

#[tokio::test]
async fn negative_keyword_count_is_unprocessable() {
    let server = test_server(ServerConfig::default());
    let response = server
        .post("/summarize")
        .json(&json!({ "text": "hello world", "k": -1 }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn word_cloud_is_svg() {
    let server = test_server(ServerConfig::default());

    let response = server
        .post("/wordcloud")
        .json(&json!({ "text": "tea tea tea coffee coffee water", "width": 300, "height": 150 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/svg+xml");

    let svg = response.text();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"300\""));
    assert!(svg.contains(">tea</text>"));

    let invalid = server
        .post("/wordcloud")
        .json(&json!({ "text": "tea coffee", "width": 0 }))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn word_cloud_keeps_default_for_unset_dimension() {
    let server = test_server(ServerConfig::default());

    let tall = server
        .post("/wordcloud")
        .json(&json!({ "text": "tea tea coffee", "height": 300 }))
        .await;
    tall.assert_status_ok();
    let svg = tall.text();
    assert!(svg.contains("width=\"400\""));
    assert!(svg.contains("height=\"300\""));

    let wide = server
        .post("/wordcloud")
        .json(&json!({ "text": "tea tea coffee", "width": 500 }))
        .await;
    wide.assert_status_ok();
    let svg = wide.text();
    assert!(svg.contains("width=\"500\""));
    assert!(svg.contains("height=\"200\""));
}

#[tokio::test]
async fn word_cloud_rejects_oversized_canvas() {
    let server = test_server(ServerConfig::default());

    let response = server
        .post("/wordcloud")
        .json(&json!({ "text": "tea tea coffee", "height": 3_000_000_000u32 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("canvas"));
}

#[tokio::test]
async fn sentiment_labels_text() {
    let server = test_server(ServerConfig::default());

    let positive = server
        .post("/sentiment")
        .json(&json!({ "text": "What a great movie." }))
        .await
        .json::<Value>();
    assert_eq!(positive["label"], "positive");
    assert!(positive["polarity"].as_f64().unwrap() > 0.0);

    let negative = server
        .post("/sentiment")
        .json(&json!({ "text": "This is not good" }))
        .await
        .json::<Value>();
    assert_eq!(negative["label"], "negative");
}

#[tokio::test]
async fn translate_uses_target_code() {
    let server = translating_server().await;

    let response = server
        .post("/translate")
        .json(&json!({ "text": "Good morning", "target": "Japanese" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["translated_text"], "[ja] Good morning");
    assert_eq!(body["target"], "Japanese");

    let by_code = server
        .post("/translate")
        .json(&json!({ "text": "Good morning", "target": "de" }))
        .await
        .json::<Value>();
    assert_eq!(by_code["translated_text"], "[de] Good morning");
}

#[tokio::test]
async fn translate_rejects_bad_input() {
    let server = translating_server().await;

    server
        .post("/translate")
        .json(&json!({ "text": "Good morning", "target": "French" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/translate")
        .json(&json!({ "text": "hi", "target": "German" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn translate_upstream_failure_is_bad_gateway() {
    let server = translating_server().await;

    let response = server
        .post("/translate")
        .json(&json!({ "text": "fail please", "target": "Thai" }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(response.json::<Value>()["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = test_server(ServerConfig {
        max_body_bytes: 64,
        ..ServerConfig::default()
    });

    let response = server
        .post("/analyze")
        .json(&json!({ "text": "word ".repeat(100) }))
        .await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn stop_words_file_drives_analysis() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# project stop list").unwrap();
    writeln!(file, "cats").unwrap();
    writeln!(file, "mice").unwrap();

    let server = test_server(ServerConfig {
        stop_words: parla_text::StopWords::from_file(file.path()).unwrap(),
        ..ServerConfig::default()
    });

    let report = server
        .post("/analyze")
        .json(&json!({ "text": "The cats chased the mice" }))
        .await
        .json::<Value>();
    assert_eq!(report["stopwords"], json!(["cats", "mice"]));
    assert_eq!(report["processed_text"], "The chased the");
}
