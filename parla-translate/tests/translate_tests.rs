//! GoogleTranslator against a local stand-in for the translate endpoint.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parla_translate::{GoogleTranslator, RetryConfig, TargetLanguage, TranslateConfig, TranslateError};
use tokio::net::TcpListener;

#[derive(Clone)]
struct FakeUpstream {
    calls: Arc<AtomicU32>,
    /// Number of leading calls answered with the failure status
    failures: u32,
    failure_status: StatusCode,
}

async fn translate_handler(
    State(upstream): State<FakeUpstream>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let call = upstream.calls.fetch_add(1, Ordering::SeqCst);
    if call < upstream.failures {
        return (upstream.failure_status, "upstream unavailable").into_response();
    }

    let target = params.get("tl").cloned().unwrap_or_default();
    let text = params.get("q").cloned().unwrap_or_default();
    assert_eq!(params.get("sl").map(String::as_str), Some("auto"));
    Json(serde_json::json!([
        [[format!("[{target}] "), "", null, null, 1], [text.clone(), text, null, null, 1]],
        null,
        "en"
    ]))
    .into_response()
}

async fn start_fake_upstream(failures: u32, failure_status: StatusCode) -> (SocketAddr, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let state = FakeUpstream {
        calls: calls.clone(),
        failures,
        failure_status,
    };
    let app = Router::new()
        .route("/translate_a/single", get(translate_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, calls)
}

fn translator_for(addr: SocketAddr, max_retries: u32) -> GoogleTranslator {
    GoogleTranslator::new(TranslateConfig {
        endpoint: format!("http://{}/translate_a/single", addr),
        timeout: Duration::from_secs(5),
        min_text_len: 3,
        retry: RetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
            jitter: false,
        },
    })
    .unwrap()
}

#[tokio::test]
async fn translates_with_target_code() {
    let (addr, calls) = start_fake_upstream(0, StatusCode::OK).await;
    let translator = translator_for(addr, 0);

    let translated = translator
        .translate("Good morning", TargetLanguage::Japanese)
        .await
        .unwrap();

    assert_eq!(translated, "[ja] Good morning");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_server_errors() {
    let (addr, calls) = start_fake_upstream(2, StatusCode::SERVICE_UNAVAILABLE).await;
    let translator = translator_for(addr, 2);

    let translated = translator
        .translate("Good night", TargetLanguage::German)
        .await
        .unwrap();

    assert_eq!(translated, "[de] Good night");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn surfaces_upstream_failure_after_retries() {
    let (addr, calls) = start_fake_upstream(10, StatusCode::BAD_GATEWAY).await;
    let translator = translator_for(addr, 1);

    let err = translator
        .translate("Hello there", TargetLanguage::Thai)
        .await
        .unwrap_err();

    match err {
        TranslateError::Upstream { status, message } => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let (addr, calls) = start_fake_upstream(10, StatusCode::BAD_REQUEST).await;
    let translator = translator_for(addr, 3);

    let err = translator
        .translate("Hello there", TargetLanguage::German)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::Upstream { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unreachable_endpoint_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let translator = translator_for(addr, 0);
    let err = translator
        .translate("Hello there", TargetLanguage::German)
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Http(_)));
}
