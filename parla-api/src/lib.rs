use std::future::Future;
use std::sync::{Arc, OnceLock};

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use parla_text::{
    extract_keywords, SentimentAnalyzer, StopWords, TextAnalysis, TextAnalyzer, TextError,
    DEFAULT_KEYWORD_COUNT,
};
use parla_translate::{GoogleTranslator, TargetLanguage, TranslateConfig, TranslateError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// The four things a user can do with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    TextAnalysis,
    Translation,
    SentimentAnalysis,
    About,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::TextAnalysis,
        Activity::Translation,
        Activity::SentimentAnalysis,
        Activity::About,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Activity::TextAnalysis => "Text Analysis",
            Activity::Translation => "Translation",
            Activity::SentimentAnalysis => "Sentiment Analysis",
            Activity::About => "About",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Activity::TextAnalysis => "text_analysis",
            Activity::Translation => "translation",
            Activity::SentimentAnalysis => "sentiment_analysis",
            Activity::About => "about",
        }
    }

    /// Entry-point route of the activity.
    pub fn path(&self) -> &'static str {
        match self {
            Activity::TextAnalysis => "/analyze",
            Activity::Translation => "/translate",
            Activity::SentimentAnalysis => "/sentiment",
            Activity::About => "/about",
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Activity::About => "GET",
            _ => "POST",
        }
    }

    fn record(self) {
        counter!("parla_requests_total", "activity" => self.label()).increment(1);
    }
}

/// Everything the service needs at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub translate: TranslateConfig,
    pub stop_words: StopWords,
    /// Keyword count used by the summary when a request does not set one
    pub summary_keywords: usize,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            translate: TranslateConfig::default(),
            stop_words: StopWords::english(),
            summary_keywords: DEFAULT_KEYWORD_COUNT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Clone)]
struct AppState {
    analyzer: Arc<TextAnalyzer>,
    sentiment: Arc<SentimentAnalyzer>,
    translator: GoogleTranslator,
    metrics: PrometheusHandle,
    summary_keywords: usize,
}

fn init_metrics_recorder() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install metrics recorder")
        })
        .clone()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),

    #[error("text analysis failed: {0}")]
    Text(#[from] TextError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_)
            | ApiError::Translate(TranslateError::TextTooShort { .. })
            | ApiError::Translate(TranslateError::UnsupportedLanguage(_))
            | ApiError::Text(TextError::InvalidWordCloud(_))
            | ApiError::Text(TextError::UnsupportedLanguage(_)) => StatusCode::BAD_REQUEST,
            ApiError::Translate(_) => StatusCode::BAD_GATEWAY,
            ApiError::Text(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

fn require_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        Err(ApiError::BadRequest("enter a text".into()))
    } else {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub keywords: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub k: usize,
}

#[derive(Debug, Deserialize)]
pub struct WordCloudRequest {
    pub text: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub max_words: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    /// Language name or code, e.g. "German" or "de"
    pub target: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub target: TargetLanguage,
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub polarity: f64,
    pub subjectivity: f64,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub activity: Activity,
    pub title: String,
    pub method: String,
    pub path: String,
}

impl From<Activity> for ActivityInfo {
    fn from(activity: Activity) -> Self {
        Self {
            activity,
            title: activity.title().to_string(),
            method: activity.method().to_string(),
            path: activity.path().to_string(),
        }
    }
}

pub fn build_router(config: ServerConfig) -> Result<Router, ApiError> {
    let translator = GoogleTranslator::new(config.translate)?;
    let state = AppState {
        analyzer: Arc::new(TextAnalyzer::new(config.stop_words)),
        sentiment: Arc::new(SentimentAnalyzer::new()),
        translator,
        metrics: init_metrics_recorder(),
        summary_keywords: config.summary_keywords,
    };

    Ok(Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .route("/activities", get(list_activities))
        .route("/analyze", post(analyze_text))
        .route("/summarize", post(summarize_text))
        .route("/wordcloud", post(render_word_cloud))
        .route("/translate", post(translate_text))
        .route("/sentiment", post(analyze_sentiment))
        .route("/about", get(about))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub async fn start_server(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), std::io::Error>>, ApiError> {
    let app = build_router(config)?;
    Ok(tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    (StatusCode::OK, state.metrics.render()).into_response()
}

async fn list_activities() -> Json<Vec<ActivityInfo>> {
    Json(Activity::ALL.into_iter().map(ActivityInfo::from).collect())
}

async fn analyze_text(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<TextAnalysis>, ApiError> {
    Activity::TextAnalysis.record();
    require_text(&payload.text)?;
    let keywords = payload.keywords.unwrap_or(state.summary_keywords);
    debug!(chars = payload.text.chars().count(), keywords, "analyzing text");
    Ok(Json(state.analyzer.analyze(&payload.text, keywords)))
}

async fn summarize_text(
    State(state): State<AppState>,
    Json(payload): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    Activity::TextAnalysis.record();
    let k = payload.k.unwrap_or(state.summary_keywords);
    Json(SummarizeResponse {
        summary: extract_keywords(&payload.text, k),
        k,
    })
}

async fn render_word_cloud(
    State(state): State<AppState>,
    Json(payload): Json<WordCloudRequest>,
) -> Result<Response, ApiError> {
    Activity::TextAnalysis.record();
    require_text(&payload.text)?;

    let mut cloud = state.analyzer.word_cloud().clone();
    let width = payload.width.unwrap_or(cloud.width());
    let height = payload.height.unwrap_or(cloud.height());
    cloud = cloud.with_size(width, height);
    if let Some(max_words) = payload.max_words {
        cloud = cloud.with_max_words(max_words);
    }

    let svg = cloud.render_svg(&payload.text)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn translate_text(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    Activity::Translation.record();
    let target: TargetLanguage = payload.target.parse()?;

    match state.translator.translate(&payload.text, target).await {
        Ok(translated_text) => Ok(Json(TranslateResponse {
            translated_text,
            target,
        })),
        Err(err) => {
            counter!("parla_translation_failures_total").increment(1);
            warn!(target_lang = target.code(), error = %err, "translation failed");
            Err(err.into())
        }
    }
}

async fn analyze_sentiment(
    State(state): State<AppState>,
    Json(payload): Json<SentimentRequest>,
) -> Result<Json<SentimentResponse>, ApiError> {
    Activity::SentimentAnalysis.record();
    require_text(&payload.text)?;
    let sentiment = state.sentiment.score(&payload.text);
    Ok(Json(SentimentResponse {
        polarity: sentiment.polarity,
        subjectivity: sentiment.subjectivity,
        label: sentiment.label().to_string(),
    }))
}

async fn about() -> Json<serde_json::Value> {
    Activity::About.record();
    let activities: Vec<ActivityInfo> = Activity::ALL.into_iter().map(ActivityInfo::from).collect();
    Json(serde_json::json!({
        "name": "Parla",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Text statistics, word clouds, lemmas, keyword summaries, translation and sentiment for English text.",
        "activities": activities,
    }))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Log the effective configuration once at startup.
pub fn log_config(config: &ServerConfig) {
    info!(
        endpoint = %config.translate.endpoint,
        timeout_secs = config.translate.timeout.as_secs(),
        max_retries = config.translate.retry.max_retries,
        stop_words = config.stop_words.len(),
        summary_keywords = config.summary_keywords,
        max_body_bytes = config.max_body_bytes,
        "server configuration"
    );
}
