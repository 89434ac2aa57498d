use clap::Parser;
use parla_api::{log_config, start_server, ServerConfig};
use parla_text::StopWords;
use parla_translate::{RetryConfig, TranslateConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "parla-server", about = "Parla text analysis server")]
struct Cli {
    /// HTTP listening address
    #[arg(long, env = "PARLA_ADDR", default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Translate endpoint
    #[arg(long, env = "PARLA_TRANSLATE_URL", default_value = parla_translate::DEFAULT_ENDPOINT)]
    translate_url: String,

    /// Per-request timeout for the translate endpoint, in seconds
    #[arg(long, env = "PARLA_TRANSLATE_TIMEOUT_SECS", default_value_t = 10)]
    translate_timeout_secs: u64,

    #[arg(long, env = "PARLA_TRANSLATE_MAX_RETRIES", default_value_t = 2)]
    translate_max_retries: u32,

    /// Largest accepted request body
    #[arg(long, env = "PARLA_MAX_BODY_BYTES", default_value_t = parla_api::DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Keywords in a summary when the request does not ask for a count
    #[arg(long, env = "PARLA_SUMMARY_KEYWORDS", default_value_t = parla_text::DEFAULT_KEYWORD_COUNT)]
    summary_keywords: usize,

    /// Stop word list, one word per line; the built-in English list when unset
    #[arg(long, env = "PARLA_STOP_WORDS_FILE")]
    stop_words_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_observability();

    let cli = Cli::parse();
    info!("Starting Parla server");

    let stop_words = match &cli.stop_words_file {
        Some(path) => StopWords::from_file(path)?,
        None => StopWords::english(),
    };

    let config = ServerConfig {
        translate: TranslateConfig {
            endpoint: cli.translate_url,
            timeout: Duration::from_secs(cli.translate_timeout_secs),
            retry: RetryConfig::with_max_retries(cli.translate_max_retries),
            ..TranslateConfig::default()
        },
        stop_words,
        summary_keywords: cli.summary_keywords,
        max_body_bytes: cli.max_body_bytes,
    };
    log_config(&config);

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    info!("Listening on http://{}", cli.addr);
    start_server(listener, config, shutdown).await?.await??;

    info!("Server stopped");
    Ok(())
}

fn init_observability() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_line_number(true)
        .json();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,parla_api=debug,parla_translate=debug".into());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}
