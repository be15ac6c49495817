use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use glossa_app::rate_limit::LookupRateLimiter;
use glossa_app::{AppState, build_router};
use glossa_config::Config;
use glossa_core::resolver::{Resolver, ResolverOptions};
use glossa_provider::WikipediaClient;
use glossa_provider::openai::{OpenAiProvider, OpenAiSettings};
use glossa_store::{CorpusLoader, Gateway, MemoryStore};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(
    name = "glossa",
    about = "Word-lookup resolution service for language learners"
)]
struct Args {
    /// Listen address, overrides GLOSSA_BIND_ADDR
    #[arg(long)]
    bind: Option<String>,

    /// Dictionary corpus file imported at startup, overrides GLOSSA_CORPUS_PATH
    #[arg(long)]
    corpus: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting glossa v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::new();

    if config.provider.api_key.is_empty() {
        warn!("No provider API key configured; generation requests will fail");
    }

    let provider = Arc::new(OpenAiProvider::new(OpenAiSettings {
        api_url: config.provider.api_url.clone(),
        api_key: config.provider.api_key.clone(),
        model: config.provider.model.clone(),
        tts_model: config.provider.tts_model.clone(),
        tts_voice: config.provider.tts_voice.clone(),
        request_timeout: Duration::from_secs(config.provider.request_timeout_secs),
        connect_timeout: Duration::from_secs(config.provider.connect_timeout_secs),
    })?);

    let encyclopedia = Arc::new(WikipediaClient::new(Duration::from_secs(5))?);

    let gateway = Arc::new(MemoryStore::new());

    let corpus_path = args
        .corpus
        .or_else(|| config.corpus_path.clone().map(PathBuf::from));
    if let Some(path) = corpus_path {
        match CorpusLoader::load_from_file(&path) {
            Ok(entries) => {
                let imported = gateway.import_definitions(entries).await?;
                info!("Imported {imported} shared-dictionary entries");
            }
            Err(e) => {
                error!("Failed to load corpus from {}: {e}", path.display());
                warn!("Starting with an empty shared dictionary");
            }
        }
    }

    let resolver = Arc::new(Resolver::new(
        gateway.clone(),
        provider.clone(),
        encyclopedia,
        ResolverOptions {
            word_max_chars: config.limits.word_max_chars,
            encyclopedia_timeout: Duration::from_millis(config.limits.encyclopedia_timeout_ms),
        },
    ));

    let limiter = Arc::new(LookupRateLimiter::new(
        config.limits.rate_limit_requests,
        Duration::from_secs(config.limits.rate_limit_window_secs),
    ));

    let cancel = CancellationToken::new();
    let sweeper = limiter.spawn_sweeper(
        Duration::from_secs(config.limits.sweep_interval_secs),
        cancel.child_token(),
    );

    let state = AppState {
        resolver,
        gateway,
        provider,
        limiter,
        admin_token: config.server.admin_token.clone(),
    };

    let bind_addr = args.bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {bind_addr}");

    // Shutdown future (Ctrl+C)
    let shutdown = {
        let cancel = cancel.clone();
        async move {
            if let Err(e) = signal::ctrl_c().await {
                error!("failed to listen for ctrl+c: {e}");
            }
            info!("Shutdown requested");
            cancel.cancel();
        }
    };

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    if let Err(e) = sweeper.await {
        error!("sweeper task panicked: {e}");
    }

    Ok(())
}
