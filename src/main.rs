use anyhow::Result;
use clap::Parser;
use prepmaster::feedback::{FeedbackClient, OpenAiBackend};
use prepmaster::progress::ProgressAggregator;
use prepmaster::session::SessionLifecycle;
use prepmaster::store::{MemoryStore, SessionStore, StaticIdentity};
use prepmaster::{create_router, AppState, Config};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "prepmaster", about = "Interview practice session service")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/prepmaster")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("PrepMaster v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    if cfg.completion.api_key.is_none() {
        info!("No completion API key configured; AI calls run in offline/demo mode");
    }
    info!(
        "Audio capture: {} Hz, {} channel(s), {}s recording cap",
        cfg.audio.sample_rate, cfg.audio.channels, cfg.audio.max_recording_secs
    );

    let backend = OpenAiBackend::new(cfg.completion.clone())?;
    let feedback = FeedbackClient::new(Arc::new(backend));

    let store = MemoryStore::new();
    let sessions: Arc<dyn SessionStore> = Arc::new(store.clone());
    let identity = Arc::new(StaticIdentity::new(
        cfg.identity.user_id.clone(),
        cfg.identity.email.clone(),
    ));

    let lifecycle = SessionLifecycle::new(Some(sessions.clone()), feedback, identity.clone());
    let progress = ProgressAggregator::new(Arc::new(store.clone()));

    let state = AppState::new(lifecycle, progress, sessions, identity);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
