//! CLI entrypoint for chat-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then serves HTTP until Ctrl-C.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use relay_application::{
    ConversationLogger, ManageSessionUseCase, NoConversationLogger, StreamChatUseCase,
};
use relay_infrastructure::{
    ConfigLoader, FileConfig, GroqConfig, GroqGateway, InMemorySessionStore,
    JsonlConversationLogger,
};
use relay_presentation::{AppState, Cli, router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const RELAY_CRATES: [&str; 5] = [
    "chat_relay",
    "relay_domain",
    "relay_application",
    "relay_infrastructure",
    "relay_presentation",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate().context("Invalid configuration")?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", toml::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    // === Dependency Injection ===
    let shutdown = CancellationToken::new();
    let state = build_state(&config, shutdown.clone())?;
    let app = router(state, config.server.static_dir.clone());

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("chat-relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise `-v` raises the relay crates' level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directives = RELAY_CRATES
        .iter()
        .map(|name| format!("{}={}", name, level))
        .collect::<Vec<_>>()
        .join(",");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}", directives)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_state(config: &FileConfig, shutdown: CancellationToken) -> Result<AppState> {
    let api_key = config.provider.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "No provider API key found (set {} or provider.api_key); chat requests will fail until one is configured",
            config.provider.api_key_env
        );
    }

    let gateway = Arc::new(GroqGateway::new(GroqConfig {
        base_url: config.provider.base_url.clone(),
        api_key,
        timeout: config.provider.timeout_seconds.map(Duration::from_secs),
    })?);
    let store = Arc::new(InMemorySessionStore::new());

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log.as_ref() {
            Some(path) => match JsonlConversationLogger::new(path) {
                Some(logger) => {
                    info!("Conversation log: {}", logger.path().display());
                    Arc::new(logger)
                }
                None => Arc::new(NoConversationLogger),
            },
            None => Arc::new(NoConversationLogger),
        };

    let defaults = config.chat.to_chat_defaults();
    info!(
        model = %defaults.model,
        temperature = defaults.temperature,
        provider = %config.provider.base_url,
        "Chat defaults"
    );

    let chat = StreamChatUseCase::new(gateway, store.clone())
        .with_defaults(defaults)
        .with_conversation_logger(conversation_logger.clone())
        .with_shutdown(shutdown);
    let sessions = ManageSessionUseCase::new(store).with_conversation_logger(conversation_logger);

    Ok(AppState { chat, sessions })
}

/// Resolves on Ctrl-C and cancels in-flight chat streams.
async fn shutdown_signal(token: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested; closing in-flight streams");
    token.cancel();
}
