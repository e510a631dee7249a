use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use cek_dice::config::Config;
use cek_dice::kernel::dispatch::Dispatcher;
use cek_dice::kernel::template::ResponseTemplates;
use cek_dice::server::{build_router, AppState};
use cek_dice::services::verifier::ExtensionIdVerifier;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,cek_dice=debug".into()),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = Config::from_env().context("invalid configuration")?;

    // Loaded once; read-only for the life of the process.
    let templates = ResponseTemplates::from_path(&config.templates_path).with_context(|| {
        format!(
            "failed to load response templates from {}",
            config.templates_path.display()
        )
    })?;
    tracing::info!(
        intents = templates.intent_count(),
        wildcard = templates.has_wildcard(),
        "Response templates loaded"
    );

    let dispatcher = Dispatcher::new(config.dialogue.clone(), Arc::new(templates));
    let verifier = ExtensionIdVerifier::new(config.extension_id.clone());
    if config.extension_id.is_none() {
        tracing::warn!("EXTENSION_ID not set, applicationId check disabled");
    }

    let app = build_router(AppState::new(dispatcher, verifier), &config.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!("Server is running on {} port", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        // never resolve, keep serving
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
