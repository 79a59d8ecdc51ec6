use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use folio_config::FolioConfig;
use folio_server::build_router;
use tokio::net::TcpListener;

use crate::cli::ServeArgs;
use crate::commands::store;

/// Handle `folio serve`.
pub async fn handle(args: &ServeArgs, config: &FolioConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    let addr: SocketAddr = match &args.bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid --bind address '{bind}'"))?,
        None => config.bind_addr()?,
    };

    let store = Arc::new(store::open(config)?);
    let app = build_router(store);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        owner = %config.github.owner,
        document = %config.store.path.display(),
        "serving folio API"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
