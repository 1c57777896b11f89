use anyhow::Result;
use std::sync::Arc;

use lotto_ticketing::{
    DrawState, NumberGenerator, TicketStore, TicketingUseCase, config, logger, router,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logger::init_logger();

    tracing::info!("Let's roll some lottery numbers.");

    let store = TicketStore::open(&config.database_url)?;
    let use_case = TicketingUseCase::new(
        store,
        Arc::new(DrawState::new()),
        Arc::new(NumberGenerator::new(config.number_range)),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        range = ?config.number_range,
        "ticketing server listening"
    );

    axum::serve(listener, router(use_case))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("shutting down");
}
