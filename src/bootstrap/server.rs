use std::net::SocketAddr;

use anyhow::Context;

use crate::app::state::AppState;

pub async fn init_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = crate::routes::routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for ctrl-c: {:?}", err);
        std::future::pending::<()>().await;
    }

    tracing::info!("shutdown requested");
}
