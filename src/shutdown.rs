// src/shutdown.rs
/// Resolves on Ctrl-C. If the handler cannot be installed the future never
/// resolves, leaving EOF as the only way out.
pub async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received, stopping..."),
        Err(e) => {
            tracing::warn!("ctrl-c handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    }
}
