use anyhow::Context;
use neon_server::{router, ServerConfig};
use tracing_subscriber::EnvFilter;

fn initialise_tracing() {
    // `log` records from this crate reach the subscriber through its log bridge
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    initialise_tracing();

    let config = ServerConfig::from_env()?;
    if !config.public_dir.join("index.html").is_file() {
        log::warn!(
            "no index.html under {}; GET / will return 404",
            config.public_dir.display()
        );
    }

    let app = router(&config.public_dir);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("binding port {}", config.port))?;
    log::info!("Server is running on port {}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("shutting down");
        })
        .await?;
    Ok(())
}
