use std::{env, net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};
use wellness_app::{AppState, FileStore, Trackers, resolve_data_dir, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir();
    info!("storing snapshots in {}", data_dir.display());

    let trackers = Trackers::load(Arc::new(FileStore::new(data_dir)));
    let state = AppState::new(trackers);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
