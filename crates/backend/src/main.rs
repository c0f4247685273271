use anyhow::Context;
use backend::shared::data::order_dataset::OrderDataset;
use backend::system::state::AppState;
use backend::{routes, shared, system};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    let dataset_path = shared::config::get_dataset_path(&config);
    let dataset = OrderDataset::load(&dataset_path)
        .with_context(|| format!("failed to load dataset {}", dataset_path.display()))?;

    let static_dir = shared::config::get_static_dir(&config);
    let state = AppState::new(dataset, config.presentation.clone());
    let app = routes::configure_routes(state, &static_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid server address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
