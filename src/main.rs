use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use candle_core::Device;
use tracing_subscriber::EnvFilter;

use custom_layers::api::create_router;
use custom_layers::app_state::AppState;
use custom_layers::config::AppConfig;
use custom_layers::models::{MlpNetwork, Model};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            AppConfig::from_file(&path)?
        }
        None => AppConfig::default(),
    };
    tracing::debug!(?cfg, "app config");

    let device = Device::Cpu;
    let model = match &cfg.weights_path {
        Some(path) => MlpNetwork::load(&cfg.network, path, &device)?,
        None => MlpNetwork::new(&cfg.network, &device)?,
    };
    let model_name = format!("mlp-{}", model.num_layers());

    let state = Arc::new(AppState {
        model: Box::new(model),
        device,
        model_name,
    });

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    tracing::info!(addr = %cfg.bind_addr(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
