use std::sync::Arc;

use shared::services::game_summary_service::TracingSummarySink;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use websocket_api::{
    config::{Config, LogFormat},
    create_app,
    state::AppState,
    sweeper::spawn_sweeper,
};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Pretty);
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    init_tracing(config.log_format);

    let bind_addr = config.bind_addr;
    let state = AppState::new(config, Arc::new(TracingSummarySink));
    spawn_sweeper(state.clone());

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Othello server listening on {}", bind_addr);

    axum::serve(listener, create_app(state)).await?;
    Ok(())
}
