//! UNDO API server
//!
//! Serves the JSON API the web client uses to post, like and mint on a
//! Symbol network. See `undo::server` for the endpoint list.
//!
//! ## Usage
//! ```bash
//! UNDO_CHANNEL_ADDRESS=T... cargo run --bin undo-server
//! ```

use undo::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load()?;
    log::info!("UNDO API Server");
    config.log_summary();

    let addr = format!("0.0.0.0:{}", config.port);
    let app = server::router(server::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
