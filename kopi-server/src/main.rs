//! kopi-debate - HTTP debate service
//!
//! The bot picks or remembers a stance, defends it on every turn, and nudges
//! the user back when the conversation drifts. Storage and the generative
//! backend are selected once at startup from the environment; without
//! credentials the service runs fully offline (in-memory store, mock
//! replies).

mod api;
mod bootstrap;
mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::{load_env_file, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    load_env_file();
    let settings = Settings::from_env();

    let addr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid BIND_ADDR {:?}", settings.bind_addr))?;

    let state = Arc::new(bootstrap::build_state(&settings).await);
    server::run(addr, state).await
}
