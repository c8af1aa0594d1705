//! Salon client, headless.
//!
//! # Usage
//!
//! ```bash
//! # Today's appointments
//! cargo run --bin salon
//!
//! # A customer's history
//! SALON_BASE_URL=http://localhost:3000 cargo run --bin salon -- /customer/123
//! ```

use chrono::Local;
use salon::{App, Config};
use salon_client::{HttpTransport, QueryEnvironment, SharedEnvironment};
use salon_core::environment::SystemClock;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("salon={0},salon_client={0},salon_runtime=warn", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    tracing::debug!(?config, %path, "Starting");

    let transport = Arc::new(HttpTransport::new(&config.client)?);
    let query_transport = Arc::clone(&transport);
    let environment = Arc::new(SharedEnvironment::new(move || {
        QueryEnvironment::with_transport(query_transport.clone())
    }));

    let app = App::new(environment, transport, Arc::new(SystemClock), config.screen_wait());

    let screen = app.open(&path, &Local).await?;
    println!("{screen}");

    Ok(())
}
