//! Transcelerator · question and key-term service
//!
//! - Axum HTTP API over the question catalog and key-term rules
//! - Project data from TOML, or built-in seeds when none is configured
//!
//! Important env variables:
//!   PORT                        : u16 (default 3000)
//!   TRANSCELERATOR_CONFIG_PATH  : path to project TOML (sections, rules, key terms, ...)
//!   LOG_LEVEL                   : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT                  : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use transcelerator_core::routes::build_router;
use transcelerator_core::state::AppState;
use transcelerator_core::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "transcelerator", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
    })
    .await?;
  Ok(())
}
