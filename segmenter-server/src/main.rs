//! HTTP dashboard for the product segmenter.
//!
//! Serves a single-page UI, accepts CSV uploads with a cluster-count
//! parameter, and streams back analysis JSON and export downloads.
//! Every interaction re-runs the full pipeline; the server holds no
//! per-upload state.

use std::env;

use log::info;

mod routes;

/// Env var overriding the bind address.
const ADDR_ENV: &str = "SEGMENTER_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:7878";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let addr = env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let app = routes::router();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Product segmentation dashboard listening on http://{}", addr);

    axum::serve(listener, app).await
}
