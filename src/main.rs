use tracing_subscriber::{EnvFilter, fmt};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let http_port = std::env::var("LIBRARIUM_HTTP_PORT").unwrap_or_else(|_| "4000".to_string());
    let db_name = std::env::var("LIBRARIUM_DB_NAME").unwrap_or_else(|_| "library".to_string());
    let mongo = if std::env::var("MONGODB_URI").map(|v| !v.is_empty()).unwrap_or(false) { "set" } else { "<unset, in-memory store>" };
    info!(
        target: "librarium",
        "Librarium starting: RUST_LOG='{}', http_port={}, db_name='{}', MONGODB_URI={}",
        rust_log, http_port, db_name, mongo
    );

    librarium::server::run().await
}
