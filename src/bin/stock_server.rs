use std::process::ExitCode;

use stock_viewer::{http, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    info!("Loading configuration...");
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Environment misconfigured: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = http::serve(config).await {
        error!("Server failed: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
