use std::process::ExitCode;

use tracing::{error, info};
use webhook_relay::{server, telemetry, Config};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    info!("Starting webhook-relay v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    config.log_summary();

    if let Err(e) = server::run(config).await {
        error!(error = %e, "Relay failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
