//! # Storefront Terminal Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Load configuration (optional path as the first argument)
//! 3. Build the catalog and order submitter
//! 4. Run the shell on stdin / stdout

use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{stdin, stdout, BufReader};
use tracing::{error, info};

use storefront::state::StoreConfig;
use storefront::{init_tracing, shell, App};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = match StoreConfig::load(config_path) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        store = %config.store_name,
        delivery_fee_cents = config.delivery_fee_cents,
        "Starting storefront"
    );

    let app = match App::from_config(config) {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "Failed to load catalog");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = shell::run(&app, BufReader::new(stdin()), stdout()).await {
        error!(error = %err, "Terminal I/O failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
