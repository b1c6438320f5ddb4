//! number-guess binary entry point.

use std::process::ExitCode;

use number_guess::api::{serve_with_state, AppState};
use number_guess::cli::{self, parse_args};
use number_guess::config::Config;
use number_guess::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'number-guess --help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_with_filter(config.log_filter()) {
        eprintln!("warning: logging already initialized: {}", e);
    }

    info!("number-guess v{}", env!("CARGO_PKG_VERSION"));

    let (server_config, ttl) = match config.to_server_config().and_then(|server| {
        let ttl = config.session_ttl()?;
        Ok((server, ttl))
    }) {
        Ok(pair) => pair,
        Err(e) => {
            error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Sessions are valid for {}s", ttl.as_secs());

    match serve_with_state(server_config, AppState::with_ttl(ttl)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
