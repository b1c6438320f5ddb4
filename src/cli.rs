//! Command-line interface for number-guess.

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::session::MAX_TTL;

/// Command-line arguments.
///
/// Options left unset fall through to the environment, the config file and
/// then the defaults.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind to.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Session TTL in seconds.
    pub ttl_secs: Option<u64>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                let value: String = parser.value()?.parse()?;
                result.host = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("host", value))?,
                );
            }
            Short('p') | Long("port") => {
                let value: String = parser.value()?.parse()?;
                result.port = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("port", value))?,
                );
            }
            Short('t') | Long("ttl") => {
                let value: String = parser.value()?.parse()?;
                match value.parse::<u64>() {
                    Ok(secs) if (1..=MAX_TTL.as_secs()).contains(&secs) => {
                        result.ttl_secs = Some(secs)
                    }
                    _ => return Err(ArgsError::InvalidValue("ttl", value)),
                }
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"number-guess {version}
Guess-the-number HTTP service with expiring, single-use session tokens

USAGE:
    number-guess [OPTIONS]

OPTIONS:
    -H, --host <ADDR>       Host address to bind [default: 127.0.0.1]
    -p, --port <PORT>       Port to listen on [default: 3000]
    -t, --ttl <SECS>        Session validity in seconds, 1-86400 [default: 60]
    -c, --config <FILE>     Path to configuration file (JSON)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    NUMBER_GUESS_HOST        Host address (overrides config)
    NUMBER_GUESS_PORT        Port number (overrides config)
    NUMBER_GUESS_TTL_SECS    Session TTL (overrides config)
    NUMBER_GUESS_LOG_LEVEL   Log level (overrides config)
    RUST_LOG                 Alternative log level setting

EXAMPLES:
    # Start with defaults (localhost:3000, 60s tokens)
    number-guess

    # Listen on all interfaces with short-lived tokens
    number-guess -H 0.0.0.0 -p 8080 -t 20

    # Start with config file
    number-guess -c /etc/number-guess/config.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("number-guess {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// Lexopt parsing error.
    #[error(transparent)]
    Lexopt(#[from] lexopt::Error),
    /// Invalid argument value.
    #[error("invalid value for --{0}: '{1}'")]
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    #[error("unexpected argument: '{0}'")]
    UnexpectedArgument(String),
}
