//! Command-line interface for lcu-bridge.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Command-line arguments.
///
/// Options left unset fall through to the environment, the config file and
/// finally the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind the snapshot server to.
    pub host: Option<IpAddr>,
    /// Port of the snapshot server.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Event feed to read (`-` for stdin).
    pub feed: Option<PathBuf>,
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
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('f') | Long("feed") => {
                result.feed = Some(parser.value()?.parse()?);
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
        r#"lcu-bridge {version}
Serves champion-select state from the game client as a pollable JSON snapshot

USAGE:
    lcu-bridge [OPTIONS]

OPTIONS:
    -H, --host <ADDR>       Host address to bind [default: 127.0.0.1]
    -p, --port <PORT>       Port to listen on [default: 8000]
    -c, --config <FILE>     Path to configuration file (JSON)
    -f, --feed <FILE>       Client event feed, one JSON event per line [default: - (stdin)]
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    LCU_BRIDGE_HOST         Host address (overrides config)
    LCU_BRIDGE_PORT         Port number (overrides config)
    LCU_BRIDGE_GUIDE_TEXT   Initial guide text (overrides config)
    LCU_BRIDGE_LOG_LEVEL    Log level (overrides config)
    RUST_LOG                Alternative log level setting

FEED FORMAT:
    {{"type":"ready"}}
    {{"type":"close"}}
    {{"type":"event","uri":"/lol-champ-select/v1/session","eventType":"Update","data":{{...}}}}
    [8,"OnJsonApiEvent",{{"uri":"...","eventType":"Update","data":{{...}}}}]

EXAMPLES:
    # Read events from stdin, serve http://127.0.0.1:8000/state
    lcu-bridge

    # Replay a recorded session on another port
    lcu-bridge -f champ-select.jsonl -p 9000
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("lcu-bridge {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Error, Debug)]
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
