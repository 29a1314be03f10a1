// CLI module
// Command-line arguments, logging setup and the interactive shell

mod args;
pub mod shell;

pub use args::{CliArgs, OutputFormat};
pub use shell::Shell;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or --help), clap displays an error
/// message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so they never interleave with the menu on stdout.
/// `RUST_LOG` takes precedence over `default_level`; an unparsable level
/// falls back to `warn`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
