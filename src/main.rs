//! DIO Bank CLI
//!
//! Interactive menu over an in-memory bank.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --withdrawal-cap 1000 --max-withdrawals 5
//! cargo run -- --branch 0042 --format csv
//! RUST_LOG=debug cargo run
//! ```
//!
//! Menu prompts and results go to stdout, logs go to stderr. All state is
//! lost when the program exits.
//!
//! # Exit Codes
//!
//! - 0: Session ended with `q` or end of input
//! - 1: Error (invalid arguments, console I/O failure)

use diobank::cli::{self, Shell};
use diobank::core::Bank;
use std::io;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    cli::init_logging(&args.log_level);

    let bank = Bank::new(args.to_bank_config());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(bank, stdin.lock(), stdout.lock(), args.format);
    if let Err(e) = shell.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
