//! depsync CLI entry point
//!
//! Parses arguments, runs the comparison and turns the outcome into a
//! process exit status: 0 when the lock files agree (or were fixed and
//! reconverged), 1 for reported mismatches and for every error.

use depsync_cli::cli;
use depsync_cli::core::user_friendly_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Help and version go to stdout with status 0; parse errors are usage errors.
    let cli = match <cli::Cli as clap::Parser>::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
