//! Main entry point for pw.

use clap::Parser;
use pw::cli::Cli;
use pw::error::{EXIT_FAILURE, EXIT_INTERRUPTED};
use pw::utils::error_exit;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("PW_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("pw=debug")
        } else {
            EnvFilter::new("pw=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // The lookup is synchronous; race it against Ctrl-C.
    let lookup = tokio::task::spawn_blocking(move || cli.execute());

    let code = tokio::select! {
        joined = lookup => match joined {
            Ok(Ok(outcome)) => outcome.exit_code(),
            Ok(Err(e)) => error_exit(&e.to_string(), e.exit_code()),
            Err(e) => error_exit(&format!("lookup aborted: {e}"), EXIT_FAILURE),
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            println!();
            EXIT_INTERRUPTED
        }
    };

    std::process::exit(code);
}
