mod cli;
mod application;
mod domain;
mod infra;

use anyhow::Result;
use cli::Cli;
use tracing_subscriber::EnvFilter;

use domain::error::{UsageError, USAGE_EXIT_CODE};

fn main() -> Result<()> {
    // RUST_LOG wins when set; logs go to stderr so stdout carries only user-facing messages
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deepmedic=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    match cli.run() {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<UsageError>() {
            Some(usage) => {
                println!("{usage}");
                std::process::exit(USAGE_EXIT_CODE);
            }
            // anything else comes from the workflows; anyhow reports it and exits with 1
            None => Err(err),
        },
    }
}
