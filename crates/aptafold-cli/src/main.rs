mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use aptafold::engine::cancel::CancellationToken;
use clap::Parser;
use std::future::Future;
use std::io;
use tracing::{debug, error, info, warn};

/// Exit status for a run aborted by a second interrupt (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 aptafold v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let cancel = CancellationToken::new();
    let interrupt_watcher = tokio::spawn(exit_on_second_interrupt(cancel.clone()));

    let command_result = match cli.command {
        Commands::Fold(args) => {
            info!("Dispatching to 'fold' command.");
            commands::fold::run(args, cli.jobs, cli.quiet, cancel).await
        }
        Commands::Analyze(args) => {
            info!("Dispatching to 'analyze' command.");
            commands::analyze::run(args, cli.quiet).await
        }
    };
    interrupt_watcher.abort();

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}

async fn exit_on_second_interrupt(cancel: CancellationToken) {
    match watch_interrupts(cancel, tokio::signal::ctrl_c).await {
        Ok(()) => {
            eprintln!("\n❌ Interrupted again; exiting without waiting for running folds.");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        Err(e) => warn!("Cannot listen for Ctrl-C: {}", e),
    }
}

/// Cancels `cancel` on the first interrupt and returns on the second.
async fn watch_interrupts<S, F>(cancel: CancellationToken, mut next_interrupt: S) -> io::Result<()>
where
    S: FnMut() -> F,
    F: Future<Output = io::Result<()>>,
{
    next_interrupt().await?;
    warn!(
        "Interrupt received; stopping in-flight folds and keeping finished rows. \
         Press Ctrl-C again to exit now."
    );
    cancel.cancel();

    next_interrupt().await
}
