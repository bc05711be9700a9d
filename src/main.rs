//! # Ledgerline Main Entry Point
//!
//! Console front end for the ledger HTTP API.

use anyhow::Result;
use ledgerline::cmd_args::CommandLineArgs;
use ledgerline::config::LOG_FILTER_ENV_VAR;
use ledgerline::ConsoleController;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

fn init_tracing_subscriber(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level))
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("rustls=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    let mut app = ConsoleController::new(&cmd_args)?;

    println!("Ledgerline console");
    println!("Type 'help' for commands, 'quit' to leave");

    app.run().await?;

    println!("bye");
    Ok(())
}
