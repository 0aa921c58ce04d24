mod cli;
mod setup;

use clap::Parser;
use focus_engine::console::Console;
use snafu::{prelude::*, Whatever};
use tokio::io::BufReader;

use crate::cli::Arguments;

#[snafu::report]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Whatever> {
    let arg = Arguments::parse();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(arg.verbosity)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .whatever_context("Could not setup logger")?;

    let engine = setup::bootstrap(&arg).await?;

    Console::new(engine, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .run()
        .await
        .whatever_context("Console failed to run")?;

    Ok(())
}
