//! Terminal host for the inventory product screens.

mod console;
mod create;
mod render;
mod shell;
mod transport;

use std::io;

use anyhow::{anyhow, Context};
use clap::Parser;
use inventory_core::{ProductClient, Route};
use tracing_subscriber::EnvFilter;

use crate::console::Console;
use crate::shell::Shell;
use crate::transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "inventory-console", about = "Inventory product administration", long_about = None)]
struct Cli {
    /// Origin of the inventory API.
    #[arg(long, env = "INVENTORY_API_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Route to open first (`/` or `/create`).
    #[arg(long, default_value = "/")]
    start: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Route::from_path(&cli.start).ok_or_else(|| anyhow!("unknown route `{}`", cli.start))?;

    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut shell = Shell::new(ProductClient::new(&cli.base_url), UreqTransport::new(), console);
    shell.run(start).context("terminal I/O failed")
}
