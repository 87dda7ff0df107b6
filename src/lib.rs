//! dbdeck - A terminal dashboard for hosted database instances and their
//! saved queries.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod editor;
pub mod event;
pub mod naming;
pub mod runtime;
pub mod ui;

use clap::Parser;
use cli::Cli;
use color_eyre::eyre::Result;

/// Main entry point - parses CLI args and runs the application.
pub fn run_cli() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(runtime::run(cli))
}
