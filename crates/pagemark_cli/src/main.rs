mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use pagemark_engine::{ReqwestFetcher, Scraper};

use crate::cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&cli.global);

    let fetcher = ReqwestFetcher::new(cli.global.fetch_settings())?;
    let scraper = Scraper::new(fetcher);

    match &cli.command {
        Command::Single { url, output } => commands::run_single(&scraper, url, output).await,
        Command::Bulk { file, output } => commands::run_bulk(&scraper, file, output).await,
        Command::Find { url, output } => commands::run_find(&scraper, url, output).await,
    }
}
