// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

mod backend;
mod cmd_cancel;
mod cmd_list;
mod cmd_watch;
mod command;
mod config;
mod table;

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::command::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List { search } => cmd_list::run(&config, search.as_deref()).await,
        Commands::Cancel { ids, all, yes } => cmd_cancel::run(&config, &ids, all, yes).await,
        Commands::Watch => cmd_watch::run(&config).await,
    }
}
