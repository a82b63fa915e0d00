// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod count;
pub mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Search popularity counter
#[derive(Parser, Debug)]
#[command(name = "dss-counter")]
#[command(version)]
#[command(about = "Estimate search term popularity from search engine result counts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(serve::ServeArgs),

    /// Count results for terms once and print them as JSON
    Count(count::CountArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => serve::serve(args).await,
        Commands::Count(args) => count::count(args).await,
    }
}
