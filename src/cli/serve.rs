// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Args;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::api::{start_server, AppState};
use crate::challenge::{ChallengeBook, DEFAULT_FIRST_DAY};
use crate::count::{CountConfig, PopularityCounter};

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "DSS_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "DSS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Challenge word list, one word per line
    #[arg(long, env = "DSS_WORDS_FILE", default_value = "words.txt")]
    pub words_file: PathBuf,

    /// Day of the first challenge (YYYY-MM-DD)
    #[arg(long, env = "DSS_CHALLENGE_FIRST_DAY", default_value = DEFAULT_FIRST_DAY)]
    pub first_day: NaiveDate,
}

/// Build the application state and run the HTTP API until shutdown
pub async fn serve(args: ServeArgs) -> Result<()> {
    let config = CountConfig::from_env();
    config.validate().map_err(|e| anyhow!(e))?;
    info!(
        "Counting against {} (cache {} entries / {}s, {} concurrent fetches)",
        config.search_url,
        config.cache_size,
        config.cache_expiration_secs,
        config.max_concurrent_fetches
    );

    let counter = PopularityCounter::new(&config)?;

    // The API stays up without challenges; /v1/challenge then reports none left
    let challenges = match ChallengeBook::from_file(&args.words_file, args.first_day) {
        Ok(book) => book,
        Err(e) => {
            warn!("{}; serving without challenge words", e);
            ChallengeBook::new(Vec::new(), args.first_day)
        }
    };

    let addr = SocketAddr::new(args.host, args.port);
    start_server(AppState::new(counter, challenges), addr).await
}
