// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Args;
use serde_json::json;

use crate::count::{CountConfig, PopularityCounter};

/// Arguments for the count command
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Terms to count
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// Text put in front of every term
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Only count results after this date (YYYY-MM-DD)
    #[arg(long)]
    pub after: Option<NaiveDate>,
}

/// Count every term once and print counts and failures
pub async fn count(args: CountArgs) -> Result<()> {
    let config = CountConfig::from_env();
    config.validate().map_err(|e| anyhow!(e))?;

    let counter = PopularityCounter::new(&config)?;
    let report = counter
        .count_batch_detailed(&args.prefix, &args.terms, args.after)
        .await;

    let failed: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| {
            o.result
                .as_ref()
                .err()
                .map(|e| json!({ "key": o.key, "error": e.to_string() }))
        })
        .collect();

    let output = json!({
        "options": report.counts(),
        "failed": failed,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
