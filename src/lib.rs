// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod challenge;
pub mod cli;
pub mod count;

pub use challenge::{ChallengeBook, ChallengeError};
pub use count::{
    BatchReport, CountConfig, CountError, CountExtractor, KeyOutcome, PageFetcher,
    PopularityCounter, ResultStatsExtractor,
};
