// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod challenge;
pub mod http_server;
pub mod popularity;

pub use challenge::{challenge_handler, ChallengeResponse};
pub use http_server::{create_router, start_server, AppState};
pub use popularity::{
    count_handler, popularity_handler, CountApiRequest, CountApiResponse, PopularityRequest,
    PopularityResponse,
};
