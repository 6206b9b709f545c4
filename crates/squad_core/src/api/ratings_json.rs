//! JSON API for team rating aggregation

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{parse_request, ApiResponse};
use crate::catalog::PlayerDirectory;
use crate::ratings::{AttributeQuality, RatingAggregator, TeamRatings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRatingsRequest {
    pub player_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRatingsResponse {
    pub ratings: TeamRatings,
    pub overall_quality: AttributeQuality,
    /// Requested ids the directory does not know
    pub missing_player_ids: Vec<String>,
}

/// `{"player_ids": [...]}` → `ApiResponse<TeamRatingsResponse>`
pub fn team_ratings_json(directory: &dyn PlayerDirectory, request_json: &str) -> String {
    let request: TeamRatingsRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(error) => return ApiResponse::<TeamRatingsResponse>::error(error).to_json(),
    };

    let mut players = Vec::with_capacity(request.player_ids.len());
    let mut missing_player_ids = Vec::new();
    for id in &request.player_ids {
        match directory.lookup(id) {
            Some(player) => players.push(player),
            None => missing_player_ids.push(id.clone()),
        }
    }
    if !missing_player_ids.is_empty() {
        warn!(missing = ?missing_player_ids, "ratings requested for unknown players");
    }

    let ratings = RatingAggregator::team_ratings(players);
    let response = TeamRatingsResponse {
        ratings,
        overall_quality: RatingAggregator::attribute_quality(ratings.overall),
        missing_player_ids,
    };
    ApiResponse::success(response).to_json()
}
