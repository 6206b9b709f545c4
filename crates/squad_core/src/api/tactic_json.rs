//! JSON API for tactic resolution and lookup

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{parse_request, ApiError, ApiResponse};
use crate::catalog::{FormationCatalog, TacticCatalog};
use crate::models::{Tactic, TacticScope};
use crate::tactics::{ResolvedTactic, TacticResolver};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveTacticRequest {
    pub tactic_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTacticsRequest {
    pub team_id: String,
    pub age_group_id: String,
    pub club_id: String,
    pub squad_size: u8,
}

/// Catalog listing entry; tactics are not resolved for listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticSummary {
    pub id: String,
    pub name: String,
    pub scope: TacticScope,
    pub parent_formation_id: String,
    pub parent_tactic_id: Option<String>,
    pub squad_size: u8,
}

impl From<&Tactic> for TacticSummary {
    fn from(tactic: &Tactic) -> Self {
        Self {
            id: tactic.id.clone(),
            name: tactic.name.clone(),
            scope: tactic.scope.clone(),
            parent_formation_id: tactic.parent_formation_id.clone(),
            parent_tactic_id: tactic.parent_tactic_id.clone(),
            squad_size: tactic.squad_size,
        }
    }
}

/// `{"tactic_id": ...}` → `ApiResponse<ResolvedTactic>`
pub fn resolve_tactic_json(
    formations: &dyn FormationCatalog,
    tactics: &dyn TacticCatalog,
    request_json: &str,
) -> String {
    let request: ResolveTacticRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(error) => return ApiResponse::<ResolvedTactic>::error(error).to_json(),
    };

    let resolver = TacticResolver::new(formations, tactics);
    match resolver.resolve_id(&request.tactic_id) {
        Ok(resolved) => ApiResponse::success(resolved).to_json(),
        Err(err) => {
            warn!(tactic_id = %request.tactic_id, error = %err, "tactic resolution failed");
            ApiResponse::<ResolvedTactic>::error(ApiError::from(&err)).to_json()
        }
    }
}

/// `AvailableTacticsRequest` → `ApiResponse<Vec<TacticSummary>>`
pub fn available_tactics_json(
    formations: &dyn FormationCatalog,
    tactics: &dyn TacticCatalog,
    request_json: &str,
) -> String {
    let request: AvailableTacticsRequest = match parse_request(request_json) {
        Ok(req) => req,
        Err(error) => return ApiResponse::<Vec<TacticSummary>>::error(error).to_json(),
    };

    let resolver = TacticResolver::new(formations, tactics);
    let summaries: Vec<TacticSummary> = resolver
        .available_tactics(
            &request.team_id,
            &request.age_group_id,
            &request.club_id,
            request.squad_size,
        )
        .into_iter()
        .map(TacticSummary::from)
        .collect();
    debug!(team_id = %request.team_id, count = summaries.len(), "available tactics listed");
    ApiResponse::success(summaries).to_json()
}
