//! # squad_core - Tactic Resolution and Squad Composition Engine
//!
//! Editing core for match squads:
//! - Formation catalog with built-in shapes for 5, 7, 9 and 11 a side
//! - Tactic inheritance across club, age group and team scopes
//! - Team rating aggregation over skills, physical and mental attributes
//! - Starting lineup and substitute selection with capacity checks
//! - Lock/complete lifecycle guarding match records
//!
//! Catalogs are injected through the traits in [`catalog`]; nothing here
//! persists state.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod lineup;
pub mod match_record;
pub mod models;
pub mod ratings;
pub mod tactics;

// Re-export main API functions
pub use api::{available_tactics_json, resolve_tactic_json, team_ratings_json};

pub use catalog::{
    builtin_formations, CatalogBundle, CatalogError, FormationCatalog, InMemoryFormationCatalog,
    InMemoryPlayerDirectory, InMemorySquadNumbers, InMemoryTacticCatalog, PlayerDirectory,
    SquadNumberAssignment, TacticCatalog,
};
pub use config::{ConfigError, EngineConfig, LineupConfig};
pub use error::{Result, SquadError};
pub use lineup::LineupManager;
pub use match_record::{MatchPhase, MatchRecordStateMachine};
pub use models::{
    Formation, LineupSelection, MatchRecord, Player, PlayerAttributes, PositionRole, PositionSlot,
    Relationship, Score, ScopeType, Tactic, TacticScope,
};
pub use ratings::{AttributeQuality, LineupScope, RatingAggregator, TeamRatings};
pub use tactics::{ResolvedPosition, ResolvedTactic, TacticResolver};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
