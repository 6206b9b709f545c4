pub mod formation;
pub mod lineup;
pub mod match_record;
pub mod player;
pub mod tactic;

pub use formation::{Formation, PositionSlot};
pub use lineup::{LineupSelection, StartingSlot, SubstituteSlot};
pub use match_record::{MatchRecord, Score};
pub use player::{AttributeCategory, Player, PlayerAttributes};
pub use tactic::{PositionRole, Relationship, ScopeType, Tactic, TacticScope};
