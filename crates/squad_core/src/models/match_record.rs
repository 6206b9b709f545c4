use serde::{Deserialize, Serialize};

use super::lineup::LineupSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub home: Option<u8>,
    #[serde(default)]
    pub away: Option<u8>,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home: Some(home), away: Some(away) }
    }

    pub fn is_complete(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }
}

/// Persisted state of one match as seen by the editing flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain_id: Option<String>,
    pub squad_size: u8,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub lineup: LineupSelection,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub completed: bool,
}

impl MatchRecord {
    /// A freshly scheduled match in Draft.
    pub fn scheduled(id: impl Into<String>, team_id: impl Into<String>, squad_size: u8) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            tactic_id: None,
            captain_id: None,
            squad_size,
            score: Score::default(),
            lineup: LineupSelection::default(),
            locked: false,
            completed: false,
        }
    }
}
