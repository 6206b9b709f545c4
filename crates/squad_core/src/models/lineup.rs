use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingSlot {
    pub player_id: String,
    pub position_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squad_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstituteSlot {
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squad_number: Option<u32>,
}

/// Starting players (in insertion order) and substitutes for one match.
///
/// A player id appears in at most one of the two lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineupSelection {
    #[serde(default)]
    pub starting: Vec<StartingSlot>,
    #[serde(default)]
    pub substitutes: Vec<SubstituteSlot>,
}

impl LineupSelection {
    pub fn is_starting(&self, player_id: &str) -> bool {
        self.starting.iter().any(|s| s.player_id == player_id)
    }

    pub fn is_substitute(&self, player_id: &str) -> bool {
        self.substitutes.iter().any(|s| s.player_id == player_id)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.is_starting(player_id) || self.is_substitute(player_id)
    }

    pub fn starting_ids(&self) -> impl Iterator<Item = &str> {
        self.starting.iter().map(|s| s.player_id.as_str())
    }

    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.starting_ids().chain(self.substitutes.iter().map(|s| s.player_id.as_str()))
    }

    pub fn squad_number_of(&self, player_id: &str) -> Option<u32> {
        self.starting
            .iter()
            .find(|s| s.player_id == player_id)
            .map(|s| s.squad_number)
            .or_else(|| {
                self.substitutes.iter().find(|s| s.player_id == player_id).map(|s| s.squad_number)
            })
            .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.starting.is_empty() && self.substitutes.is_empty()
    }
}
