use serde::{Deserialize, Serialize};

/// A single position on the pitch template.
///
/// Coordinates are normalized: `x` runs across the pitch (0 = left touchline),
/// `y` runs from the team's own goal (0) to the opponent's goal (1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSlot {
    pub code: String,
    pub x: f32,
    pub y: f32,
}

impl PositionSlot {
    pub fn new(code: impl Into<String>, x: f32, y: f32) -> Self {
        Self { code: code.into(), x, y }
    }
}

/// Squad-size specific template of position slots.
///
/// Slot order is GK → defence → midfield → attack and is never rearranged by
/// the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: String,
    pub name: String,
    /// Shape label such as "4-4-2"
    pub system: String,
    pub squad_size: u8,
    pub positions: Vec<PositionSlot>,
}

impl Formation {
    pub fn position_codes(&self) -> impl Iterator<Item = &str> {
        self.positions.iter().map(|p| p.code.as_str())
    }

    /// Number of slots carrying `code` (formations may repeat a code, e.g. two "CB").
    pub fn count_code(&self, code: &str) -> usize {
        self.positions.iter().filter(|p| p.code == code).count()
    }

    /// True when the slot list length agrees with the declared squad size.
    pub fn is_consistent(&self) -> bool {
        self.positions.len() == self.squad_size as usize
    }
}
