use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute groups used for category ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeCategory {
    Skills,
    Physical,
    Mental,
}

pub const SKILL_KEYS: [&str; 15] = [
    "ball_control",
    "crossing",
    "weak_foot",
    "dribbling",
    "finishing",
    "free_kick",
    "heading",
    "long_passing",
    "long_shot",
    "penalties",
    "short_passing",
    "shot_power",
    "sliding_tackle",
    "standing_tackle",
    "volleys",
];

pub const PHYSICAL_KEYS: [&str; 9] = [
    "acceleration",
    "agility",
    "balance",
    "jumping",
    "pace",
    "reactions",
    "sprint_speed",
    "stamina",
    "strength",
];

pub const MENTAL_KEYS: [&str; 11] = [
    "aggression",
    "attacking_position",
    "awareness",
    "communication",
    "composure",
    "defensive_positioning",
    "interceptions",
    "marking",
    "positivity",
    "positioning",
    "vision",
];

impl AttributeCategory {
    pub const ALL: [AttributeCategory; 3] =
        [AttributeCategory::Skills, AttributeCategory::Physical, AttributeCategory::Mental];

    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            AttributeCategory::Skills => &SKILL_KEYS,
            AttributeCategory::Physical => &PHYSICAL_KEYS,
            AttributeCategory::Mental => &MENTAL_KEYS,
        }
    }
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttributeCategory::Skills => "skills",
            AttributeCategory::Physical => "physical",
            AttributeCategory::Mental => "mental",
        };
        f.write_str(s)
    }
}

/// Raw player ratings, each on a 0-99 scale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerAttributes {
    // Skills (15)
    pub ball_control: u8,
    pub crossing: u8,
    pub weak_foot: u8,
    pub dribbling: u8,
    pub finishing: u8,
    pub free_kick: u8,
    pub heading: u8,
    pub long_passing: u8,
    pub long_shot: u8,
    pub penalties: u8,
    pub short_passing: u8,
    pub shot_power: u8,
    pub sliding_tackle: u8,
    pub standing_tackle: u8,
    pub volleys: u8,

    // Physical (9)
    pub acceleration: u8,
    pub agility: u8,
    pub balance: u8,
    pub jumping: u8,
    pub pace: u8,
    pub reactions: u8,
    pub sprint_speed: u8,
    pub stamina: u8,
    pub strength: u8,

    // Mental (11)
    pub aggression: u8,
    pub attacking_position: u8,
    pub awareness: u8,
    pub communication: u8,
    pub composure: u8,
    pub defensive_positioning: u8,
    pub interceptions: u8,
    pub marking: u8,
    pub positivity: u8,
    pub positioning: u8,
    pub vision: u8,
}

pub const MAX_ATTRIBUTE: u8 = 99;

impl PlayerAttributes {
    /// Every attribute set to `val` (clamped to the 0-99 scale).
    pub fn from_uniform(val: u8) -> Self {
        let v = val.min(MAX_ATTRIBUTE);
        let mut attrs = Self::default();
        for key in SKILL_KEYS.iter().chain(PHYSICAL_KEYS.iter()).chain(MENTAL_KEYS.iter()) {
            attrs.set_by_key(key, v);
        }
        attrs
    }

    pub fn get_by_key(&self, key: &str) -> Option<u8> {
        let v = match key {
            "ball_control" => self.ball_control,
            "crossing" => self.crossing,
            "weak_foot" => self.weak_foot,
            "dribbling" => self.dribbling,
            "finishing" => self.finishing,
            "free_kick" => self.free_kick,
            "heading" => self.heading,
            "long_passing" => self.long_passing,
            "long_shot" => self.long_shot,
            "penalties" => self.penalties,
            "short_passing" => self.short_passing,
            "shot_power" => self.shot_power,
            "sliding_tackle" => self.sliding_tackle,
            "standing_tackle" => self.standing_tackle,
            "volleys" => self.volleys,
            "acceleration" => self.acceleration,
            "agility" => self.agility,
            "balance" => self.balance,
            "jumping" => self.jumping,
            "pace" => self.pace,
            "reactions" => self.reactions,
            "sprint_speed" => self.sprint_speed,
            "stamina" => self.stamina,
            "strength" => self.strength,
            "aggression" => self.aggression,
            "attacking_position" => self.attacking_position,
            "awareness" => self.awareness,
            "communication" => self.communication,
            "composure" => self.composure,
            "defensive_positioning" => self.defensive_positioning,
            "interceptions" => self.interceptions,
            "marking" => self.marking,
            "positivity" => self.positivity,
            "positioning" => self.positioning,
            "vision" => self.vision,
            _ => return None,
        };
        Some(v)
    }

    /// Returns false for an unknown key.
    pub fn set_by_key(&mut self, key: &str, value: u8) -> bool {
        let slot = match key {
            "ball_control" => &mut self.ball_control,
            "crossing" => &mut self.crossing,
            "weak_foot" => &mut self.weak_foot,
            "dribbling" => &mut self.dribbling,
            "finishing" => &mut self.finishing,
            "free_kick" => &mut self.free_kick,
            "heading" => &mut self.heading,
            "long_passing" => &mut self.long_passing,
            "long_shot" => &mut self.long_shot,
            "penalties" => &mut self.penalties,
            "short_passing" => &mut self.short_passing,
            "shot_power" => &mut self.shot_power,
            "sliding_tackle" => &mut self.sliding_tackle,
            "standing_tackle" => &mut self.standing_tackle,
            "volleys" => &mut self.volleys,
            "acceleration" => &mut self.acceleration,
            "agility" => &mut self.agility,
            "balance" => &mut self.balance,
            "jumping" => &mut self.jumping,
            "pace" => &mut self.pace,
            "reactions" => &mut self.reactions,
            "sprint_speed" => &mut self.sprint_speed,
            "stamina" => &mut self.stamina,
            "strength" => &mut self.strength,
            "aggression" => &mut self.aggression,
            "attacking_position" => &mut self.attacking_position,
            "awareness" => &mut self.awareness,
            "communication" => &mut self.communication,
            "composure" => &mut self.composure,
            "defensive_positioning" => &mut self.defensive_positioning,
            "interceptions" => &mut self.interceptions,
            "marking" => &mut self.marking,
            "positivity" => &mut self.positivity,
            "positioning" => &mut self.positioning,
            "vision" => &mut self.vision,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Values of one category in declaration order.
    pub fn category_values(&self, category: AttributeCategory) -> Vec<u8> {
        category.keys().iter().filter_map(|k| self.get_by_key(k)).collect()
    }

    /// Keys whose value exceeds the 0-99 scale.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        AttributeCategory::ALL
            .iter()
            .flat_map(|c| c.keys().iter().copied())
            .filter(|k| self.get_by_key(k).is_some_and(|v| v > MAX_ATTRIBUTE))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Precomputed upstream; the engine never derives it from attributes.
    pub overall_rating: u8,
    #[serde(default)]
    pub preferred_positions: Vec<String>,
    #[serde(default)]
    pub attributes: PlayerAttributes,
}

impl Player {
    pub fn new(id: impl Into<String>, overall_rating: u8, attributes: PlayerAttributes) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            overall_rating,
            preferred_positions: Vec::new(),
            attributes,
        }
    }

    pub fn with_preferred_positions<I, S>(mut self, positions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_positions = positions.into_iter().map(Into::into).collect();
        self
    }
}
