//! Team and player rating aggregation
//!
//! Category averages are integer means of a fixed attribute set:
//! - skills: 15 attributes
//! - physical: 9 attributes
//! - mental: 11 attributes
//!
//! Every mean rounds half up. Overall team rating averages each player's
//! precomputed `overall_rating`; it is never rebuilt from raw attributes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::PlayerDirectory;
use crate::models::{AttributeCategory, LineupSelection, Player, PlayerAttributes};

/// Display tier for a single attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttributeQuality {
    VeryPoor,
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl AttributeQuality {
    pub fn label(&self) -> &'static str {
        match self {
            AttributeQuality::Excellent => "Excellent",
            AttributeQuality::VeryGood => "Very Good",
            AttributeQuality::Good => "Good",
            AttributeQuality::Fair => "Fair",
            AttributeQuality::Poor => "Poor",
            AttributeQuality::VeryPoor => "Very Poor",
        }
    }
}

impl fmt::Display for AttributeQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamRatings {
    pub overall: u8,
    pub skills: u8,
    pub physical: u8,
    pub mental: u8,
    pub player_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRatingSummary {
    pub overall: u8,
    pub skills: u8,
    pub physical: u8,
    pub mental: u8,
}

/// Which part of a lineup feeds [`RatingAggregator::lineup_ratings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineupScope {
    #[default]
    Starting,
    WholeSquad,
}

/// Rating aggregation over players. Stateless and side-effect free.
pub struct RatingAggregator;

impl RatingAggregator {
    pub fn category_average(attributes: &PlayerAttributes, category: AttributeCategory) -> u8 {
        let values = attributes.category_values(category);
        let sum: u64 = values.iter().map(|v| *v as u64).sum();
        mean_round_half_up(sum, values.len() as u64)
    }

    pub fn player_summary(player: &Player) -> PlayerRatingSummary {
        PlayerRatingSummary {
            overall: player.overall_rating,
            skills: Self::category_average(&player.attributes, AttributeCategory::Skills),
            physical: Self::category_average(&player.attributes, AttributeCategory::Physical),
            mental: Self::category_average(&player.attributes, AttributeCategory::Mental),
        }
    }

    /// Averages over `players`; empty input yields all zeros.
    pub fn team_ratings<'p, I>(players: I) -> TeamRatings
    where
        I: IntoIterator<Item = &'p Player>,
    {
        let mut count = 0u64;
        let (mut overall, mut skills, mut physical, mut mental) = (0u64, 0u64, 0u64, 0u64);

        for player in players {
            let summary = Self::player_summary(player);
            overall += summary.overall as u64;
            skills += summary.skills as u64;
            physical += summary.physical as u64;
            mental += summary.mental as u64;
            count += 1;
        }

        TeamRatings {
            overall: mean_round_half_up(overall, count),
            skills: mean_round_half_up(skills, count),
            physical: mean_round_half_up(physical, count),
            mental: mean_round_half_up(mental, count),
            player_count: count as usize,
        }
    }

    /// Ratings for the players of a lineup. Ids the directory does not know
    /// are skipped and logged.
    pub fn lineup_ratings(
        selection: &LineupSelection,
        directory: &dyn PlayerDirectory,
        scope: LineupScope,
    ) -> TeamRatings {
        let ids: Vec<&str> = match scope {
            LineupScope::Starting => selection.starting_ids().collect(),
            LineupScope::WholeSquad => selection.all_ids().collect(),
        };

        let players = ids.into_iter().filter_map(|id| {
            let found = directory.lookup(id);
            if found.is_none() {
                warn!(player_id = id, "player missing from directory, excluded from ratings");
            }
            found
        });
        Self::team_ratings(players)
    }

    pub fn attribute_quality(rating: u8) -> AttributeQuality {
        match rating {
            90..=u8::MAX => AttributeQuality::Excellent,
            80..=89 => AttributeQuality::VeryGood,
            70..=79 => AttributeQuality::Good,
            50..=69 => AttributeQuality::Fair,
            40..=49 => AttributeQuality::Poor,
            _ => AttributeQuality::VeryPoor,
        }
    }
}

fn mean_round_half_up(sum: u64, count: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)).min(u8::MAX as u64) as u8
}
