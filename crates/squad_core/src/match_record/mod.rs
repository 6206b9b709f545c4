//! Lock/complete lifecycle of a match record.
//!
//! ```text
//!            lock()                    complete_and_lock()
//!   Draft ───────────▶ Locked   Draft ─────────────────────▶ Locked + completed
//!         ◀───────────                 ◀─────────────────────
//!            unlock()                        unlock()  (completed stays true)
//! ```
//!
//! Every mutation (lineup, score, captain, tactic, squad size) is refused
//! with `RecordLocked` while the record is locked, leaving it untouched.
//! `locked` is a business rule, not a concurrency primitive.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{PlayerDirectory, SquadNumberAssignment};
use crate::config::LineupConfig;
use crate::error::{Result, SquadError};
use crate::lineup::LineupManager;
use crate::models::{MatchRecord, Player, Score, StartingSlot, SubstituteSlot};
use crate::ratings::{LineupScope, RatingAggregator, TeamRatings};
use crate::tactics::ResolvedTactic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Draft,
    Locked,
}

#[derive(Debug, Clone)]
pub struct MatchRecordStateMachine {
    record: MatchRecord,
    config: LineupConfig,
}

impl MatchRecordStateMachine {
    pub fn new(record: MatchRecord) -> Self {
        Self::with_config(record, LineupConfig::default())
    }

    pub fn with_config(record: MatchRecord, config: LineupConfig) -> Self {
        Self { record, config }
    }

    /// New Draft record sized by the configured default squad size.
    pub fn schedule(id: impl Into<String>, team_id: impl Into<String>, config: LineupConfig) -> Self {
        let record = MatchRecord::scheduled(id, team_id, config.default_squad_size);
        Self::with_config(record, config)
    }

    pub fn record(&self) -> &MatchRecord {
        &self.record
    }

    pub fn into_record(self) -> MatchRecord {
        self.record
    }

    pub fn phase(&self) -> MatchPhase {
        if self.record.locked {
            MatchPhase::Locked
        } else {
            MatchPhase::Draft
        }
    }

    pub fn is_locked(&self) -> bool {
        self.record.locked
    }

    pub fn is_completed(&self) -> bool {
        self.record.completed
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Idempotent.
    pub fn lock(&mut self) {
        if !self.record.locked {
            info!(match_id = %self.record.id, "match record locked");
        }
        self.record.locked = true;
    }

    /// Always permitted; `completed` is left as it is.
    pub fn unlock(&mut self) {
        if self.record.locked {
            info!(match_id = %self.record.id, completed = self.record.completed, "match record unlocked");
        }
        self.record.locked = false;
    }

    /// Marks the match completed and locks it in one step. Needs both scores
    /// and at least one starting player.
    pub fn complete_and_lock(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        if !self.record.score.is_complete() {
            return Err(SquadError::IncompleteRecord { reason: "score is not set".to_string() });
        }
        if self.record.lineup.starting.is_empty() {
            return Err(SquadError::IncompleteRecord {
                reason: "no starting players selected".to_string(),
            });
        }
        self.record.completed = true;
        self.record.locked = true;
        info!(match_id = %self.record.id, "match record completed and locked");
        Ok(())
    }

    // ========================================================================
    // Gated record fields
    // ========================================================================

    pub fn set_score(&mut self, home: Option<u8>, away: Option<u8>) -> Result<()> {
        self.ensure_unlocked()?;
        self.record.score = Score { home, away };
        Ok(())
    }

    pub fn set_captain(&mut self, player_id: Option<&str>) -> Result<()> {
        self.ensure_unlocked()?;
        self.record.captain_id = player_id.map(str::to_string);
        Ok(())
    }

    pub fn set_tactic(&mut self, tactic_id: Option<&str>) -> Result<()> {
        self.ensure_unlocked()?;
        self.record.tactic_id = tactic_id.map(str::to_string);
        Ok(())
    }

    /// Existing starters beyond the new size are kept; see
    /// [`LineupManager::set_squad_size`].
    pub fn set_squad_size(&mut self, squad_size: u8) -> Result<()> {
        self.edit_lineup(|lineup| {
            lineup.set_squad_size(squad_size);
            Ok(())
        })
    }

    // ========================================================================
    // Lineup editing
    // ========================================================================

    /// Runs `edit` against a working copy of the lineup. The record only
    /// changes when `edit` returns `Ok`; an error or a panic leaves it as it was.
    pub fn edit_lineup<T>(
        &mut self,
        edit: impl FnOnce(&mut LineupManager) -> Result<T>,
    ) -> Result<T> {
        self.ensure_unlocked()?;

        let mut manager = LineupManager::from_selection(
            self.record.team_id.clone(),
            self.record.squad_size,
            self.record.lineup.clone(),
        );

        let outcome = edit(&mut manager)?;
        self.record.squad_size = manager.squad_size();
        self.record.lineup = manager.into_selection();
        Ok(outcome)
    }

    pub fn add_starting(
        &mut self,
        player_id: &str,
        position_code: &str,
        numbers: Option<&dyn SquadNumberAssignment>,
    ) -> Result<usize> {
        let numbers = self.number_source(numbers);
        self.edit_lineup(|lineup| lineup.add_starting(player_id, position_code, numbers))
    }

    pub fn add_starting_default(
        &mut self,
        player: &Player,
        resolved: &ResolvedTactic,
        numbers: Option<&dyn SquadNumberAssignment>,
    ) -> Result<usize> {
        let numbers = self.number_source(numbers);
        self.edit_lineup(|lineup| lineup.add_starting_default(player, resolved, numbers))
    }

    /// Removing the captain from the starting lineup also clears the captain.
    pub fn remove_starting(&mut self, player_id: &str) -> Result<Option<StartingSlot>> {
        let removed = self.edit_lineup(|lineup| Ok(lineup.remove_starting(player_id)))?;
        if removed.is_some() && self.record.captain_id.as_deref() == Some(player_id) {
            debug!(player_id, "captain removed from lineup, clearing captain");
            self.record.captain_id = None;
        }
        Ok(removed)
    }

    pub fn add_substitute(
        &mut self,
        player_id: &str,
        numbers: Option<&dyn SquadNumberAssignment>,
    ) -> Result<()> {
        let numbers = self.number_source(numbers);
        self.edit_lineup(|lineup| lineup.add_substitute(player_id, numbers))
    }

    pub fn remove_substitute(&mut self, player_id: &str) -> Result<Option<SubstituteSlot>> {
        self.edit_lineup(|lineup| Ok(lineup.remove_substitute(player_id)))
    }

    pub fn set_squad_number(&mut self, player_id: &str, number: Option<u32>) -> Result<bool> {
        self.edit_lineup(|lineup| Ok(lineup.set_squad_number(player_id, number)))
    }

    /// # Panics
    /// If either index is outside the starting lineup (and the record is unlocked).
    pub fn swap_starting_positions(&mut self, index_a: usize, index_b: usize) -> Result<()> {
        self.ensure_unlocked()?;
        let len = self.record.lineup.starting.len();
        assert!(
            index_a < len && index_b < len,
            "swap index out of range: {index_a}, {index_b} (starting len {len})"
        );
        self.edit_lineup(|lineup| {
            lineup.swap_starting_positions(index_a, index_b);
            Ok(())
        })
    }

    pub fn clear_lineup(&mut self) -> Result<()> {
        self.edit_lineup(|lineup| {
            lineup.clear();
            Ok(())
        })?;
        self.record.captain_id = None;
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// A detached copy of the lineup for inspection.
    pub fn lineup(&self) -> LineupManager {
        LineupManager::from_selection(
            self.record.team_id.clone(),
            self.record.squad_size,
            self.record.lineup.clone(),
        )
    }

    /// Reports an over-full starting lineup left behind by a squad size reduction.
    pub fn check_capacity(&self) -> Result<()> {
        self.lineup().check_capacity()
    }

    /// Capacity plus the one-list-per-player rule, for records loaded from
    /// storage rather than built through this machine.
    pub fn check_lineup(&self) -> Result<()> {
        let lineup = self.lineup();
        lineup.check_capacity()?;
        lineup.check_unique_players()
    }

    pub fn ratings(&self, directory: &dyn PlayerDirectory, scope: LineupScope) -> TeamRatings {
        RatingAggregator::lineup_ratings(&self.record.lineup, directory, scope)
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.record.locked {
            debug!(match_id = %self.record.id, "mutation refused, record locked");
            return Err(SquadError::RecordLocked);
        }
        Ok(())
    }

    fn number_source<'n>(
        &self,
        numbers: Option<&'n dyn SquadNumberAssignment>,
    ) -> Option<&'n dyn SquadNumberAssignment> {
        numbers.filter(|_| self.config.auto_squad_numbers)
    }
}
