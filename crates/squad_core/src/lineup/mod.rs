//! Starting lineup and substitute selection for one match.
//!
//! Starting slots keep insertion order (not formation order). Swaps address
//! slots by index because a formation may repeat a position code; any
//! "pending swap" cursor lives with the caller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::SquadNumberAssignment;
use crate::error::{Result, SquadError};
use crate::models::{LineupSelection, Player, StartingSlot, SubstituteSlot};
use crate::tactics::ResolvedTactic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupManager {
    team_id: String,
    squad_size: u8,
    selection: LineupSelection,
}

impl LineupManager {
    pub fn new(team_id: impl Into<String>, squad_size: u8) -> Self {
        Self::from_selection(team_id, squad_size, LineupSelection::default())
    }

    pub fn from_selection(
        team_id: impl Into<String>,
        squad_size: u8,
        selection: LineupSelection,
    ) -> Self {
        Self { team_id: team_id.into(), squad_size, selection }
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn selection(&self) -> &LineupSelection {
        &self.selection
    }

    pub fn into_selection(self) -> LineupSelection {
        self.selection
    }

    pub fn squad_size(&self) -> u8 {
        self.squad_size
    }

    /// Changes capacity without touching existing slots; an over-full lineup
    /// stays as it is until the caller trims it.
    pub fn set_squad_size(&mut self, squad_size: u8) {
        self.squad_size = squad_size;
    }

    pub fn starting_len(&self) -> usize {
        self.selection.starting.len()
    }

    pub fn is_full(&self) -> bool {
        self.starting_len() >= self.squad_size as usize
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.selection.contains(player_id)
    }

    /// Fails when the starting lineup holds more players than the squad size.
    pub fn check_capacity(&self) -> Result<()> {
        if self.starting_len() > self.squad_size as usize {
            return Err(SquadError::MismatchedSquadSize {
                expected: self.squad_size as usize,
                found: self.starting_len(),
            });
        }
        Ok(())
    }

    /// Fails with `AlreadySelected` for the first player listed twice, within
    /// one list or across starters and substitutes. Selections built through
    /// this manager never trip it; persisted ones handed to
    /// [`LineupManager::from_selection`] might.
    pub fn check_unique_players(&self) -> Result<()> {
        let mut seen = HashSet::new();
        match self.selection.all_ids().find(|id| !seen.insert(*id)) {
            Some(id) => Err(SquadError::AlreadySelected { player_id: id.to_string() }),
            None => Ok(()),
        }
    }

    /// Appends a starting slot and returns its index.
    pub fn add_starting(
        &mut self,
        player_id: &str,
        position_code: &str,
        numbers: Option<&dyn SquadNumberAssignment>,
    ) -> Result<usize> {
        self.ensure_unselected(player_id)?;
        if self.is_full() {
            return Err(SquadError::CapacityExceeded { squad_size: self.squad_size });
        }

        let squad_number = numbers.and_then(|n| n.lookup(&self.team_id, player_id));
        self.selection.starting.push(StartingSlot {
            player_id: player_id.to_string(),
            position_code: position_code.to_string(),
            squad_number,
        });
        debug!(player_id, position_code, ?squad_number, "starting player added");
        Ok(self.selection.starting.len() - 1)
    }

    /// Adds a starter at the best free position of `resolved`.
    ///
    /// Preference order: the player's first preferred position that is still
    /// unfilled, then the first unfilled slot, then the player's first
    /// preferred position even if taken.
    pub fn add_starting_default(
        &mut self,
        player: &Player,
        resolved: &ResolvedTactic,
        numbers: Option<&dyn SquadNumberAssignment>,
    ) -> Result<usize> {
        self.ensure_unselected(&player.id)?;
        if self.is_full() {
            return Err(SquadError::CapacityExceeded { squad_size: self.squad_size });
        }
        let code = self.default_position(player, resolved);
        self.add_starting(&player.id, &code, numbers)
    }

    /// Removes the starter if present. Captain bookkeeping stays with the caller.
    pub fn remove_starting(&mut self, player_id: &str) -> Option<StartingSlot> {
        let idx = self.selection.starting.iter().position(|s| s.player_id == player_id)?;
        debug!(player_id, "starting player removed");
        Some(self.selection.starting.remove(idx))
    }

    pub fn add_substitute(
        &mut self,
        player_id: &str,
        numbers: Option<&dyn SquadNumberAssignment>,
    ) -> Result<()> {
        self.ensure_unselected(player_id)?;
        let squad_number = numbers.and_then(|n| n.lookup(&self.team_id, player_id));
        self.selection.substitutes.push(SubstituteSlot {
            player_id: player_id.to_string(),
            squad_number,
        });
        debug!(player_id, ?squad_number, "substitute added");
        Ok(())
    }

    pub fn remove_substitute(&mut self, player_id: &str) -> Option<SubstituteSlot> {
        let idx = self.selection.substitutes.iter().position(|s| s.player_id == player_id)?;
        debug!(player_id, "substitute removed");
        Some(self.selection.substitutes.remove(idx))
    }

    /// Sets or clears the shirt number of whichever list holds the player.
    /// `Some(0)` clears like `None`. Numbers are not checked for uniqueness.
    /// Returns false when the player is not selected.
    pub fn set_squad_number(&mut self, player_id: &str, number: Option<u32>) -> bool {
        let number = number.filter(|n| *n > 0);
        if let Some(slot) = self.selection.starting.iter_mut().find(|s| s.player_id == player_id) {
            slot.squad_number = number;
            return true;
        }
        if let Some(slot) = self.selection.substitutes.iter_mut().find(|s| s.player_id == player_id)
        {
            slot.squad_number = number;
            return true;
        }
        false
    }

    /// Exchanges position code and squad number between two starting slots.
    /// Players stay at their indices.
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn swap_starting_positions(&mut self, index_a: usize, index_b: usize) {
        let len = self.selection.starting.len();
        assert!(
            index_a < len && index_b < len,
            "swap index out of range: {index_a}, {index_b} (starting len {len})"
        );
        if index_a == index_b {
            return;
        }

        let (lo, hi) = (index_a.min(index_b), index_a.max(index_b));
        let (head, tail) = self.selection.starting.split_at_mut(hi);
        let (a, b) = (&mut head[lo], &mut tail[0]);
        std::mem::swap(&mut a.position_code, &mut b.position_code);
        std::mem::swap(&mut a.squad_number, &mut b.squad_number);
        debug!(index_a, index_b, "starting positions swapped");
    }

    /// Indices of starting slots whose position code the tactic does not use.
    pub fn unknown_position_codes(&self, resolved: &ResolvedTactic) -> Vec<usize> {
        self.selection
            .starting
            .iter()
            .enumerate()
            .filter(|(_, s)| !resolved.contains_code(&s.position_code))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn clear(&mut self) {
        self.selection = LineupSelection::default();
    }

    fn ensure_unselected(&self, player_id: &str) -> Result<()> {
        if self.selection.contains(player_id) {
            return Err(SquadError::AlreadySelected { player_id: player_id.to_string() });
        }
        Ok(())
    }

    /// Formation slots not yet covered by a starter, matching codes as a multiset.
    fn unfilled_codes<'r>(&self, resolved: &'r ResolvedTactic) -> Vec<&'r str> {
        let mut taken: Vec<&str> =
            self.selection.starting.iter().map(|s| s.position_code.as_str()).collect();
        let mut unfilled = Vec::new();
        for code in resolved.position_codes() {
            match taken.iter().position(|t| *t == code) {
                Some(i) => {
                    taken.swap_remove(i);
                }
                None => unfilled.push(code),
            }
        }
        unfilled
    }

    fn default_position(&self, player: &Player, resolved: &ResolvedTactic) -> String {
        let unfilled = self.unfilled_codes(resolved);
        player
            .preferred_positions
            .iter()
            .find(|p| unfilled.contains(&p.as_str()))
            .map(String::as_str)
            .or_else(|| unfilled.first().copied())
            .or_else(|| player.preferred_positions.first().map(String::as_str))
            .or_else(|| resolved.position_codes().next())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryFormationCatalog, InMemorySquadNumbers, InMemoryTacticCatalog};
    use crate::models::{PlayerAttributes, Tactic, TacticScope};
    use crate::tactics::TacticResolver;
    use proptest::prelude::*;

    fn resolved_332() -> ResolvedTactic {
        let formations = InMemoryFormationCatalog::builtin();
        let tactics = InMemoryTacticCatalog::default();
        let tactic = Tactic::new("t", "T", TacticScope::team("reds"), "9-3-3-2", 9);
        TacticResolver::new(&formations, &tactics).resolve(&tactic).unwrap()
    }

    fn numbers() -> InMemorySquadNumbers {
        let mut n = InMemorySquadNumbers::default();
        n.assign("reds", "p1", 1);
        n.assign("reds", "p9", 9);
        n
    }

    #[test]
    fn test_add_starting_assigns_default_number() {
        let n = numbers();
        let mut lineup = LineupManager::new("reds", 9);
        assert_eq!(lineup.add_starting("p9", "ST", Some(&n)).unwrap(), 0);
        assert_eq!(lineup.add_starting("p2", "CM", Some(&n)).unwrap(), 1);
        assert_eq!(lineup.selection().starting[0].squad_number, Some(9));
        assert_eq!(lineup.selection().starting[1].squad_number, None);
    }

    #[test]
    fn test_add_starting_without_numbers_source() {
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("p9", "ST", None).unwrap();
        assert_eq!(lineup.selection().starting[0].squad_number, None);
    }

    #[test]
    fn test_already_selected_in_either_list() {
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("p1", "GK", None).unwrap();
        lineup.add_substitute("p2", None).unwrap();

        let err = SquadError::AlreadySelected { player_id: "p1".into() };
        assert_eq!(lineup.add_starting("p1", "CB", None).unwrap_err(), err);
        assert_eq!(lineup.add_substitute("p1", None).unwrap_err(), err);
        assert!(matches!(
            lineup.add_starting("p2", "CB", None),
            Err(SquadError::AlreadySelected { .. })
        ));
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut lineup = LineupManager::new("reds", 2);
        lineup.add_starting("a", "GK", None).unwrap();
        lineup.add_starting("b", "CB", None).unwrap();
        let before = lineup.clone();
        assert_eq!(
            lineup.add_starting("c", "ST", None).unwrap_err(),
            SquadError::CapacityExceeded { squad_size: 2 }
        );
        assert_eq!(lineup, before);
        // Substitutes are uncapped.
        for i in 0..20 {
            lineup.add_substitute(&format!("sub{i}"), None).unwrap();
        }
    }

    #[test]
    fn test_check_unique_players_on_persisted_selection() {
        let mut selection = LineupSelection::default();
        selection.starting.push(StartingSlot {
            player_id: "a".into(),
            position_code: "GK".into(),
            squad_number: None,
        });
        selection.substitutes.push(SubstituteSlot { player_id: "b".into(), squad_number: None });
        let lineup = LineupManager::from_selection("reds", 9, selection.clone());
        assert!(lineup.check_unique_players().is_ok());

        selection.substitutes.push(SubstituteSlot { player_id: "a".into(), squad_number: Some(4) });
        let lineup = LineupManager::from_selection("reds", 9, selection);
        assert_eq!(
            lineup.check_unique_players(),
            Err(SquadError::AlreadySelected { player_id: "a".to_string() })
        );
    }

    #[test]
    fn test_reducing_squad_size_does_not_truncate() {
        let mut lineup = LineupManager::new("reds", 3);
        for id in ["a", "b", "c"] {
            lineup.add_starting(id, "CM", None).unwrap();
        }
        lineup.set_squad_size(2);
        assert_eq!(lineup.starting_len(), 3);
        assert_eq!(
            lineup.check_capacity().unwrap_err(),
            SquadError::MismatchedSquadSize { expected: 2, found: 3 }
        );
        assert!(matches!(
            lineup.add_starting("d", "ST", None),
            Err(SquadError::CapacityExceeded { .. })
        ));

        lineup.remove_starting("a");
        assert!(lineup.check_capacity().is_ok());
        assert!(lineup.is_full());
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("a", "GK", None).unwrap();
        let before = lineup.clone();
        assert!(lineup.remove_starting("zz").is_none());
        assert!(lineup.remove_substitute("a").is_none());
        assert_eq!(lineup, before);
    }

    #[test]
    fn test_set_squad_number_either_list() {
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("a", "GK", None).unwrap();
        lineup.add_substitute("b", None).unwrap();

        assert!(lineup.set_squad_number("a", Some(1)));
        assert!(lineup.set_squad_number("b", Some(1)));
        assert_eq!(lineup.selection().squad_number_of("a"), Some(1));
        assert_eq!(lineup.selection().squad_number_of("b"), Some(1));

        assert!(lineup.set_squad_number("a", Some(0)));
        assert_eq!(lineup.selection().squad_number_of("a"), None);
        assert!(lineup.set_squad_number("b", None));
        assert_eq!(lineup.selection().squad_number_of("b"), None);

        assert!(!lineup.set_squad_number("ghost", Some(7)));
    }

    #[test]
    fn test_swap_exchanges_position_and_number_only() {
        let n = numbers();
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("p1", "GK", Some(&n)).unwrap();
        lineup.add_starting("p5", "CB", Some(&n)).unwrap();
        lineup.add_starting("p9", "ST", Some(&n)).unwrap();

        lineup.swap_starting_positions(2, 0);
        let s = &lineup.selection().starting;
        assert_eq!(s[0].player_id, "p1");
        assert_eq!(s[0].position_code, "ST");
        assert_eq!(s[0].squad_number, Some(9));
        assert_eq!(s[2].player_id, "p9");
        assert_eq!(s[2].position_code, "GK");
        assert_eq!(s[2].squad_number, Some(1));
        assert_eq!(s[1].position_code, "CB");
    }

    #[test]
    fn test_swap_with_duplicate_codes_uses_indices() {
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("a", "ST", None).unwrap();
        lineup.add_starting("b", "ST", None).unwrap();
        lineup.set_squad_number("a", Some(9));
        lineup.set_squad_number("b", Some(10));

        lineup.swap_starting_positions(0, 1);
        assert_eq!(lineup.selection().squad_number_of("a"), Some(10));
        assert_eq!(lineup.selection().squad_number_of("b"), Some(9));
    }

    #[test]
    #[should_panic(expected = "swap index out of range")]
    fn test_swap_out_of_range_panics() {
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("a", "GK", None).unwrap();
        lineup.swap_starting_positions(0, 3);
    }

    #[test]
    fn test_add_starting_default_prefers_free_preferred_position() {
        let resolved = resolved_332();
        let mut lineup = LineupManager::new("reds", 9);
        let striker = Player::new("s1", 70, PlayerAttributes::default())
            .with_preferred_positions(["ST", "CM"]);
        let striker2 = Player::new("s2", 70, PlayerAttributes::default())
            .with_preferred_positions(["ST", "CM"]);
        let striker3 = Player::new("s3", 70, PlayerAttributes::default())
            .with_preferred_positions(["ST", "CM"]);
        let striker4 = Player::new("s4", 70, PlayerAttributes::default())
            .with_preferred_positions(["ST", "CM"]);

        lineup.add_starting_default(&striker, &resolved, None).unwrap();
        lineup.add_starting_default(&striker2, &resolved, None).unwrap();
        lineup.add_starting_default(&striker3, &resolved, None).unwrap();
        lineup.add_starting_default(&striker4, &resolved, None).unwrap();

        let codes: Vec<&str> =
            lineup.selection().starting.iter().map(|s| s.position_code.as_str()).collect();
        // Two ST slots, one CM slot, then the first unfilled slot (GK).
        assert_eq!(codes, vec!["ST", "ST", "CM", "GK"]);
    }

    #[test]
    fn test_add_starting_default_without_preferences() {
        let resolved = resolved_332();
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("keeper", "GK", None).unwrap();
        let anyone = Player::new("x", 50, PlayerAttributes::default());
        lineup.add_starting_default(&anyone, &resolved, None).unwrap();
        assert_eq!(lineup.selection().starting[1].position_code, "LB");
    }

    #[test]
    fn test_unknown_position_codes() {
        let resolved = resolved_332();
        let mut lineup = LineupManager::new("reds", 9);
        lineup.add_starting("a", "GK", None).unwrap();
        lineup.add_starting("b", "CAM", None).unwrap();
        lineup.add_starting("c", "ST", None).unwrap();
        assert_eq!(lineup.unknown_position_codes(&resolved), vec![1]);
    }

    fn ids() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[a-z]{1,6}", 0..12).prop_map(|s| s.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_add_then_remove_restores_snapshot(existing in ids(), size in 1u8..12) {
            let mut lineup = LineupManager::new("reds", size);
            for id in existing.iter().take(size as usize - 1) {
                lineup.add_starting(id, "CM", None).unwrap();
            }
            let before = lineup.selection().clone();
            lineup.add_starting("NEW", "ST", None).unwrap();
            lineup.remove_starting("NEW");
            prop_assert_eq!(lineup.selection(), &before);
        }

        #[test]
        fn prop_capacity_is_enforced(existing in ids(), size in 0u8..8) {
            let mut lineup = LineupManager::new("reds", size);
            for id in &existing {
                let was_full = lineup.starting_len() == size as usize;
                let result = lineup.add_starting(id, "CM", None);
                prop_assert_eq!(was_full, result.is_err());
            }
            prop_assert!(lineup.starting_len() <= size as usize);
        }

        #[test]
        fn prop_swap_same_index_is_identity(existing in ids(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!existing.is_empty());
            let mut lineup = LineupManager::new("reds", 20);
            for (i, id) in existing.iter().enumerate() {
                lineup.add_starting(id, &format!("P{i}"), None).unwrap();
            }
            let before = lineup.clone();
            let i = pick.index(existing.len());
            lineup.swap_starting_positions(i, i);
            prop_assert_eq!(lineup, before);
        }

        #[test]
        fn prop_swap_twice_restores(existing in ids(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
            prop_assume!(!existing.is_empty());
            let mut lineup = LineupManager::new("reds", 20);
            for (i, id) in existing.iter().enumerate() {
                lineup.add_starting(id, &format!("P{i}"), None).unwrap();
            }
            let before = lineup.clone();
            let (a, b) = (a.index(existing.len()), b.index(existing.len()));
            lineup.swap_starting_positions(a, b);
            let ids_after: Vec<&str> = lineup.selection().starting_ids().collect();
            let ids_before: Vec<&str> = before.selection().starting_ids().collect();
            prop_assert_eq!(ids_after, ids_before);
            lineup.swap_starting_positions(a, b);
            prop_assert_eq!(lineup, before);
        }
    }
}
