//! Read-only collaborators consumed by the engine.
//!
//! Formations, tactics, players and squad numbers are owned by the host
//! application and injected through these traits, so the resolver and the
//! lineup code can run against fixture data as easily as live data.

pub mod builtin;
pub mod bundle;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SquadError};
use crate::models::{Formation, Player, Tactic};

pub use builtin::builtin_formations;
pub use bundle::{CatalogBundle, CatalogError};

pub trait FormationCatalog {
    /// Every formation in stable catalog order.
    fn formations(&self) -> &[Formation];

    fn list_by_squad_size(&self, squad_size: u8) -> Vec<&Formation> {
        self.formations().iter().filter(|f| f.squad_size == squad_size).collect()
    }

    fn get_by_id(&self, id: &str) -> Result<&Formation> {
        self.formations()
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| SquadError::MissingFormation { formation_id: id.to_string() })
    }

    /// Distinct squad sizes, ascending.
    fn squad_sizes(&self) -> Vec<u8> {
        let mut sizes: Vec<u8> = self.formations().iter().map(|f| f.squad_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

pub trait TacticCatalog {
    fn tactics(&self) -> &[Tactic];

    fn get(&self, id: &str) -> Option<&Tactic> {
        self.tactics().iter().find(|t| t.id == id)
    }
}

pub trait PlayerDirectory {
    fn lookup(&self, player_id: &str) -> Option<&Player>;
}

pub trait SquadNumberAssignment {
    /// Default shirt number for a player within a team, if one is registered.
    fn lookup(&self, team_id: &str, player_id: &str) -> Option<u32>;
}

// ============================================================================
// In-memory implementations
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemoryFormationCatalog {
    formations: Vec<Formation>,
}

impl InMemoryFormationCatalog {
    pub fn new(formations: Vec<Formation>) -> Self {
        Self { formations }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_formations().to_vec())
    }

    /// Adds a formation, replacing any existing entry with the same id in place.
    pub fn insert(&mut self, formation: Formation) {
        match self.formations.iter_mut().find(|f| f.id == formation.id) {
            Some(existing) => *existing = formation,
            None => self.formations.push(formation),
        }
    }
}

impl FormationCatalog for InMemoryFormationCatalog {
    fn formations(&self) -> &[Formation] {
        &self.formations
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTacticCatalog {
    tactics: Vec<Tactic>,
}

impl InMemoryTacticCatalog {
    pub fn new(tactics: Vec<Tactic>) -> Self {
        Self { tactics }
    }

    pub fn insert(&mut self, tactic: Tactic) {
        match self.tactics.iter_mut().find(|t| t.id == tactic.id) {
            Some(existing) => *existing = tactic,
            None => self.tactics.push(tactic),
        }
    }
}

impl TacticCatalog for InMemoryTacticCatalog {
    fn tactics(&self) -> &[Tactic] {
        &self.tactics
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPlayerDirectory {
    players: BTreeMap<String, Player>,
}

impl InMemoryPlayerDirectory {
    pub fn new<I: IntoIterator<Item = Player>>(players: I) -> Self {
        Self { players: players.into_iter().map(|p| (p.id.clone(), p)).collect() }
    }

    pub fn insert(&mut self, player: Player) {
        self.players.insert(player.id.clone(), player);
    }

    /// Players ordered by id.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerDirectory for InMemoryPlayerDirectory {
    fn lookup(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadNumberEntry {
    pub team_id: String,
    pub player_id: String,
    pub number: u32,
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySquadNumbers {
    numbers: HashMap<(String, String), u32>,
}

impl InMemorySquadNumbers {
    pub fn new<I: IntoIterator<Item = SquadNumberEntry>>(entries: I) -> Self {
        let mut numbers = Self::default();
        for e in entries {
            numbers.assign(e.team_id, e.player_id, e.number);
        }
        numbers
    }

    pub fn assign(&mut self, team_id: impl Into<String>, player_id: impl Into<String>, number: u32) {
        self.numbers.insert((team_id.into(), player_id.into()), number);
    }
}

impl SquadNumberAssignment for InMemorySquadNumbers {
    fn lookup(&self, team_id: &str, player_id: &str) -> Option<u32> {
        self.numbers.get(&(team_id.to_string(), player_id.to_string())).copied()
    }
}
