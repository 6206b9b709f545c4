//! Tactic inheritance resolution.
//!
//! A tactic may inherit from a parent tactic (team → age group → club). The
//! chain is walked explicitly with a visited set, then role overrides are
//! applied root to leaf on top of the base formation's slots.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{FormationCatalog, TacticCatalog};
use crate::error::{Result, SquadError};
use crate::models::{PositionRole, PositionSlot, Relationship, ScopeType, Tactic};

/// A formation slot with the role that won resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPosition {
    #[serde(flatten)]
    pub slot: PositionSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PositionRole>,
    /// Tactic that supplied `role`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tactic_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTactic {
    pub tactic_id: String,
    pub name: String,
    pub formation_id: String,
    pub squad_size: u8,
    /// Base formation order, unchanged.
    pub positions: Vec<ResolvedPosition>,
    /// Every chain member's relationships, root to leaf, not deduplicated.
    pub relationships: Vec<Relationship>,
    /// Tactic ids from the most distant ancestor to the resolved tactic.
    pub chain: Vec<String>,
}

impl ResolvedTactic {
    /// Role of the first slot carrying `code`.
    pub fn role_for(&self, code: &str) -> Option<&PositionRole> {
        self.positions.iter().find(|p| p.slot.code == code).and_then(|p| p.role.as_ref())
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.positions.iter().any(|p| p.slot.code == code)
    }

    pub fn position_codes(&self) -> impl Iterator<Item = &str> {
        self.positions.iter().map(|p| p.slot.code.as_str())
    }
}

pub struct TacticResolver<'a> {
    formations: &'a dyn FormationCatalog,
    tactics: &'a dyn TacticCatalog,
}

impl<'a> TacticResolver<'a> {
    pub fn new(formations: &'a dyn FormationCatalog, tactics: &'a dyn TacticCatalog) -> Self {
        Self { formations, tactics }
    }

    /// Resolves a catalog tactic by id.
    ///
    /// An unknown id is reported as a missing parent of itself, since there is
    /// nothing else to attribute it to.
    pub fn resolve_id(&self, tactic_id: &str) -> Result<ResolvedTactic> {
        let tactic = self.tactics.get(tactic_id).ok_or_else(|| SquadError::MissingParentTactic {
            tactic_id: tactic_id.to_string(),
            parent_id: tactic_id.to_string(),
        })?;
        self.resolve(tactic)
    }

    pub fn resolve(&self, tactic: &Tactic) -> Result<ResolvedTactic> {
        let formation = self.formations.get_by_id(&tactic.parent_formation_id)?;
        if formation.squad_size != tactic.squad_size {
            return Err(SquadError::MismatchedSquadSize {
                expected: formation.squad_size as usize,
                found: tactic.squad_size as usize,
            });
        }

        let chain = self.inheritance_chain(tactic)?;

        let positions = formation
            .positions
            .iter()
            .map(|slot| {
                let mut resolved =
                    ResolvedPosition { slot: slot.clone(), role: None, source_tactic_id: None };
                // Later (closer to leaf) definitions replace earlier ones wholesale.
                for member in &chain {
                    if let Some(role) = member.position_roles.get(&slot.code) {
                        resolved.role = Some(role.clone());
                        resolved.source_tactic_id = Some(member.id.clone());
                    }
                }
                resolved
            })
            .collect();

        let relationships =
            chain.iter().flat_map(|member| member.relationships.iter().cloned()).collect();

        let chain_ids: Vec<String> = chain.iter().map(|t| t.id.clone()).collect();
        debug!(tactic = %tactic.id, formation = %formation.id, chain = ?chain_ids, "tactic resolved");

        Ok(ResolvedTactic {
            tactic_id: tactic.id.clone(),
            name: tactic.name.clone(),
            formation_id: formation.id.clone(),
            squad_size: formation.squad_size,
            positions,
            relationships,
            chain: chain_ids,
        })
    }

    /// Ancestors of `tactic` followed by the tactic itself, root first.
    pub fn inheritance_chain<'t>(&'t self, tactic: &'t Tactic) -> Result<Vec<&'t Tactic>> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(tactic.id.as_str());

        let mut chain = vec![tactic];
        let mut current = tactic;
        while let Some(parent_id) = current.parent_tactic_id.as_deref() {
            if !visited.insert(parent_id) {
                return Err(SquadError::CyclicInheritance { tactic_id: parent_id.to_string() });
            }
            let parent = self.tactics.get(parent_id).ok_or_else(|| {
                SquadError::MissingParentTactic {
                    tactic_id: current.id.clone(),
                    parent_id: parent_id.to_string(),
                }
            })?;
            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        Ok(chain)
    }

    /// Tactics usable by a team: same squad size, scoped exactly to the team,
    /// its age group or its club. No merging happens here.
    pub fn available_tactics(
        &self,
        team_id: &str,
        age_group_id: &str,
        club_id: &str,
        squad_size: u8,
    ) -> Vec<&'a Tactic> {
        self.tactics
            .tactics()
            .iter()
            .filter(|t| t.squad_size == squad_size)
            .filter(|t| {
                t.scope.matches(ScopeType::Team, team_id)
                    || t.scope.matches(ScopeType::AgeGroup, age_group_id)
                    || t.scope.matches(ScopeType::Club, club_id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryFormationCatalog, InMemoryTacticCatalog};
    use crate::models::TacticScope;

    fn formations() -> InMemoryFormationCatalog {
        InMemoryFormationCatalog::builtin()
    }

    fn age_group_tactic() -> Tactic {
        Tactic::new("age-a", "U12 Shape", TacticScope::age_group("u12"), "9-3-3-2", 9)
            .with_role(
                "CM",
                PositionRole::new("Central Midfielder")
                    .with_duties(["link play"])
                    .with_instructions("Stay between the lines"),
            )
            .with_role("ST", PositionRole::new("Target Forward"))
            .with_relationship("LB", "LM", "overlap", "Full-back overlaps the wide midfielder")
    }

    fn team_tactic() -> Tactic {
        Tactic::new("team-b", "Reds Press", TacticScope::team("reds"), "9-3-3-2", 9)
            .with_parent("age-a")
            .with_role("ST", PositionRole::new("Pressing Forward"))
            .with_relationship("ST", "CM", "cover", "Striker screens the pivot")
    }

    #[test]
    fn test_resolve_without_parent_uses_own_roles_only() {
        let f = formations();
        let t = InMemoryTacticCatalog::new(vec![age_group_tactic()]);
        let resolver = TacticResolver::new(&f, &t);

        let resolved = resolver.resolve(&age_group_tactic()).unwrap();
        assert_eq!(resolved.chain, vec!["age-a".to_string()]);
        assert_eq!(resolved.role_for("CM").unwrap().role, "Central Midfielder");
        assert!(resolved.role_for("GK").is_none());
        assert_eq!(resolved.relationships.len(), 1);
    }

    #[test]
    fn test_leaf_override_wins_and_inherits_rest() {
        let f = formations();
        let t = InMemoryTacticCatalog::new(vec![age_group_tactic(), team_tactic()]);
        let resolver = TacticResolver::new(&f, &t);

        let resolved = resolver.resolve_id("team-b").unwrap();
        assert_eq!(resolved.role_for("ST").unwrap().role, "Pressing Forward");
        assert_eq!(resolved.role_for("CM").unwrap().role, "Central Midfielder");

        // Both ST slots pick up the leaf role.
        let strikers: Vec<_> =
            resolved.positions.iter().filter(|p| p.slot.code == "ST").collect();
        assert_eq!(strikers.len(), 2);
        assert!(strikers.iter().all(|p| p.source_tactic_id.as_deref() == Some("team-b")));

        let cm = resolved.positions.iter().find(|p| p.slot.code == "CM").unwrap();
        assert_eq!(cm.source_tactic_id.as_deref(), Some("age-a"));
    }

    #[test]
    fn test_leaf_override_replaces_role_wholesale() {
        let f = formations();
        let leaf = team_tactic().with_role("CM", PositionRole::new("Box to Box"));
        let t = InMemoryTacticCatalog::new(vec![age_group_tactic(), leaf.clone()]);
        let resolver = TacticResolver::new(&f, &t);

        let inherited = resolver.resolve(&team_tactic()).unwrap();
        let cm = inherited.role_for("CM").unwrap();
        assert_eq!(cm.instructions.as_deref(), Some("Stay between the lines"));

        let resolved = resolver.resolve(&leaf).unwrap();
        let cm = resolved.role_for("CM").unwrap();
        assert_eq!(cm.role, "Box to Box");
        assert!(cm.duties.is_empty());
        assert_eq!(cm.instructions, None);
    }

    #[test]
    fn test_positions_keep_formation_order() {
        let f = formations();
        let t = InMemoryTacticCatalog::new(vec![age_group_tactic(), team_tactic()]);
        let resolver = TacticResolver::new(&f, &t);

        let resolved = resolver.resolve_id("team-b").unwrap();
        let codes: Vec<&str> = resolved.position_codes().collect();
        let base: Vec<&str> = f.get_by_id("9-3-3-2").unwrap().position_codes().collect();
        assert_eq!(codes, base);
    }

    #[test]
    fn test_relationships_concatenate_root_to_leaf() {
        let f = formations();
        let t = InMemoryTacticCatalog::new(vec![age_group_tactic(), team_tactic()]);
        let resolver = TacticResolver::new(&f, &t);

        let resolved = resolver.resolve_id("team-b").unwrap();
        let types: Vec<&str> =
            resolved.relationships.iter().map(|r| r.relationship_type.as_str()).collect();
        assert_eq!(types, vec!["overlap", "cover"]);
    }

    #[test]
    fn test_duplicate_relationships_are_kept() {
        let f = formations();
        let root = age_group_tactic();
        let leaf = team_tactic().with_relationship(
            "LB",
            "LM",
            "overlap",
            "Full-back overlaps the wide midfielder",
        );
        let t = InMemoryTacticCatalog::new(vec![root, leaf.clone()]);
        let resolved = TacticResolver::new(&f, &t).resolve(&leaf).unwrap();
        assert_eq!(resolved.relationships.len(), 3);
        assert_eq!(resolved.relationships[0], resolved.relationships[2]);
    }

    #[test]
    fn test_three_level_chain() {
        let f = formations();
        let club = Tactic::new("club", "Club Way", TacticScope::club("fc"), "9-3-3-2", 9)
            .with_role("GK", PositionRole::new("Sweeper Keeper"))
            .with_role("CM", PositionRole::new("Deep Playmaker"));
        let age = age_group_tactic().with_parent("club");
        let team = team_tactic();
        let t = InMemoryTacticCatalog::new(vec![club, age, team]);
        let resolver = TacticResolver::new(&f, &t);

        let resolved = resolver.resolve_id("team-b").unwrap();
        assert_eq!(resolved.chain, vec!["club", "age-a", "team-b"]);
        assert_eq!(resolved.role_for("GK").unwrap().role, "Sweeper Keeper");
        assert_eq!(resolved.role_for("CM").unwrap().role, "Central Midfielder");
        assert_eq!(resolved.role_for("ST").unwrap().role, "Pressing Forward");
        assert!(resolved.role_for("LB").is_none());
    }

    #[test]
    fn test_cycle_is_detected() {
        let f = formations();
        let a = age_group_tactic().with_parent("team-b");
        let b = team_tactic();
        let t = InMemoryTacticCatalog::new(vec![a, b]);
        let resolver = TacticResolver::new(&f, &t);

        assert!(matches!(
            resolver.resolve_id("team-b"),
            Err(SquadError::CyclicInheritance { .. })
        ));
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let f = formations();
        let a = age_group_tactic().with_parent("age-a");
        let t = InMemoryTacticCatalog::new(vec![a.clone()]);
        assert_eq!(
            TacticResolver::new(&f, &t).resolve(&a).unwrap_err(),
            SquadError::CyclicInheritance { tactic_id: "age-a".into() }
        );
    }

    #[test]
    fn test_missing_parent() {
        let f = formations();
        let t = InMemoryTacticCatalog::new(vec![team_tactic()]);
        assert_eq!(
            TacticResolver::new(&f, &t).resolve_id("team-b").unwrap_err(),
            SquadError::MissingParentTactic { tactic_id: "team-b".into(), parent_id: "age-a".into() }
        );
    }

    #[test]
    fn test_missing_formation() {
        let f = formations();
        let mut tactic = age_group_tactic();
        tactic.parent_formation_id = "9-9-9".into();
        let t = InMemoryTacticCatalog::default();
        assert_eq!(
            TacticResolver::new(&f, &t).resolve(&tactic).unwrap_err(),
            SquadError::MissingFormation { formation_id: "9-9-9".into() }
        );
    }

    #[test]
    fn test_squad_size_must_match_formation() {
        let f = formations();
        let mut tactic = age_group_tactic();
        tactic.squad_size = 11;
        let t = InMemoryTacticCatalog::default();
        assert_eq!(
            TacticResolver::new(&f, &t).resolve(&tactic).unwrap_err(),
            SquadError::MismatchedSquadSize { expected: 9, found: 11 }
        );
    }

    #[test]
    fn test_available_tactics_filters_scope_and_size() {
        let f = formations();
        let t = InMemoryTacticCatalog::new(vec![
            Tactic::new("club", "Club", TacticScope::club("fc"), "9-3-3-2", 9),
            Tactic::new("club-11", "Club 11s", TacticScope::club("fc"), "11-4-4-2", 11),
            Tactic::new("u12", "U12", TacticScope::age_group("u12"), "9-3-3-2", 9),
            Tactic::new("u14", "U14", TacticScope::age_group("u14"), "9-3-3-2", 9),
            Tactic::new("reds", "Reds", TacticScope::team("reds"), "9-2-4-2", 9),
            Tactic::new("blues", "Blues", TacticScope::team("blues"), "9-2-4-2", 9),
            Tactic::new("other", "Other", TacticScope::club("rivals"), "9-3-3-2", 9),
        ]);
        let resolver = TacticResolver::new(&f, &t);

        let ids: Vec<&str> = resolver
            .available_tactics("reds", "u12", "fc", 9)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["club", "u12", "reds"]);
    }

    #[test]
    fn test_available_tactics_does_not_confuse_scope_types() {
        let f = formations();
        // A team whose id equals the club id must not pull in the club-scoped
        // tactic of a different club through the team filter.
        let t = InMemoryTacticCatalog::new(vec![Tactic::new(
            "x",
            "X",
            TacticScope::club("reds"),
            "9-3-3-2",
            9,
        )]);
        let resolver = TacticResolver::new(&f, &t);
        assert!(resolver.available_tactics("reds", "u12", "fc", 9).is_empty());
    }
}
