//! Tactical overlays applied on top of a formation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Organisational level a tactic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeType {
    Club,
    AgeGroup,
    Team,
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScopeType::Club => "club",
            ScopeType::AgeGroup => "age_group",
            ScopeType::Team => "team",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TacticScope {
    #[serde(rename = "type")]
    pub scope_type: ScopeType,
    pub scope_id: String,
}

impl TacticScope {
    pub fn club(id: impl Into<String>) -> Self {
        Self { scope_type: ScopeType::Club, scope_id: id.into() }
    }

    pub fn age_group(id: impl Into<String>) -> Self {
        Self { scope_type: ScopeType::AgeGroup, scope_id: id.into() }
    }

    pub fn team(id: impl Into<String>) -> Self {
        Self { scope_type: ScopeType::Team, scope_id: id.into() }
    }

    pub fn matches(&self, scope_type: ScopeType, scope_id: &str) -> bool {
        self.scope_type == scope_type && self.scope_id == scope_id
    }
}

/// Role assigned to a position code, with its duties in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRole {
    pub role: String,
    #[serde(default)]
    pub duties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl PositionRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), duties: Vec::new(), instructions: None }
    }

    pub fn with_duties<I, S>(mut self, duties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.duties = duties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// Directed link between two positions (e.g. "overlap", "cover").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from_position: String,
    pub to_position: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tactic {
    pub id: String,
    pub name: String,
    pub scope: TacticScope,
    pub parent_formation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_tactic_id: Option<String>,
    pub squad_size: u8,
    /// Keyed by position code; ordered map keeps serialized output stable.
    #[serde(default)]
    pub position_roles: BTreeMap<String, PositionRole>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Tactic {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scope: TacticScope,
        parent_formation_id: impl Into<String>,
        squad_size: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scope,
            parent_formation_id: parent_formation_id.into(),
            parent_tactic_id: None,
            squad_size,
            position_roles: BTreeMap::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_tactic_id: impl Into<String>) -> Self {
        self.parent_tactic_id = Some(parent_tactic_id.into());
        self
    }

    pub fn with_role(mut self, code: impl Into<String>, role: PositionRole) -> Self {
        self.position_roles.insert(code.into(), role);
        self
    }

    pub fn with_relationship(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        relationship_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.relationships.push(Relationship {
            from_position: from.into(),
            to_position: to.into(),
            relationship_type: relationship_type.into(),
            description: description.into(),
        });
        self
    }
}
