//! Catalog documents loaded from JSON or YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::{
    builtin_formations, InMemoryFormationCatalog, InMemoryPlayerDirectory, InMemorySquadNumbers,
    InMemoryTacticCatalog, SquadNumberEntry,
};
use crate::config::is_yaml;
use crate::models::{Formation, Player, Tactic};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Formation {formation_id} declares squad size {squad_size} but lists {slot_count} slots")]
    FormationSizeMismatch { formation_id: String, squad_size: u8, slot_count: usize },

    #[error("Tactic {tactic_id} references unknown formation {formation_id}")]
    UnknownFormation { tactic_id: String, formation_id: String },

    #[error("Tactic {tactic_id} references unknown parent tactic {parent_id}")]
    UnknownParentTactic { tactic_id: String, parent_id: String },

    #[error(
        "Tactic {tactic_id} has squad size {tactic_size} but formation {formation_id} has {formation_size}"
    )]
    SquadSizeMismatch {
        tactic_id: String,
        formation_id: String,
        tactic_size: u8,
        formation_size: u8,
    },

    #[error("Player {player_id} attribute {attribute} exceeds 99")]
    AttributeOutOfRange { player_id: String, attribute: &'static str },
}

/// Everything the engine reads, as one serializable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogBundle {
    /// Empty means "use the built-in formations".
    #[serde(default)]
    pub formations: Vec<Formation>,
    #[serde(default)]
    pub tactics: Vec<Tactic>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub squad_numbers: Vec<SquadNumberEntry>,
}

impl CatalogBundle {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a bundle, choosing YAML for `.yaml`/`.yml` files and JSON otherwise.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.display().to_string(), source })?;

        let bundle =
            if is_yaml(path) { Self::from_yaml(&content)? } else { Self::from_json(&content)? };
        debug!(
            path = %path.display(),
            formations = bundle.formations.len(),
            tactics = bundle.tactics.len(),
            players = bundle.players.len(),
            "catalog loaded"
        );
        Ok(bundle)
    }

    /// Formations actually in effect (the built-in set when none were supplied).
    pub fn effective_formations(&self) -> Vec<Formation> {
        if self.formations.is_empty() {
            builtin_formations().to_vec()
        } else {
            self.formations.clone()
        }
    }

    pub fn formation_catalog(&self) -> InMemoryFormationCatalog {
        InMemoryFormationCatalog::new(self.effective_formations())
    }

    pub fn tactic_catalog(&self) -> InMemoryTacticCatalog {
        InMemoryTacticCatalog::new(self.tactics.clone())
    }

    pub fn player_directory(&self) -> InMemoryPlayerDirectory {
        InMemoryPlayerDirectory::new(self.players.iter().cloned())
    }

    pub fn squad_numbers(&self) -> InMemorySquadNumbers {
        InMemorySquadNumbers::new(self.squad_numbers.iter().cloned())
    }

    /// All integrity problems found in the bundle, in discovery order.
    pub fn issues(&self) -> Vec<CatalogError> {
        let mut issues = Vec::new();
        let formations = self.effective_formations();

        let mut seen = HashSet::new();
        for f in &formations {
            if !seen.insert(f.id.as_str()) {
                issues.push(CatalogError::DuplicateId { kind: "formation", id: f.id.clone() });
            }
            if !f.is_consistent() {
                issues.push(CatalogError::FormationSizeMismatch {
                    formation_id: f.id.clone(),
                    squad_size: f.squad_size,
                    slot_count: f.positions.len(),
                });
            }
        }

        let mut seen = HashSet::new();
        for t in &self.tactics {
            if !seen.insert(t.id.as_str()) {
                issues.push(CatalogError::DuplicateId { kind: "tactic", id: t.id.clone() });
            }
        }

        for t in &self.tactics {
            match formations.iter().find(|f| f.id == t.parent_formation_id) {
                None => issues.push(CatalogError::UnknownFormation {
                    tactic_id: t.id.clone(),
                    formation_id: t.parent_formation_id.clone(),
                }),
                Some(f) if f.squad_size != t.squad_size => {
                    issues.push(CatalogError::SquadSizeMismatch {
                        tactic_id: t.id.clone(),
                        formation_id: f.id.clone(),
                        tactic_size: t.squad_size,
                        formation_size: f.squad_size,
                    })
                }
                Some(_) => {}
            }

            if let Some(parent) = &t.parent_tactic_id {
                if !self.tactics.iter().any(|p| &p.id == parent) {
                    issues.push(CatalogError::UnknownParentTactic {
                        tactic_id: t.id.clone(),
                        parent_id: parent.clone(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for p in &self.players {
            if !seen.insert(p.id.as_str()) {
                issues.push(CatalogError::DuplicateId { kind: "player", id: p.id.clone() });
            }
            for attribute in p.attributes.out_of_range() {
                issues.push(CatalogError::AttributeOutOfRange { player_id: p.id.clone(), attribute });
            }
        }

        for issue in &issues {
            warn!("catalog issue: {}", issue);
        }
        issues
    }

    /// Fails with the first integrity problem, if any.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self.issues().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
