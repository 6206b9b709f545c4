//! Squad CLI Library
//!
//! Report builders behind the `squad` binary. Each takes an already loaded
//! catalog and returns printable text so the binary stays a thin dispatcher.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use squad_core::{
    CatalogBundle, EngineConfig, FormationCatalog, PlayerDirectory, RatingAggregator,
    TacticResolver,
};

/// Catalog file, or an empty bundle (built-in formations only) when absent.
pub fn load_catalog(path: Option<&Path>) -> Result<CatalogBundle> {
    match path {
        Some(path) => CatalogBundle::load(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display())),
        None => Ok(CatalogBundle::default()),
    }
}

/// Explicit config file, else `SQUAD_CONFIG_PATH`, else defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => EngineConfig::from_env().context("Failed to load config from environment"),
    }
}

pub fn formations_report(bundle: &CatalogBundle, squad_size: Option<u8>) -> String {
    let catalog = bundle.formation_catalog();
    let formations = match squad_size {
        Some(size) => catalog.list_by_squad_size(size),
        None => catalog.formations().iter().collect(),
    };

    let mut out = String::new();
    for f in formations {
        let codes: Vec<&str> = f.position_codes().collect();
        let _ = writeln!(out, "{:<12} {:>2}  {:<16} {}", f.id, f.squad_size, f.name, codes.join(" "));
    }
    out
}

pub fn resolve_report(bundle: &CatalogBundle, tactic_id: &str) -> Result<String> {
    let formations = bundle.formation_catalog();
    let tactics = bundle.tactic_catalog();
    let resolved = TacticResolver::new(&formations, &tactics)
        .resolve_id(tactic_id)
        .with_context(|| format!("Failed to resolve tactic {tactic_id}"))?;
    Ok(serde_json::to_string_pretty(&resolved)?)
}

pub fn tactics_report(
    bundle: &CatalogBundle,
    team_id: &str,
    age_group_id: &str,
    club_id: &str,
    squad_size: u8,
) -> String {
    let formations = bundle.formation_catalog();
    let tactics = bundle.tactic_catalog();
    let resolver = TacticResolver::new(&formations, &tactics);

    let mut out = String::new();
    for t in resolver.available_tactics(team_id, age_group_id, club_id, squad_size) {
        let _ = writeln!(
            out,
            "{:<16} {:<10} {:<12} {}",
            t.id,
            t.scope.scope_type.to_string(),
            t.parent_formation_id,
            t.name
        );
    }
    out
}

/// Ratings for `player_ids`, or for every catalog player when empty.
pub fn ratings_report(bundle: &CatalogBundle, player_ids: &[String]) -> Result<String> {
    let directory = bundle.player_directory();
    let players = if player_ids.is_empty() {
        directory.players().collect::<Vec<_>>()
    } else {
        player_ids
            .iter()
            .map(|id| directory.lookup(id).with_context(|| format!("Unknown player: {id}")))
            .collect::<Result<Vec<_>>>()?
    };

    let ratings = RatingAggregator::team_ratings(players);
    let mut out = String::new();
    writeln!(out, "Players:  {}", ratings.player_count)?;
    for (label, value) in [
        ("Overall", ratings.overall),
        ("Skills", ratings.skills),
        ("Physical", ratings.physical),
        ("Mental", ratings.mental),
    ] {
        writeln!(out, "{:<9} {:>2} ({})", format!("{label}:"), value, RatingAggregator::attribute_quality(value))?;
    }
    Ok(out)
}

/// Integrity report; the flag is false when any issue was found.
pub fn validate_report(bundle: &CatalogBundle) -> (bool, String) {
    let issues = bundle.issues();
    if issues.is_empty() {
        let summary = format!(
            "Catalog OK: {} formations, {} tactics, {} players\n",
            bundle.effective_formations().len(),
            bundle.tactics.len(),
            bundle.players.len()
        );
        return (true, summary);
    }

    let mut out = format!("{} catalog issue(s):\n", issues.len());
    for issue in &issues {
        let _ = writeln!(out, "  - {issue}");
    }
    (false, out)
}
