//! Built-in formation templates for the common match formats (5, 7, 9 and 11 a side).
//!
//! Coordinates are normalized to [0, 1]; slots are listed goalkeeper first,
//! then defence, midfield and attack.

use once_cell::sync::Lazy;

use crate::models::{Formation, PositionSlot};

static BUILTIN_FORMATIONS: Lazy<Vec<Formation>> = Lazy::new(|| {
    vec![
        create_5_2_2(),
        create_5_1_2_1(),
        create_7_2_3_1(),
        create_7_3_2_1(),
        create_7_2_1_2_1(),
        create_9_3_3_2(),
        create_9_3_2_3(),
        create_9_2_4_2(),
        create_11_4_4_2(),
        create_11_4_3_3(),
        create_11_4_2_3_1(),
        create_11_3_5_2(),
    ]
});

/// All built-in formations in catalog order (ascending squad size).
pub fn builtin_formations() -> &'static [Formation] {
    &BUILTIN_FORMATIONS
}

fn formation(system: &str, name: &str, positions: Vec<PositionSlot>) -> Formation {
    let squad_size = positions.len() as u8;
    Formation {
        id: format!("{}-{}", squad_size, system),
        name: name.to_string(),
        system: system.to_string(),
        squad_size,
        positions,
    }
}

fn slot(code: &str, x: f32, y: f32) -> PositionSlot {
    PositionSlot::new(code, x, y)
}

// ============================================================================
// 5 a side
// ============================================================================

fn create_5_2_2() -> Formation {
    formation(
        "2-2",
        "2-2 Box",
        vec![
            slot("GK", 0.5, 0.05),
            slot("CB", 0.35, 0.25),
            slot("CB", 0.65, 0.25),
            slot("ST", 0.35, 0.7),
            slot("ST", 0.65, 0.7),
        ],
    )
}

fn create_5_1_2_1() -> Formation {
    formation(
        "1-2-1",
        "1-2-1 Diamond",
        vec![
            slot("GK", 0.5, 0.05),
            slot("CB", 0.5, 0.22),
            slot("LM", 0.25, 0.5),
            slot("RM", 0.75, 0.5),
            slot("ST", 0.5, 0.8),
        ],
    )
}

// ============================================================================
// 7 a side
// ============================================================================

fn create_7_2_3_1() -> Formation {
    formation(
        "2-3-1",
        "2-3-1",
        vec![
            slot("GK", 0.5, 0.05),
            slot("CB", 0.35, 0.22),
            slot("CB", 0.65, 0.22),
            slot("LM", 0.2, 0.5),
            slot("CM", 0.5, 0.5),
            slot("RM", 0.8, 0.5),
            slot("ST", 0.5, 0.8),
        ],
    )
}

fn create_7_3_2_1() -> Formation {
    formation(
        "3-2-1",
        "3-2-1",
        vec![
            slot("GK", 0.5, 0.05),
            slot("LB", 0.25, 0.22),
            slot("CB", 0.5, 0.2),
            slot("RB", 0.75, 0.22),
            slot("CM", 0.38, 0.5),
            slot("CM", 0.62, 0.5),
            slot("ST", 0.5, 0.8),
        ],
    )
}

fn create_7_2_1_2_1() -> Formation {
    formation(
        "2-1-2-1",
        "2-1-2-1 Diamond",
        vec![
            slot("GK", 0.5, 0.05),
            slot("CB", 0.35, 0.22),
            slot("CB", 0.65, 0.22),
            slot("CDM", 0.5, 0.38),
            slot("LM", 0.25, 0.58),
            slot("RM", 0.75, 0.58),
            slot("ST", 0.5, 0.82),
        ],
    )
}

// ============================================================================
// 9 a side
// ============================================================================

fn create_9_3_3_2() -> Formation {
    formation(
        "3-3-2",
        "3-3-2",
        vec![
            slot("GK", 0.5, 0.05),
            slot("LB", 0.25, 0.22),
            slot("CB", 0.5, 0.2),
            slot("RB", 0.75, 0.22),
            slot("LM", 0.2, 0.5),
            slot("CM", 0.5, 0.5),
            slot("RM", 0.8, 0.5),
            slot("ST", 0.38, 0.8),
            slot("ST", 0.62, 0.8),
        ],
    )
}

fn create_9_3_2_3() -> Formation {
    formation(
        "3-2-3",
        "3-2-3",
        vec![
            slot("GK", 0.5, 0.05),
            slot("LB", 0.25, 0.22),
            slot("CB", 0.5, 0.2),
            slot("RB", 0.75, 0.22),
            slot("CM", 0.38, 0.48),
            slot("CM", 0.62, 0.48),
            slot("LW", 0.2, 0.78),
            slot("ST", 0.5, 0.85),
            slot("RW", 0.8, 0.78),
        ],
    )
}

fn create_9_2_4_2() -> Formation {
    formation(
        "2-4-2",
        "2-4-2",
        vec![
            slot("GK", 0.5, 0.05),
            slot("CB", 0.35, 0.2),
            slot("CB", 0.65, 0.2),
            slot("LM", 0.15, 0.5),
            slot("CM", 0.4, 0.48),
            slot("CM", 0.6, 0.48),
            slot("RM", 0.85, 0.5),
            slot("ST", 0.38, 0.8),
            slot("ST", 0.62, 0.8),
        ],
    )
}

// ============================================================================
// 11 a side
// ============================================================================

/// 4-4-2 Standard (Balanced)
fn create_11_4_4_2() -> Formation {
    formation(
        "4-4-2",
        "4-4-2 Flat",
        vec![
            slot("GK", 0.5, 0.05),
            slot("LB", 0.2, 0.2),
            slot("CB", 0.4, 0.2),
            slot("CB", 0.6, 0.2),
            slot("RB", 0.8, 0.2),
            slot("LM", 0.15, 0.5),
            slot("CM", 0.4, 0.5),
            slot("CM", 0.6, 0.5),
            slot("RM", 0.85, 0.5),
            slot("ST", 0.35, 0.8),
            slot("ST", 0.65, 0.8),
        ],
    )
}

/// 4-3-3 (Attacking)
fn create_11_4_3_3() -> Formation {
    formation(
        "4-3-3",
        "4-3-3",
        vec![
            slot("GK", 0.5, 0.05),
            slot("LB", 0.2, 0.2),
            slot("CB", 0.4, 0.2),
            slot("CB", 0.6, 0.2),
            slot("RB", 0.8, 0.2),
            slot("CM", 0.3, 0.45),
            slot("CDM", 0.5, 0.38),
            slot("CM", 0.7, 0.45),
            slot("LW", 0.2, 0.78),
            slot("ST", 0.5, 0.85),
            slot("RW", 0.8, 0.78),
        ],
    )
}

/// 4-2-3-1 (Possession)
fn create_11_4_2_3_1() -> Formation {
    formation(
        "4-2-3-1",
        "4-2-3-1",
        vec![
            slot("GK", 0.5, 0.05),
            slot("LB", 0.2, 0.2),
            slot("CB", 0.4, 0.2),
            slot("CB", 0.6, 0.2),
            slot("RB", 0.8, 0.2),
            slot("CDM", 0.4, 0.38),
            slot("CDM", 0.6, 0.38),
            slot("LM", 0.2, 0.62),
            slot("CAM", 0.5, 0.62),
            slot("RM", 0.8, 0.62),
            slot("ST", 0.5, 0.85),
        ],
    )
}

/// 3-5-2 with wing-backs
fn create_11_3_5_2() -> Formation {
    formation(
        "3-5-2",
        "3-5-2",
        vec![
            slot("GK", 0.5, 0.05),
            slot("CB", 0.3, 0.2),
            slot("CB", 0.5, 0.18),
            slot("CB", 0.7, 0.2),
            slot("LWB", 0.1, 0.45),
            slot("CM", 0.35, 0.5),
            slot("CDM", 0.5, 0.4),
            slot("CM", 0.65, 0.5),
            slot("RWB", 0.9, 0.45),
            slot("ST", 0.4, 0.82),
            slot("ST", 0.6, 0.82),
        ],
    )
}
