use thiserror::Error;

/// Business-rule failures raised by the engine.
///
/// The set is closed: every engine operation either succeeds or fails with
/// exactly one of these kinds. Catalog and configuration loading report
/// through their own error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquadError {
    #[error("Formation not found: {formation_id}")]
    MissingFormation { formation_id: String },

    #[error("Tactic {tactic_id} references unknown parent tactic {parent_id}")]
    MissingParentTactic { tactic_id: String, parent_id: String },

    #[error("Cyclic tactic inheritance detected at {tactic_id}")]
    CyclicInheritance { tactic_id: String },

    #[error("Player {player_id} is already selected")]
    AlreadySelected { player_id: String },

    #[error("Starting lineup is full ({squad_size} players)")]
    CapacityExceeded { squad_size: u8 },

    #[error("Squad size mismatch: expected {expected}, found {found}")]
    MismatchedSquadSize { expected: usize, found: usize },

    #[error("Match record is locked")]
    RecordLocked,

    #[error("Match record is incomplete: {reason}")]
    IncompleteRecord { reason: String },
}

impl SquadError {
    /// Stable machine-readable code, used in API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            SquadError::MissingFormation { .. } => "MISSING_FORMATION",
            SquadError::MissingParentTactic { .. } => "MISSING_PARENT_TACTIC",
            SquadError::CyclicInheritance { .. } => "CYCLIC_INHERITANCE",
            SquadError::AlreadySelected { .. } => "ALREADY_SELECTED",
            SquadError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            SquadError::MismatchedSquadSize { .. } => "MISMATCHED_SQUAD_SIZE",
            SquadError::RecordLocked => "RECORD_LOCKED",
            SquadError::IncompleteRecord { .. } => "INCOMPLETE_RECORD",
        }
    }

    /// Errors caused by catalog data rather than by the caller's edit.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            SquadError::MissingFormation { .. }
                | SquadError::MissingParentTactic { .. }
                | SquadError::CyclicInheritance { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SquadError>;
