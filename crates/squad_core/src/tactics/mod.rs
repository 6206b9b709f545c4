// Tactic resolution: scoped inheritance chains merged onto a base formation

pub mod resolver;

pub use resolver::{ResolvedPosition, ResolvedTactic, TacticResolver};
