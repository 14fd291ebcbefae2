// Scorebook Schema - Shared type definitions
// This crate contains the closed vocabularies (pitch marks, outcomes, segment
// kinds) shared by the scoring engine, its stores and its tool server.

// Re-export the main types
pub use pitch_types::*;
pub use run_types::*;
pub use strum::IntoEnumIterator;

pub mod pitch_types;
pub mod run_types;
