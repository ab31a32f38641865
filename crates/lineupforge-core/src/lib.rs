//! LineupForge Core - Domain types for the lineup optimization engine
//!
//! This crate provides the fundamental types shared across the workspace:
//! - Slot plans describing a sport's fixed roster positions
//! - Raw player records, per-user overrides, and the pool builder
//! - Run settings and their validation
//! - Output-contract types (lineups, exposure report, run result)
//! - The engine error taxonomy

pub mod error;
pub mod nba;
pub mod player;
pub mod report;
pub mod settings;
pub mod slot;

pub use error::{EngineError, Result};
pub use player::{build_pool, PlayerCandidate, PlayerId, PlayerOverride, RawPlayer};
pub use report::{Lineup, LineupPlayer, LineupSlot, PlayerExposure, RunResult};
pub use settings::OptimizationSettings;
pub use slot::{Slot, SlotId, SlotPlan};
