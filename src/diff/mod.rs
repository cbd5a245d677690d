//! Diff engine - Presence comparison and plan generation

mod engine;
mod plan;

pub use engine::{PlanStats, SyncPlan};
pub use plan::generate_sync_plan;
