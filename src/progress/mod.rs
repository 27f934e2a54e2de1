//! Progress tracking and derived statistics
//!
//! Read-only aggregation over completed sessions (streaks, averages,
//! improvement trend), per-skill trend records, and the exportable
//! user-data bundle.

mod aggregator;
mod export;

pub use aggregator::{
    compute_overall_stats, compute_overall_stats_at, OverallStats, ProgressAggregator,
    SkillProgressRecord,
};
pub use export::{ExportBundle, Profile};
