use super::aggregator::{OverallStats, SkillProgressRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile as supplied by the identity/persistence collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Downloadable user-data bundle. The only persisted artifact format
/// this core defines; it round-trips through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub profile: Profile,
    pub skill_progress: Vec<SkillProgressRecord>,
    pub overall_stats: OverallStats,
    pub export_date: DateTime<Utc>,
}

impl ExportBundle {
    pub fn new(
        profile: Profile,
        skill_progress: Vec<SkillProgressRecord>,
        overall_stats: OverallStats,
    ) -> Self {
        Self {
            profile,
            skill_progress,
            overall_stats,
            export_date: Utc::now(),
        }
    }

    /// Download file name, dated by the export day.
    pub fn file_name(&self) -> String {
        format!("prepmaster-data-{}.json", self.export_date.date_naive())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
