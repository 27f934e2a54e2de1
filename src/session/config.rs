use super::model::{Difficulty, ExperienceLevel, SessionType};
use serde::{Deserialize, Serialize};

/// Caller-supplied configuration for a new interview session.
///
/// Consumed once by `SessionLifecycle::create_session`; never persisted
/// on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(rename = "type")]
    pub session_type: SessionType,

    pub title: String,
    pub role: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub difficulty: Option<Difficulty>,

    /// Planned interview length in minutes
    pub duration_minutes: u32,

    pub job_description: Option<String>,
}

impl SessionConfig {
    /// Number of questions to generate: one per ~6 minutes of interview
    /// time, never fewer than one.
    pub fn question_count(&self) -> usize {
        (self.duration_minutes.div_ceil(6)).max(1) as usize
    }
}
