use crate::feedback::AIFeedback;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Practice,
    Mock,
}

/// Session status. Transitions only move forward:
/// setup -> in_progress -> completed, with completed terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Setup,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Behavioral,
    Technical,
    Situational,
    General,
    Closing,
}

impl QuestionCategory {
    /// Label used as the skill area key in progress tracking.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Behavioral => "behavioral",
            QuestionCategory::Technical => "technical",
            QuestionCategory::Situational => "situational",
            QuestionCategory::General => "general",
            QuestionCategory::Closing => "closing",
        }
    }
}

/// One practice/mock interview attempt, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,

    #[serde(rename = "type")]
    pub session_type: SessionType,

    pub title: String,
    pub role: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub difficulty: Difficulty,

    /// Configured interview length in minutes
    pub duration_minutes: u32,

    pub job_description: Option<String>,
    pub status: SessionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Rounded mean of answered-question scores, set only at completion
    pub overall_score: Option<u8>,
}

/// One interview prompt within a session, with its eventual answer.
///
/// The answered fields (`answer`, `score`, `feedback`, `time_taken_secs`)
/// are all-or-nothing: they are only ever written together through
/// `record_answer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub session_id: String,
    pub question: String,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
    pub expected_structure: Option<String>,
    pub tips: Option<String>,

    /// 0-based presentation order, stable after creation
    pub order_index: u32,

    pub answer: Option<String>,
    pub score: Option<u8>,
    pub feedback: Option<AIFeedback>,
    pub time_taken_secs: Option<u32>,
}

impl Question {
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    /// Set all answered fields in one step.
    pub fn record_answer(&mut self, answer: String, feedback: AIFeedback, time_taken_secs: u32) {
        self.score = Some(feedback.score);
        self.answer = Some(answer);
        self.feedback = Some(feedback);
        self.time_taken_secs = Some(time_taken_secs);
    }
}
