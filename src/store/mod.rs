//! External collaborator contracts
//!
//! Persistence and identity are delegated to external services; the core
//! only depends on these traits. `MemoryStore` is the in-process
//! implementation used by the demo binary and the test suite.

mod identity;
mod memory;

pub use identity::{IdentityProvider, StaticIdentity, UserIdentity};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::feedback::AIFeedback;
use crate::progress::SkillProgressRecord;
use crate::session::{
    Difficulty, ExperienceLevel, Question, QuestionCategory, Session, SessionStatus, SessionType,
};
use chrono::{DateTime, Utc};

/// Insert shape for a session row; the store generates the id.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: String,
    pub session_type: SessionType,
    pub title: String,
    pub role: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    pub job_description: Option<String>,
}

/// Insert shape for a question row; the store generates the id.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub session_id: String,
    pub question: String,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
    pub expected_structure: Option<String>,
    pub tips: Option<String>,
    pub order_index: u32,
}

/// Field-level update for session lifecycle transitions.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub status: Option<SessionStatus>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub overall_score: Option<u8>,
}

/// CRUD over Session and Question collections.
///
/// Storage failures map to `Error::Persistence`; a missing row is an
/// `Ok(None)` / empty result, never an error.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, new: NewSession) -> Result<Session>;

    async fn get_session(&self, id: &str) -> Result<Option<Session>>;

    /// Sessions belonging to a user, most recently completed first.
    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<Session>>;

    async fn update_session(&self, id: &str, update: SessionUpdate) -> Result<()>;

    async fn insert_questions(&self, new: Vec<NewQuestion>) -> Result<Vec<Question>>;

    /// Questions of a session in `order_index` order.
    async fn questions_for_session(&self, session_id: &str) -> Result<Vec<Question>>;

    /// Write all answered fields of a question in one step.
    async fn update_question_answer(
        &self,
        id: &str,
        answer: &str,
        feedback: &AIFeedback,
        time_taken_secs: u32,
    ) -> Result<()>;
}

/// CRUD over per-skill progress records, keyed by (user_id, skill_area).
#[async_trait::async_trait]
pub trait ProgressStore: Send + Sync {
    async fn get_skill(&self, user_id: &str, skill_area: &str)
        -> Result<Option<SkillProgressRecord>>;

    async fn skills_for_user(&self, user_id: &str) -> Result<Vec<SkillProgressRecord>>;

    /// Insert or replace the record for `(record.user_id, record.skill_area)`.
    async fn upsert_skill(&self, record: SkillProgressRecord) -> Result<()>;
}
