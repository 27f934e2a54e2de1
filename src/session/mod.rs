//! Interview session lifecycle
//!
//! This module provides the session/question data model and the
//! `SessionLifecycle` component that owns:
//! - Session creation (config -> generated questions -> persisted rows)
//! - Status transitions (setup -> in_progress -> completed)
//! - Answer submission and feedback persistence
//! - The current-question cursor and progress reporting

mod config;
mod lifecycle;
mod model;

pub use config::SessionConfig;
pub use lifecycle::SessionLifecycle;
pub use model::{
    Difficulty, ExperienceLevel, Question, QuestionCategory, Session, SessionStatus, SessionType,
};
