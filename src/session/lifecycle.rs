use super::config::SessionConfig;
use super::model::{Difficulty, ExperienceLevel, Question, Session, SessionStatus, SessionType};
use crate::error::{Error, Result};
use crate::feedback::{AIFeedback, FeedbackClient};
use crate::store::{IdentityProvider, NewQuestion, NewSession, SessionStore, SessionUpdate};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// The session held in memory while the user works through it.
struct ActiveSession {
    session: Session,
    questions: Vec<Question>,
    cursor: usize,
}

/// Owner of the in-memory view of "the current session" and sole writer
/// of Session/Question status fields.
///
/// Holds at most one session at a time; creating a new one replaces any
/// previously held session and question set.
pub struct SessionLifecycle {
    store: Option<Arc<dyn SessionStore>>,
    feedback: FeedbackClient,
    identity: Arc<dyn IdentityProvider>,
    active: Option<ActiveSession>,
}

impl SessionLifecycle {
    pub fn new(
        store: Option<Arc<dyn SessionStore>>,
        feedback: FeedbackClient,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            store,
            feedback,
            identity,
            active: None,
        }
    }

    fn store(&self) -> Result<&Arc<dyn SessionStore>> {
        self.store.as_ref().ok_or(Error::BackendUnavailable)
    }

    /// Persist a new session in `setup`, generate its questions and load
    /// everything as the current session.
    pub async fn create_session(&mut self, config: SessionConfig) -> Result<Session> {
        let user = self.identity.current_user().ok_or(Error::AuthRequired)?;
        let store = self.store()?.clone();

        info!("creating {} session for user {}", config_kind(&config), user.id);

        let session = store
            .insert_session(NewSession {
                user_id: user.id,
                session_type: config.session_type,
                title: config.title.clone(),
                role: config.role.clone(),
                industry: config.industry.clone(),
                experience_level: config.experience_level,
                difficulty: config.difficulty.unwrap_or_default(),
                duration_minutes: config.duration_minutes,
                job_description: config.job_description.clone(),
            })
            .await?;

        // Question generation never surfaces an AI failure; the client
        // falls back to the fixed pool internally.
        let generation = self
            .feedback
            .generate_questions(
                config.role.as_deref().unwrap_or("General"),
                config.industry.as_deref().unwrap_or("General"),
                config.experience_level.unwrap_or(ExperienceLevel::Mid),
                config.difficulty.unwrap_or(Difficulty::Medium),
                config.question_count(),
            )
            .await;

        let to_insert = generation
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, q)| NewQuestion {
                session_id: session.id.clone(),
                question: q.question,
                category: q.category,
                difficulty: q.difficulty,
                expected_structure: Some(q.expected_structure),
                tips: Some(q.tips),
                order_index: index as u32,
            })
            .collect();

        let questions = store.insert_questions(to_insert).await?;

        info!(
            "session {} created with {} questions",
            session.id,
            questions.len()
        );

        self.active = Some(ActiveSession {
            session: session.clone(),
            questions,
            cursor: 0,
        });

        Ok(session)
    }

    /// Move a session from `setup` to `in_progress`, recording the start
    /// time. Starting an already-started (or completed) session fails
    /// with `AlreadyStarted`; `started_at` is never overwritten.
    pub async fn start_session(&mut self, id: &str) -> Result<()> {
        let store = self.store()?.clone();

        let status = match &self.active {
            Some(active) if active.session.id == id => active.session.status,
            _ => store
                .get_session(id)
                .await?
                .ok_or_else(|| Error::SessionNotFound(id.to_string()))?
                .status,
        };

        if status != SessionStatus::Setup {
            return Err(Error::AlreadyStarted);
        }

        let started_at = Utc::now();
        store
            .update_session(
                id,
                SessionUpdate {
                    status: Some(SessionStatus::InProgress),
                    started_at: Some(started_at),
                    ..Default::default()
                },
            )
            .await?;

        if let Some(active) = self.active.as_mut() {
            if active.session.id == id {
                active.session.status = SessionStatus::InProgress;
                active.session.started_at = Some(started_at);
            }
        }

        info!("session {} started", id);
        Ok(())
    }

    /// Analyze an answer, persist all answered fields onto the question
    /// and return the feedback.
    pub async fn submit_answer(
        &mut self,
        question_id: &str,
        answer: &str,
        time_taken_secs: u32,
    ) -> Result<AIFeedback> {
        let store = self.store()?.clone();
        let active = self.active.as_mut().ok_or(Error::NoActiveSession)?;

        let question = active
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| Error::QuestionNotFound(question_id.to_string()))?;

        let feedback = self
            .feedback
            .analyze_answer(&question.question, answer, question.category)
            .await;

        store
            .update_question_answer(question_id, answer, &feedback, time_taken_secs)
            .await?;

        question.record_answer(answer.to_string(), feedback.clone(), time_taken_secs);

        info!(
            "answer recorded for question {} (score {})",
            question_id, feedback.score
        );

        Ok(feedback)
    }

    /// Close out the current session: the overall score is the rounded
    /// mean over answered questions, 0 when none were answered.
    ///
    /// Only an `in_progress` session can be completed; a session still
    /// in `setup` fails with `NotStarted`. Completing an
    /// already-completed session is a no-op returning the stored score;
    /// status never regresses.
    pub async fn complete_session(&mut self) -> Result<u8> {
        let store = self.store()?.clone();
        let active = self.active.as_mut().ok_or(Error::NoActiveSession)?;

        if active.session.status == SessionStatus::Completed {
            warn!("session {} already completed", active.session.id);
            return Ok(active.session.overall_score.unwrap_or(0));
        }
        if active.session.status == SessionStatus::Setup {
            return Err(Error::NotStarted);
        }

        let scores: Vec<u8> = active.questions.iter().filter_map(|q| q.score).collect();
        let overall_score = if scores.is_empty() {
            0
        } else {
            let sum: u32 = scores.iter().map(|&s| s as u32).sum();
            (sum as f64 / scores.len() as f64).round() as u8
        };

        let completed_at = Utc::now();
        store
            .update_session(
                &active.session.id,
                SessionUpdate {
                    status: Some(SessionStatus::Completed),
                    completed_at: Some(completed_at),
                    overall_score: Some(overall_score),
                    ..Default::default()
                },
            )
            .await?;

        active.session.status = SessionStatus::Completed;
        active.session.completed_at = Some(completed_at);
        active.session.overall_score = Some(overall_score);

        info!(
            "session {} completed with overall score {}",
            active.session.id, overall_score
        );

        Ok(overall_score)
    }

    /// Advance the question cursor; silent no-op at the last question.
    pub fn next_question(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if active.cursor + 1 < active.questions.len() {
                active.cursor += 1;
            }
        }
    }

    /// Move the question cursor back; silent no-op at the first question.
    pub fn previous_question(&mut self) {
        if let Some(active) = self.active.as_mut() {
            if active.cursor > 0 {
                active.cursor -= 1;
            }
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        let active = self.active.as_ref()?;
        active.questions.get(active.cursor)
    }

    /// Progress through the question list as a percentage, 0 when no
    /// questions are loaded.
    pub fn progress(&self) -> f32 {
        match &self.active {
            Some(active) if !active.questions.is_empty() => {
                (active.cursor as f32 + 1.0) / active.questions.len() as f32 * 100.0
            }
            _ => 0.0,
        }
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn questions(&self) -> &[Question] {
        self.active.as_ref().map(|a| a.questions.as_slice()).unwrap_or(&[])
    }

    pub fn cursor(&self) -> usize {
        self.active.as_ref().map(|a| a.cursor).unwrap_or(0)
    }

    pub fn feedback_client(&self) -> &FeedbackClient {
        &self.feedback
    }
}

fn config_kind(config: &SessionConfig) -> &'static str {
    match config.session_type {
        SessionType::Practice => "practice",
        SessionType::Mock => "mock",
    }
}
