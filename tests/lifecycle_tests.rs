// Integration tests for the session lifecycle state machine:
// creation, start guard, answer submission, completion scoring and the
// question cursor.

use anyhow::Result;
use prepmaster::error::Error;
use prepmaster::feedback::{CompletionBackend, CompletionParams, FeedbackClient, OpenAiBackend};
use prepmaster::session::{SessionConfig, SessionLifecycle, SessionStatus, SessionType};
use prepmaster::store::{MemoryStore, SessionStore, StaticIdentity};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Completion backend replaying canned responses, one per call.
struct ScriptedBackend {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedBackend {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
        }
    }
}

#[async_trait::async_trait]
impl CompletionBackend for ScriptedBackend {
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _params: CompletionParams,
    ) -> prepmaster::Result<String> {
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| Error::RequestFailed("script exhausted".to_string()))
    }
}

fn practice_config(duration_minutes: u32) -> SessionConfig {
    SessionConfig {
        session_type: SessionType::Practice,
        title: "Practice run".to_string(),
        role: Some("Software Engineer".to_string()),
        industry: Some("Technology".to_string()),
        experience_level: None,
        difficulty: None,
        duration_minutes,
        job_description: None,
    }
}

/// Lifecycle wired to a fresh in-memory store and the offline (mock)
/// feedback client.
fn offline_lifecycle(store: &MemoryStore) -> SessionLifecycle {
    let feedback = FeedbackClient::new(Arc::new(OpenAiBackend::offline()));
    SessionLifecycle::new(
        Some(Arc::new(store.clone())),
        feedback,
        Arc::new(StaticIdentity::new("user-1", "user-1@example.com")),
    )
}

fn scripted_lifecycle(store: &MemoryStore, responses: Vec<&str>) -> SessionLifecycle {
    let feedback = FeedbackClient::new(Arc::new(ScriptedBackend::new(responses)));
    SessionLifecycle::new(
        Some(Arc::new(store.clone())),
        feedback,
        Arc::new(StaticIdentity::new("user-1", "user-1@example.com")),
    )
}

const THREE_QUESTIONS: &str = r#"{
  "questions": [
    {"question": "Q1", "category": "behavioral", "difficulty": "medium", "expectedStructure": "STAR", "tips": "t1"},
    {"question": "Q2", "category": "technical", "difficulty": "medium", "expectedStructure": "Technical", "tips": "t2"},
    {"question": "Q3", "category": "general", "difficulty": "easy", "expectedStructure": "Examples", "tips": "t3"}
  ]
}"#;

fn feedback_json(score: u8) -> String {
    format!(
        r#"{{"score": {score}, "starCompliance": 85, "confidence": 80, "clarity": 82,
            "strengths": ["s"], "improvements": ["i"], "suggestions": ["g"],
            "detailedAnalysis": "fine"}}"#
    )
}

#[tokio::test]
async fn create_session_generates_one_question_per_six_minutes() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let session = lifecycle.create_session(practice_config(24)).await?;

    assert_eq!(session.status, SessionStatus::Setup);
    assert_eq!(lifecycle.questions().len(), 4, "ceil(24 / 6) questions");

    let order: Vec<u32> = lifecycle.questions().iter().map(|q| q.order_index).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);

    assert_eq!(lifecycle.cursor(), 0);
    assert_eq!(lifecycle.progress(), 25.0);

    // Persisted rows match the in-memory view
    let stored = store.questions_for_session(&session.id).await?;
    assert_eq!(stored.len(), 4);
    assert!(stored.iter().all(|q| !q.is_answered()));

    Ok(())
}

#[tokio::test]
async fn short_session_still_gets_one_question() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    lifecycle.create_session(practice_config(3)).await?;
    assert_eq!(lifecycle.questions().len(), 1);

    Ok(())
}

#[tokio::test]
async fn progress_at_second_question_of_four_is_fifty() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    lifecycle.create_session(practice_config(24)).await?;
    lifecycle.next_question();

    assert_eq!(lifecycle.cursor(), 1);
    assert_eq!(lifecycle.progress(), 50.0);

    Ok(())
}

#[tokio::test]
async fn cursor_clamps_at_both_bounds() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    lifecycle.create_session(practice_config(24)).await?;

    lifecycle.previous_question();
    assert_eq!(lifecycle.cursor(), 0, "previous at first question is a no-op");

    for _ in 0..10 {
        lifecycle.next_question();
    }
    assert_eq!(lifecycle.cursor(), 3, "cursor never passes the last question");
    assert_eq!(lifecycle.progress(), 100.0);

    lifecycle.next_question();
    assert_eq!(lifecycle.cursor(), 3);

    Ok(())
}

#[tokio::test]
async fn progress_without_session_is_zero() {
    let store = MemoryStore::new();
    let lifecycle = offline_lifecycle(&store);

    assert_eq!(lifecycle.progress(), 0.0);
    assert!(lifecycle.current_question().is_none());
}

#[tokio::test]
async fn create_requires_an_authenticated_user() {
    let store = MemoryStore::new();
    let feedback = FeedbackClient::new(Arc::new(OpenAiBackend::offline()));
    let mut lifecycle = SessionLifecycle::new(
        Some(Arc::new(store)),
        feedback,
        Arc::new(StaticIdentity::anonymous()),
    );

    let err = lifecycle.create_session(practice_config(12)).await.unwrap_err();
    assert!(matches!(err, Error::AuthRequired));
}

#[tokio::test]
async fn create_requires_a_configured_store() {
    let feedback = FeedbackClient::new(Arc::new(OpenAiBackend::offline()));
    let mut lifecycle = SessionLifecycle::new(
        None,
        feedback,
        Arc::new(StaticIdentity::new("user-1", "user-1@example.com")),
    );

    let err = lifecycle.create_session(practice_config(12)).await.unwrap_err();
    assert!(matches!(err, Error::BackendUnavailable));
}

#[tokio::test]
async fn starting_twice_is_rejected() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let session = lifecycle.create_session(practice_config(12)).await?;
    lifecycle.start_session(&session.id).await?;

    let current = lifecycle.current_session().unwrap();
    assert_eq!(current.status, SessionStatus::InProgress);
    let first_started_at = current.started_at.unwrap();

    let err = lifecycle.start_session(&session.id).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyStarted));

    // started_at was not overwritten
    assert_eq!(
        lifecycle.current_session().unwrap().started_at.unwrap(),
        first_started_at
    );

    Ok(())
}

#[tokio::test]
async fn starting_unknown_session_is_not_found() {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let err = lifecycle.start_session("missing-id").await.unwrap_err();
    assert!(matches!(err, Error::SessionNotFound(_)));
}

#[tokio::test]
async fn submitted_answer_sets_all_answered_fields_together() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let session = lifecycle.create_session(practice_config(6)).await?;
    lifecycle.start_session(&session.id).await?;

    let question_id = lifecycle.current_question().unwrap().id.clone();
    let feedback = lifecycle
        .submit_answer(&question_id, "The situation required fast action.", 42)
        .await?;

    let question = lifecycle.current_question().unwrap();
    assert_eq!(question.answer.as_deref(), Some("The situation required fast action."));
    assert_eq!(question.score, Some(feedback.score));
    assert!(question.feedback.is_some());
    assert_eq!(question.time_taken_secs, Some(42));

    // The persisted row carries the same answered fields
    let stored = store.questions_for_session(&session.id).await?;
    let stored_q = stored.iter().find(|q| q.id == question_id).unwrap();
    assert!(stored_q.is_answered());
    assert_eq!(stored_q.score, Some(feedback.score));
    assert_eq!(stored_q.time_taken_secs, Some(42));

    Ok(())
}

#[tokio::test]
async fn submit_without_active_session_fails() {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let err = lifecycle.submit_answer("q-1", "answer", 5).await.unwrap_err();
    assert!(matches!(err, Error::NoActiveSession));
}

#[tokio::test]
async fn submit_for_unknown_question_fails() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    lifecycle.create_session(practice_config(6)).await?;

    let err = lifecycle.submit_answer("not-a-question", "answer", 5).await.unwrap_err();
    assert!(matches!(err, Error::QuestionNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn completing_with_no_answers_scores_zero() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let session = lifecycle.create_session(practice_config(12)).await?;
    lifecycle.start_session(&session.id).await?;

    let score = lifecycle.complete_session().await?;
    assert_eq!(score, 0);

    let stored = store.get_session(&session.id).await?.unwrap();
    assert_eq!(stored.status, SessionStatus::Completed);
    assert_eq!(stored.overall_score, Some(0));
    assert!(stored.completed_at.is_some());

    Ok(())
}

#[tokio::test]
async fn completing_an_unstarted_session_is_rejected() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let session = lifecycle.create_session(practice_config(12)).await?;

    let err = lifecycle.complete_session().await.unwrap_err();
    assert!(matches!(err, Error::NotStarted));

    // The session is untouched and can proceed normally
    let stored = store.get_session(&session.id).await?.unwrap();
    assert_eq!(stored.status, SessionStatus::Setup);
    lifecycle.start_session(&session.id).await?;
    lifecycle.complete_session().await?;

    Ok(())
}

#[tokio::test]
async fn overall_score_is_rounded_mean_of_answered_questions() -> Result<()> {
    let store = MemoryStore::new();
    let fb80 = feedback_json(80);
    let fb90 = feedback_json(90);
    let fb100 = feedback_json(100);
    let mut lifecycle =
        scripted_lifecycle(&store, vec![THREE_QUESTIONS, &fb80, &fb90, &fb100]);

    let session = lifecycle.create_session(practice_config(18)).await?;
    assert_eq!(lifecycle.questions().len(), 3);
    lifecycle.start_session(&session.id).await?;

    let ids: Vec<String> = lifecycle.questions().iter().map(|q| q.id.clone()).collect();
    for id in &ids {
        lifecycle.submit_answer(id, "an answer", 30).await?;
    }

    let score = lifecycle.complete_session().await?;
    assert_eq!(score, 90, "mean of 80, 90, 100");

    Ok(())
}

#[tokio::test]
async fn completed_sessions_never_regress() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let session = lifecycle.create_session(practice_config(6)).await?;
    lifecycle.start_session(&session.id).await?;
    let score = lifecycle.complete_session().await?;

    // Completing again is an idempotent no-op
    assert_eq!(lifecycle.complete_session().await?, score);
    assert_eq!(
        lifecycle.current_session().unwrap().status,
        SessionStatus::Completed
    );

    // Starting a completed session is rejected
    let err = lifecycle.start_session(&session.id).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyStarted));
    assert_eq!(
        store.get_session(&session.id).await?.unwrap().status,
        SessionStatus::Completed
    );

    Ok(())
}

#[tokio::test]
async fn creating_a_session_replaces_the_previous_one() -> Result<()> {
    let store = MemoryStore::new();
    let mut lifecycle = offline_lifecycle(&store);

    let first = lifecycle.create_session(practice_config(12)).await?;
    lifecycle.next_question();

    let second = lifecycle.create_session(practice_config(6)).await?;
    assert_ne!(first.id, second.id);
    assert_eq!(lifecycle.current_session().unwrap().id, second.id);
    assert_eq!(lifecycle.cursor(), 0, "cursor resets with the new session");

    Ok(())
}
