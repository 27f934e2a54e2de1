use super::{NewQuestion, NewSession, ProgressStore, SessionStore, SessionUpdate};
use crate::error::Result;
use crate::feedback::AIFeedback;
use crate::progress::SkillProgressRecord;
use crate::session::{Question, Session, SessionStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of both store contracts.
///
/// Backs the demo binary and the test suite; cloning shares the
/// underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    questions: Arc<RwLock<HashMap<String, Question>>>,
    skills: Arc<RwLock<HashMap<(String, String), SkillProgressRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemoryStore {
    async fn insert_session(&self, new: NewSession) -> Result<Session> {
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new.user_id,
            session_type: new.session_type,
            title: new.title,
            role: new.role,
            industry: new.industry,
            experience_level: new.experience_level,
            difficulty: new.difficulty,
            duration_minutes: new.duration_minutes,
            job_description: new.job_description,
            status: SessionStatus::Setup,
            started_at: None,
            completed_at: None,
            overall_score: None,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn sessions_for_user(&self, user_id: &str) -> Result<Vec<Session>> {
        let sessions = self.sessions.read().await;
        let mut rows: Vec<Session> = sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(rows)
    }

    async fn update_session(&self, id: &str, update: SessionUpdate) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(id) {
            if let Some(status) = update.status {
                session.status = status;
            }
            if let Some(at) = update.started_at {
                session.started_at = Some(at);
            }
            if let Some(at) = update.completed_at {
                session.completed_at = Some(at);
            }
            if let Some(score) = update.overall_score {
                session.overall_score = Some(score);
            }
        }
        Ok(())
    }

    async fn insert_questions(&self, new: Vec<NewQuestion>) -> Result<Vec<Question>> {
        let mut inserted = Vec::with_capacity(new.len());
        let mut questions = self.questions.write().await;

        for q in new {
            let question = Question {
                id: uuid::Uuid::new_v4().to_string(),
                session_id: q.session_id,
                question: q.question,
                category: q.category,
                difficulty: q.difficulty,
                expected_structure: q.expected_structure,
                tips: q.tips,
                order_index: q.order_index,
                answer: None,
                score: None,
                feedback: None,
                time_taken_secs: None,
            };
            questions.insert(question.id.clone(), question.clone());
            inserted.push(question);
        }

        inserted.sort_by_key(|q| q.order_index);
        Ok(inserted)
    }

    async fn questions_for_session(&self, session_id: &str) -> Result<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut rows: Vec<Question> = questions
            .values()
            .filter(|q| q.session_id == session_id)
            .cloned()
            .collect();
        rows.sort_by_key(|q| q.order_index);
        Ok(rows)
    }

    async fn update_question_answer(
        &self,
        id: &str,
        answer: &str,
        feedback: &AIFeedback,
        time_taken_secs: u32,
    ) -> Result<()> {
        let mut questions = self.questions.write().await;
        if let Some(question) = questions.get_mut(id) {
            question.record_answer(answer.to_string(), feedback.clone(), time_taken_secs);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProgressStore for MemoryStore {
    async fn get_skill(
        &self,
        user_id: &str,
        skill_area: &str,
    ) -> Result<Option<SkillProgressRecord>> {
        let skills = self.skills.read().await;
        Ok(skills
            .get(&(user_id.to_string(), skill_area.to_string()))
            .cloned())
    }

    async fn skills_for_user(&self, user_id: &str) -> Result<Vec<SkillProgressRecord>> {
        let skills = self.skills.read().await;
        let mut rows: Vec<SkillProgressRecord> = skills
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.skill_area.cmp(&b.skill_area));
        Ok(rows)
    }

    async fn upsert_skill(&self, record: SkillProgressRecord) -> Result<()> {
        let mut skills = self.skills.write().await;
        skills.insert(
            (record.user_id.clone(), record.skill_area.clone()),
            record,
        );
        Ok(())
    }
}
