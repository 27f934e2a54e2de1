use super::backend::{CompletionBackend, CompletionParams};
use super::mock;
use super::types::{AIFeedback, JobAnalysis, QuestionGeneration};
use crate::error::{Error, Result};
use crate::session::{Difficulty, ExperienceLevel, QuestionCategory};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

const JOB_ANALYSIS_SYSTEM: &str = r#"You are an expert career coach analyzing job descriptions. Extract key information and return it as JSON with the following structure:
{
  "role": "specific job title",
  "industry": "industry sector",
  "skills": ["skill1", "skill2", ...],
  "requirements": ["requirement1", "requirement2", ...],
  "experienceLevel": "entry|mid|senior",
  "keywordDensity": {"keyword": count, ...}
}
Return only the JSON object, no surrounding prose."#;

const ANSWER_ANALYSIS_SYSTEM: &str = r#"You are an expert interview coach providing detailed feedback on interview answers.
Return JSON with this structure:
{
  "score": number (0-100),
  "starCompliance": number (0-100, how well they used STAR method),
  "confidence": number (0-100, confidence level in delivery),
  "clarity": number (0-100, clarity of communication),
  "strengths": ["strength1", "strength2", ...],
  "improvements": ["improvement1", "improvement2", ...],
  "suggestions": ["suggestion1", "suggestion2", ...],
  "detailedAnalysis": "comprehensive analysis of the answer"
}
Return only the JSON object, no surrounding prose."#;

/// Translates the three AI request shapes into completion calls and
/// recovers every failure with a local mock response.
///
/// Callers always get a usable value: missing credential, request
/// failure and malformed response all fall back internally, so none of
/// these operations can fail.
#[derive(Clone)]
pub struct FeedbackClient {
    backend: Arc<dyn CompletionBackend>,
}

impl FeedbackClient {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Extract role, industry, skills and requirements from a pasted
    /// job description.
    pub async fn analyze_job_description(&self, job_description: &str) -> JobAnalysis {
        let user = format!("Analyze this job description: {}", job_description);
        let params = CompletionParams {
            temperature: 0.3,
            max_tokens: 1000,
        };

        match self.request::<JobAnalysis>(JOB_ANALYSIS_SYSTEM, &user, params).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("job description analysis fell back to mock: {}", e);
                mock::job_analysis()
            }
        }
    }

    /// Generate `count` interview questions for the given position.
    pub async fn generate_questions(
        &self,
        role: &str,
        industry: &str,
        experience_level: ExperienceLevel,
        difficulty: Difficulty,
        count: usize,
    ) -> QuestionGeneration {
        let level = serde_variant_name(&experience_level);
        let diff = serde_variant_name(&difficulty);

        let system = format!(
            r#"You are an expert interview coach. Generate interview questions for a {level} level {role} position in the {industry} industry.
Return JSON with this structure:
{{
  "questions": [
    {{
      "question": "the interview question",
      "category": "behavioral|technical|situational|general|closing",
      "difficulty": "easy|medium|hard",
      "expectedStructure": "STAR|Examples|Technical|Vision",
      "tips": "specific tips for answering this question"
    }}
  ]
}}

Include a mix of behavioral, technical, and situational questions appropriate for the {diff} difficulty level. Return only the JSON object, no surrounding prose."#
        );
        let user = format!(
            "Generate {} interview questions for: Role: {}, Industry: {}, Experience: {}, Difficulty: {}",
            count, role, industry, level, diff
        );
        let params = CompletionParams {
            temperature: 0.7,
            max_tokens: 2000,
        };

        match self.request::<QuestionGeneration>(&system, &user, params).await {
            Ok(generation) => generation,
            Err(e) => {
                warn!("question generation fell back to mock: {}", e);
                mock::questions(count)
            }
        }
    }

    /// Score one answer and produce structured feedback.
    pub async fn analyze_answer(
        &self,
        question: &str,
        answer: &str,
        category: QuestionCategory,
    ) -> AIFeedback {
        let user = format!(
            "Analyze this interview answer:\nQuestion: {}\nCategory: {}\nAnswer: {}",
            question,
            category.as_str(),
            answer
        );
        let params = CompletionParams {
            temperature: 0.3,
            max_tokens: 1500,
        };

        let parsed = self
            .request::<AIFeedback>(ANSWER_ANALYSIS_SYSTEM, &user, params)
            .await
            .and_then(|feedback| {
                feedback.validate().map_err(Error::MalformedResponse)?;
                Ok(feedback)
            });

        match parsed {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!("answer analysis fell back to mock: {}", e);
                mock::feedback(answer)
            }
        }
    }

    /// One completion attempt followed by a strict parse. Skips the
    /// network entirely when no credential is configured.
    async fn request<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        params: CompletionParams,
    ) -> Result<T> {
        if !self.backend.is_configured() {
            return Err(Error::CredentialMissing);
        }

        let text = self.backend.complete(system, user, params).await?;
        let body = strip_code_fences(&text);

        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))
    }
}

/// Models sometimes wrap JSON in a ```json fence despite instructions.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .trim_end_matches('`')
        .trim()
}

/// Lowercase wire name of a unit enum variant, matching its serde form.
fn serde_variant_name<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .unwrap_or_default()
}
