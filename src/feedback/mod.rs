//! AI feedback pipeline
//!
//! Three request shapes (job-description analysis, question generation,
//! answer analysis) against a pluggable text-completion backend, with a
//! deterministic mock fallback so the user always gets some feedback.

mod backend;
mod client;
mod mock;
mod types;

pub use backend::{CompletionBackend, CompletionParams, OpenAiBackend};
pub use client::FeedbackClient;
pub use types::{AIFeedback, GeneratedQuestion, JobAnalysis, QuestionGeneration};
