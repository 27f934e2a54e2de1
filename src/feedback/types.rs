use crate::session::{Difficulty, ExperienceLevel, QuestionCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured feedback for one answered question.
///
/// Stored embedded in the owning `Question`; field names are camelCase on
/// the wire because that is the JSON shape the completion model is
/// instructed to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIFeedback {
    /// Overall answer score (0-100)
    pub score: u8,

    /// How well the answer followed the STAR method (0-100)
    pub star_compliance: u8,

    /// Confidence level in delivery (0-100)
    pub confidence: u8,

    /// Clarity of communication (0-100)
    pub clarity: u8,

    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_analysis: String,
}

impl AIFeedback {
    /// Range check for the metric fields. The completion model is
    /// instructed to keep every metric in 0-100 but is not trusted to;
    /// a value outside the range fails the schema.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let metrics = [
            ("score", self.score),
            ("starCompliance", self.star_compliance),
            ("confidence", self.confidence),
            ("clarity", self.clarity),
        ];
        for (name, value) in metrics {
            if value > 100 {
                return Err(format!("{} out of range: {}", name, value));
            }
        }
        Ok(())
    }
}

/// Extracted structure of a pasted job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    pub role: String,
    pub industry: String,
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
    pub experience_level: ExperienceLevel,

    /// Keyword counts across the description. Models occasionally omit
    /// this, so absence parses as empty rather than failing the schema.
    #[serde(default)]
    pub keyword_density: BTreeMap<String, u32>,
}

/// One question as produced by generation (not yet persisted).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
    pub expected_structure: String,
    pub tips: String,
}

/// Response shape of a question-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionGeneration {
    pub questions: Vec<GeneratedQuestion>,
}
