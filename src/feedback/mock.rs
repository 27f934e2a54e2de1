//! Deterministic-but-randomized synthetic responses, served whenever the
//! completion collaborator is unconfigured or fails. Structure is fixed;
//! only the score draws vary.

use super::types::{AIFeedback, GeneratedQuestion, JobAnalysis, QuestionGeneration};
use crate::session::{Difficulty, ExperienceLevel, QuestionCategory};
use rand::Rng;
use std::collections::BTreeMap;

const ROLES: [&str; 5] = [
    "Software Engineer",
    "Product Manager",
    "Data Scientist",
    "UX Designer",
    "Marketing Manager",
];

const INDUSTRIES: [&str; 5] = [
    "Technology",
    "Finance",
    "Healthcare",
    "E-commerce",
    "Education",
];

const SKILLS: [&str; 8] = [
    "JavaScript",
    "React",
    "Python",
    "SQL",
    "Communication",
    "Leadership",
    "Problem Solving",
    "Analytics",
];

/// Keywords whose presence marks an answer as STAR-structured.
const STAR_KEYWORDS: [&str; 4] = ["situation", "task", "action", "result"];

pub fn job_analysis() -> JobAnalysis {
    let mut rng = rand::thread_rng();

    let levels = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
    ];

    JobAnalysis {
        role: ROLES[rng.gen_range(0..ROLES.len())].to_string(),
        industry: INDUSTRIES[rng.gen_range(0..INDUSTRIES.len())].to_string(),
        skills: SKILLS
            .iter()
            .take(rng.gen_range(3..7))
            .map(|s| s.to_string())
            .collect(),
        requirements: vec![
            "Bachelor's degree in relevant field".to_string(),
            "3+ years of experience".to_string(),
            "Strong communication skills".to_string(),
            "Experience with agile methodologies".to_string(),
        ],
        experience_level: levels[rng.gen_range(0..levels.len())],
        keyword_density: BTreeMap::from([
            ("experience".to_string(), 3),
            ("team".to_string(), 2),
            ("leadership".to_string(), 1),
            ("technical".to_string(), 4),
        ]),
    }
}

/// Up to `count` questions from the fixed pool. When `count` exceeds the
/// pool the result is truncated, never padded or repeated.
pub fn questions(count: usize) -> QuestionGeneration {
    let pool = [
        GeneratedQuestion {
            question: "Tell me about yourself and your background.".to_string(),
            category: QuestionCategory::General,
            difficulty: Difficulty::Easy,
            expected_structure: "STAR".to_string(),
            tips: "Focus on relevant experience and skills that align with the role."
                .to_string(),
        },
        GeneratedQuestion {
            question: "Describe a challenging project you worked on. How did you handle it?"
                .to_string(),
            category: QuestionCategory::Behavioral,
            difficulty: Difficulty::Medium,
            expected_structure: "STAR".to_string(),
            tips: "Use the STAR method: Situation, Task, Action, Result.".to_string(),
        },
        GeneratedQuestion {
            question: "What are your greatest strengths and how do they apply to this role?"
                .to_string(),
            category: QuestionCategory::General,
            difficulty: Difficulty::Easy,
            expected_structure: "Examples".to_string(),
            tips: "Provide specific examples that demonstrate your strengths in action."
                .to_string(),
        },
        GeneratedQuestion {
            question: "How do you handle conflict in a team setting?".to_string(),
            category: QuestionCategory::Behavioral,
            difficulty: Difficulty::Medium,
            expected_structure: "STAR".to_string(),
            tips: "Focus on resolution and positive outcomes.".to_string(),
        },
        GeneratedQuestion {
            question: "Where do you see yourself in 5 years?".to_string(),
            category: QuestionCategory::General,
            difficulty: Difficulty::Medium,
            expected_structure: "Vision".to_string(),
            tips: "Show ambition while staying relevant to the role and company.".to_string(),
        },
    ];

    QuestionGeneration {
        questions: pool.into_iter().take(count).collect(),
    }
}

pub fn feedback(answer: &str) -> AIFeedback {
    let mut rng = rand::thread_rng();

    let lower = answer.to_lowercase();
    let has_star = STAR_KEYWORDS.iter().any(|k| lower.contains(k));

    AIFeedback {
        score: rng.gen_range(70..100),
        star_compliance: if has_star { 85 } else { 45 },
        confidence: rng.gen_range(75..95),
        clarity: rng.gen_range(80..95),
        strengths: vec![
            "Good structure and flow".to_string(),
            "Relevant examples provided".to_string(),
            "Clear communication".to_string(),
        ],
        improvements: vec![
            "Could include more specific metrics".to_string(),
            "Consider using the STAR method more explicitly".to_string(),
            "Expand on the impact of your actions".to_string(),
        ],
        suggestions: vec![
            "Try to quantify your achievements with numbers".to_string(),
            "Include the outcome or result of your actions".to_string(),
            "Practice speaking with more confidence".to_string(),
        ],
        detailed_analysis: "Your answer demonstrates good understanding of the question and \
            provides relevant information. The structure is clear and easy to follow. \
            Consider incorporating more specific metrics and outcomes to strengthen your \
            response."
            .to_string(),
    }
}
