use crate::error::Result;
use crate::session::{Session, SessionStatus};
use crate::store::ProgressStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Per-skill trend record, keyed by (user_id, skill_area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgressRecord {
    pub user_id: String,
    pub skill_area: String,
    pub current_score: u8,

    /// Practice target; defaults to 85 on first practice
    pub target_score: u8,

    /// Monotonic counter of completed practices of this skill
    pub sessions_completed: u32,

    /// Percentage delta of the latest score over the previous one
    pub improvement_rate: f64,

    pub last_practice: Option<DateTime<Utc>>,

    /// Append-only; duplicates are permitted
    pub achievements: Vec<String>,
}

/// Derived statistics over a user's completed sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_sessions: u32,
    pub average_score: u32,
    pub hours_spent: u32,
    pub streak_days: u32,
    pub improvement_rate: i32,
}

/// Derived statistics from historical sessions. Only sessions with
/// `status == completed` count.
pub fn compute_overall_stats(sessions: &[Session]) -> OverallStats {
    compute_overall_stats_at(sessions, Utc::now())
}

/// Same as `compute_overall_stats` with an explicit "today" for the
/// streak walk.
pub fn compute_overall_stats_at(sessions: &[Session], now: DateTime<Utc>) -> OverallStats {
    let mut completed: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .collect();
    // Most recently completed first
    completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let average_score = if completed.is_empty() {
        0
    } else {
        let sum: u32 = completed
            .iter()
            .map(|s| s.overall_score.unwrap_or(0) as u32)
            .sum();
        (sum as f64 / completed.len() as f64).round() as u32
    };

    let minutes: u32 = completed.iter().map(|s| s.duration_minutes).sum();
    let hours_spent = (minutes as f64 / 60.0).round() as u32;

    OverallStats {
        total_sessions: completed.len() as u32,
        average_score,
        hours_spent,
        streak_days: streak_days(&completed, now),
        improvement_rate: improvement_rate(&completed),
    }
}

/// Walk backward from today for up to 30 days, counting days with a
/// completed session. A miss before the first hit keeps scanning; a
/// miss after the streak has started ends it.
fn streak_days(completed: &[&Session], now: DateTime<Utc>) -> u32 {
    if completed.is_empty() {
        return 0;
    }

    let today = now.date_naive();
    let mut streak = 0;

    for offset in 0..30 {
        let day = today - Duration::days(offset);
        let hit = completed
            .iter()
            .any(|s| s.completed_at.map(|t| t.date_naive() == day).unwrap_or(false));

        if hit {
            streak += 1;
        } else if streak > 0 {
            break;
        }
    }

    streak
}

/// Rounded percentage change of the mean score of the 5 most recent
/// sessions over the mean of the 5 oldest (by completion date).
fn improvement_rate(completed: &[&Session]) -> i32 {
    if completed.len() < 2 {
        return 0;
    }

    let score = |s: &&Session| s.overall_score.unwrap_or(0) as f64;

    let recent: Vec<f64> = completed.iter().take(5).map(score).collect();
    let oldest: Vec<f64> = completed.iter().rev().take(5).map(score).collect();

    let recent_avg = recent.iter().sum::<f64>() / recent.len() as f64;
    let oldest_avg = oldest.iter().sum::<f64>() / oldest.len() as f64;

    if oldest_avg > 0.0 {
        (((recent_avg - oldest_avg) / oldest_avg) * 100.0).round() as i32
    } else {
        0
    }
}

/// Read-only derived statistics plus skill-record maintenance. Never a
/// source of truth; every write goes through the progress store.
#[derive(Clone)]
pub struct ProgressAggregator {
    store: Arc<dyn ProgressStore>,
}

impl ProgressAggregator {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    pub async fn skill_progress(&self, user_id: &str) -> Result<Vec<SkillProgressRecord>> {
        self.store.skills_for_user(user_id).await
    }

    /// Record a new score for a skill area: updates the trend record or
    /// creates one on first practice (target score 85).
    pub async fn update_skill_progress(
        &self,
        user_id: &str,
        skill_area: &str,
        new_score: u8,
    ) -> Result<SkillProgressRecord> {
        let record = match self.store.get_skill(user_id, skill_area).await? {
            Some(mut existing) => {
                existing.improvement_rate =
                    if new_score > existing.current_score && existing.current_score > 0 {
                        (new_score - existing.current_score) as f64
                            / existing.current_score as f64
                            * 100.0
                    } else {
                        0.0
                    };
                existing.sessions_completed += 1;
                existing.current_score = new_score;
                existing.last_practice = Some(Utc::now());
                existing
            }
            None => SkillProgressRecord {
                user_id: user_id.to_string(),
                skill_area: skill_area.to_string(),
                current_score: new_score,
                target_score: 85,
                sessions_completed: 1,
                improvement_rate: 0.0,
                last_practice: Some(Utc::now()),
                achievements: Vec::new(),
            },
        };

        self.store.upsert_skill(record.clone()).await?;

        info!(
            "skill progress updated: {} / {} -> {}",
            user_id, skill_area, new_score
        );

        Ok(record)
    }

    /// Append an achievement label. No-op when the skill record does not
    /// exist yet; duplicates are not filtered.
    pub async fn add_achievement(
        &self,
        user_id: &str,
        skill_area: &str,
        achievement: &str,
    ) -> Result<()> {
        if let Some(mut record) = self.store.get_skill(user_id, skill_area).await? {
            record.achievements.push(achievement.to_string());
            self.store.upsert_skill(record).await?;
        }
        Ok(())
    }
}
