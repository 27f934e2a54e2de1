use super::state::AppState;
use crate::error::Error;
use crate::feedback::{AIFeedback, JobAnalysis};
use crate::progress::{compute_overall_stats, ExportBundle, OverallStats, Profile};
use crate::session::{Question, Session, SessionConfig};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub answer: String,
    pub time_taken_secs: u32,
}

#[derive(Debug, Serialize)]
pub struct CompleteSessionResponse {
    pub overall_score: u8,
}

#[derive(Debug, Serialize)]
pub struct SessionProgressResponse {
    pub percent: f32,
    pub cursor: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_reply(e: Error) -> axum::response::Response {
    let status = match e {
        Error::AuthRequired => StatusCode::UNAUTHORIZED,
        Error::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        Error::SessionNotFound(_) | Error::QuestionNotFound(_) => StatusCode::NOT_FOUND,
        Error::NoActiveSession
        | Error::AlreadyStarted
        | Error::NotStarted
        | Error::AlreadyRecording
        | Error::NotRecording => StatusCode::CONFLICT,
        Error::CredentialMissing | Error::RequestFailed(_) | Error::MalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        Error::Persistence(_) | Error::PermissionDenied | Error::DeviceUnavailable(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error!("request failed: {}", e);
    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions
/// Create a session from a config, generating its questions
pub async fn create_session(
    State(state): State<AppState>,
    Json(config): Json<SessionConfig>,
) -> impl IntoResponse {
    let mut lifecycle = state.lifecycle.write().await;
    match lifecycle.create_session(config).await {
        Ok(session) => {
            info!("session {} created", session.id);
            (StatusCode::OK, Json::<Session>(session)).into_response()
        }
        Err(e) => error_reply(e),
    }
}

/// POST /sessions/:session_id/start
pub async fn start_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let mut lifecycle = state.lifecycle.write().await;
    match lifecycle.start_session(&session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_reply(e),
    }
}

/// POST /sessions/answer
/// Submit an answer for a question of the active session
pub async fn submit_answer(
    State(state): State<AppState>,
    Json(req): Json<SubmitAnswerRequest>,
) -> impl IntoResponse {
    let mut lifecycle = state.lifecycle.write().await;
    match lifecycle
        .submit_answer(&req.question_id, &req.answer, req.time_taken_secs)
        .await
    {
        Ok(feedback) => (StatusCode::OK, Json::<AIFeedback>(feedback)).into_response(),
        Err(e) => error_reply(e),
    }
}

/// POST /sessions/complete
/// Complete the active session and fold its scores into skill progress
pub async fn complete_session(State(state): State<AppState>) -> impl IntoResponse {
    let mut lifecycle = state.lifecycle.write().await;

    let overall_score = match lifecycle.complete_session().await {
        Ok(score) => score,
        Err(e) => return error_reply(e),
    };

    // Completed answer events update the per-skill trend, keyed by
    // question category.
    if let Some(session) = lifecycle.current_session() {
        let user_id = session.user_id.clone();
        let answered: Vec<_> = lifecycle
            .questions()
            .iter()
            .filter_map(|q| q.score.map(|score| (q.category, score)))
            .collect();

        for (category, score) in answered {
            if let Err(e) = state
                .progress
                .update_skill_progress(&user_id, category.as_str(), score)
                .await
            {
                error!("failed to update skill progress: {}", e);
            }
        }
    }

    (StatusCode::OK, Json(CompleteSessionResponse { overall_score })).into_response()
}

/// GET /sessions/current/question
pub async fn current_question(State(state): State<AppState>) -> impl IntoResponse {
    let lifecycle = state.lifecycle.read().await;
    let question = lifecycle.current_question().cloned();
    (StatusCode::OK, Json::<Option<Question>>(question)).into_response()
}

/// POST /sessions/current/next
pub async fn next_question(State(state): State<AppState>) -> impl IntoResponse {
    let mut lifecycle = state.lifecycle.write().await;
    lifecycle.next_question();
    progress_reply(&lifecycle)
}

/// POST /sessions/current/previous
pub async fn previous_question(State(state): State<AppState>) -> impl IntoResponse {
    let mut lifecycle = state.lifecycle.write().await;
    lifecycle.previous_question();
    progress_reply(&lifecycle)
}

/// GET /sessions/current/progress
pub async fn session_progress(State(state): State<AppState>) -> impl IntoResponse {
    let lifecycle = state.lifecycle.read().await;
    progress_reply(&lifecycle)
}

fn progress_reply(lifecycle: &crate::session::SessionLifecycle) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(SessionProgressResponse {
            percent: lifecycle.progress(),
            cursor: lifecycle.cursor(),
            total: lifecycle.questions().len(),
        }),
    )
        .into_response()
}

/// POST /analyze/job
/// Extract role/industry/skills from a pasted job description
pub async fn analyze_job(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeJobRequest>,
) -> impl IntoResponse {
    let lifecycle = state.lifecycle.read().await;
    let analysis = lifecycle
        .feedback_client()
        .analyze_job_description(&req.job_description)
        .await;
    (StatusCode::OK, Json::<JobAnalysis>(analysis)).into_response()
}

/// GET /progress/stats
pub async fn progress_stats(State(state): State<AppState>) -> impl IntoResponse {
    let Some(user) = state.identity.current_user() else {
        return error_reply(Error::AuthRequired);
    };

    match state.sessions.sessions_for_user(&user.id).await {
        Ok(sessions) => {
            let stats = compute_overall_stats(&sessions);
            (StatusCode::OK, Json::<OverallStats>(stats)).into_response()
        }
        Err(e) => error_reply(e),
    }
}

/// GET /progress/export
/// Downloadable user-data bundle
pub async fn export_data(State(state): State<AppState>) -> impl IntoResponse {
    let Some(user) = state.identity.current_user() else {
        return error_reply(Error::AuthRequired);
    };

    let sessions = match state.sessions.sessions_for_user(&user.id).await {
        Ok(s) => s,
        Err(e) => return error_reply(e),
    };
    let skills = match state.progress.skill_progress(&user.id).await {
        Ok(s) => s,
        Err(e) => return error_reply(e),
    };

    let bundle = ExportBundle::new(
        Profile {
            id: user.id,
            email: user.email,
            full_name: None,
            avatar_url: None,
        },
        skills,
        compute_overall_stats(&sessions),
    );

    let disposition = format!("attachment; filename=\"{}\"", bundle.file_name());
    (
        StatusCode::OK,
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(bundle),
    )
        .into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
