//! HTTP API server for the interview-prep service
//!
//! This module provides a REST API over the session lifecycle:
//! - POST /sessions - Create a session (config -> generated questions)
//! - POST /sessions/:id/start - Start a created session
//! - POST /sessions/answer - Submit an answer, get AI feedback
//! - POST /sessions/complete - Complete and score the active session
//! - GET  /sessions/current/question - Question at the cursor
//! - POST /sessions/current/next|previous - Move the cursor
//! - GET  /sessions/current/progress - Cursor progress percentage
//! - POST /analyze/job - Analyze a pasted job description
//! - GET  /progress/stats - Overall stats for the current user
//! - GET  /progress/export - Downloadable user-data bundle
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
