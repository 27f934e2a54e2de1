use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors surfaced by the core components.
///
/// `RequestFailed` and `MalformedResponse` are produced by the completion
/// backend and recovered inside `FeedbackClient` via the mock fallback;
/// callers of the client never observe them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("user not authenticated")]
    AuthRequired,

    #[error("persistence backend not configured")]
    BackendUnavailable,

    #[error("storage error: {0}")]
    Persistence(String),

    #[error("completion API credential not configured")]
    CredentialMissing,

    #[error("completion request failed: {0}")]
    RequestFailed(String),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("no active session")]
    NoActiveSession,

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("question not found: {0}")]
    QuestionNotFound(String),

    #[error("session already started")]
    AlreadyStarted,

    #[error("session not started")]
    NotStarted,

    #[error("recording already in progress")]
    AlreadyRecording,

    #[error("no recording in progress")]
    NotRecording,

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
}
