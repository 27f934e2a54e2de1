pub mod audio;
pub mod config;
pub mod error;
pub mod feedback;
pub mod http;
pub mod progress;
pub mod session;
pub mod store;

pub use audio::{
    AudioCapture, AudioFrame, CaptureFormat, CaptureResult, ChannelBackend, ChannelTranscriber,
    MicrophoneBackend, Transcriber, TranscriptSegment,
};
pub use config::Config;
pub use error::{Error, Result};
pub use feedback::{
    AIFeedback, CompletionBackend, FeedbackClient, JobAnalysis, OpenAiBackend, QuestionGeneration,
};
pub use http::{create_router, AppState};
pub use progress::{
    compute_overall_stats, ExportBundle, OverallStats, Profile, ProgressAggregator,
    SkillProgressRecord,
};
pub use session::{Question, Session, SessionConfig, SessionLifecycle, SessionStatus};
pub use store::{IdentityProvider, MemoryStore, ProgressStore, SessionStore, StaticIdentity};
