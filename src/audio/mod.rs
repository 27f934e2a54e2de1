//! Audio capture and live transcription
//!
//! `AudioCapture` wraps a microphone backend and an optional
//! speech-to-text collaborator, producing a playable WAV artifact and a
//! best-effort transcript of final recognized segments.

mod backend;
mod capture;
mod transcribe;

pub use backend::{AudioFrame, ChannelBackend, MicrophoneBackend};
pub use capture::{AudioCapture, CaptureFormat, CaptureResult, NO_SPEECH_FALLBACK};
pub use transcribe::{ChannelTranscriber, Transcriber, TranscriptSegment};
