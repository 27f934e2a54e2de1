use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A single recognized speech segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Recognized text
    pub text: String,

    /// Whether this is a final result; interim segments are discarded
    /// by the capture component.
    pub is_final: bool,
}

/// Speech-to-text collaborator trait
///
/// Transcription is a best-effort enhancement on top of capture: when
/// unavailable or failing, recording proceeds without a transcript.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Whether a speech-to-text capability is available.
    fn is_available(&self) -> bool;

    /// Start a live transcription session.
    ///
    /// Returns a channel receiver of recognized segments; the channel
    /// closes when the session ends.
    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptSegment>>;

    /// Finalize the transcription session.
    async fn stop(&mut self) -> Result<()>;
}

/// Transcriber fed by an external channel, for tests.
pub struct ChannelTranscriber {
    rx: Option<mpsc::Receiver<TranscriptSegment>>,
}

impl ChannelTranscriber {
    pub fn new(rx: mpsc::Receiver<TranscriptSegment>) -> Self {
        Self { rx: Some(rx) }
    }
}

#[async_trait::async_trait]
impl Transcriber for ChannelTranscriber {
    fn is_available(&self) -> bool {
        true
    }

    async fn start(&mut self) -> Result<mpsc::Receiver<TranscriptSegment>> {
        self.rx
            .take()
            .ok_or_else(|| Error::DeviceUnavailable("transcript channel already consumed".to_string()))
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}
