use crate::error::{Error, Result};
use tokio::sync::mpsc;

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since recording started
    pub timestamp_ms: u64,
}

/// Microphone capture backend trait
///
/// Platform implementations wrap the runtime's capture API; access
/// failures surface as `PermissionDenied` or `DeviceUnavailable`. The
/// device is an exclusive resource: `stop` must release it on every
/// path.
#[async_trait::async_trait]
pub trait MicrophoneBackend: Send + Sync {
    /// Whether the runtime exposes microphone capture at all.
    fn is_available(&self) -> bool;

    /// Acquire the device and start capturing.
    ///
    /// Returns a channel receiver that will receive audio frames; the
    /// channel closes when capture stops.
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>>;

    /// Stop capturing and release the device.
    async fn stop(&mut self) -> Result<()>;
}

/// Backend fed by an external channel, for tests and batch processing.
pub struct ChannelBackend {
    rx: Option<mpsc::Receiver<AudioFrame>>,
}

impl ChannelBackend {
    pub fn new(rx: mpsc::Receiver<AudioFrame>) -> Self {
        Self { rx: Some(rx) }
    }
}

#[async_trait::async_trait]
impl MicrophoneBackend for ChannelBackend {
    fn is_available(&self) -> bool {
        true
    }

    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>> {
        self.rx
            .take()
            .ok_or_else(|| Error::DeviceUnavailable("capture channel already consumed".to_string()))
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}
