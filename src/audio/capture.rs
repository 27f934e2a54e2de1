use super::backend::MicrophoneBackend;
use super::transcribe::Transcriber;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Transcript returned when no final speech segment was recognized.
pub const NO_SPEECH_FALLBACK: &str = "No speech detected. Please try speaking more clearly.";

/// PCM format the capture buffer is encoded with.
#[derive(Debug, Clone, Copy)]
pub struct CaptureFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            channels: 1,
        }
    }
}

impl CaptureFormat {
    pub fn from_config(audio: &crate::config::AudioConfig) -> Self {
        Self {
            sample_rate: audio.sample_rate,
            channels: audio.channels,
        }
    }
}

/// Result of one recording, delivered on the stop transition.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    /// Accumulated final transcript segments, or the no-speech fallback
    pub transcript: String,

    /// Playable WAV encoding of the captured audio
    pub audio_wav: Vec<u8>,

    /// Elapsed wall time since start, floored to whole seconds
    pub duration_secs: u64,
}

/// Microphone recording with best-effort live transcription.
///
/// State machine: idle --start--> recording --stop--> idle. One
/// recording at a time; the device is released on every stop path,
/// including transcription failures.
pub struct AudioCapture {
    backend: Box<dyn MicrophoneBackend>,
    transcriber: Option<Box<dyn Transcriber>>,
    format: CaptureFormat,

    recording: bool,
    started_at: Option<DateTime<Utc>>,

    /// Captured PCM samples, appended by the audio task
    samples: Arc<Mutex<Vec<i16>>>,

    /// Final (non-interim) recognized segments
    transcript_parts: Arc<Mutex<Vec<String>>>,

    audio_task: Option<JoinHandle<()>>,
    transcript_task: Option<JoinHandle<()>>,
}

impl AudioCapture {
    pub fn new(
        backend: Box<dyn MicrophoneBackend>,
        transcriber: Option<Box<dyn Transcriber>>,
        format: CaptureFormat,
    ) -> Self {
        Self {
            backend,
            transcriber,
            format,
            recording: false,
            started_at: None,
            samples: Arc::new(Mutex::new(Vec::new())),
            transcript_parts: Arc::new(Mutex::new(Vec::new())),
            audio_task: None,
            transcript_task: None,
        }
    }

    /// True iff the runtime exposes microphone capture.
    pub fn is_supported(&self) -> bool {
        self.backend.is_available()
    }

    /// True iff a speech-to-text capability is additionally available.
    pub fn is_transcription_supported(&self) -> bool {
        self.transcriber.as_ref().map(|t| t.is_available()).unwrap_or(false)
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Acquire the microphone and begin buffering audio. If
    /// transcription is supported, a parallel session accumulates final
    /// recognized segments.
    pub async fn start(&mut self) -> Result<()> {
        if self.recording {
            return Err(Error::AlreadyRecording);
        }

        let mut audio_rx = self.backend.start().await?;

        self.started_at = Some(Utc::now());
        self.recording = true;
        self.samples.lock().await.clear();
        self.transcript_parts.lock().await.clear();

        let samples = Arc::clone(&self.samples);
        self.audio_task = Some(tokio::spawn(async move {
            while let Some(frame) = audio_rx.recv().await {
                samples.lock().await.extend_from_slice(&frame.samples);
            }
        }));

        // Transcription is best-effort: a failing transcriber degrades
        // to audio-only recording, never aborts the capture.
        if let Some(transcriber) = self.transcriber.as_mut() {
            if transcriber.is_available() {
                match transcriber.start().await {
                    Ok(mut segment_rx) => {
                        let parts = Arc::clone(&self.transcript_parts);
                        self.transcript_task = Some(tokio::spawn(async move {
                            while let Some(segment) = segment_rx.recv().await {
                                if segment.is_final {
                                    parts.lock().await.push(segment.text);
                                }
                            }
                        }));
                    }
                    Err(e) => warn!("live transcription unavailable: {}", e),
                }
            }
        }

        info!("recording started");
        Ok(())
    }

    /// Finalize the recording and return the audio artifact, transcript
    /// and duration. Always releases the device before returning.
    pub async fn stop(&mut self) -> Result<CaptureResult> {
        if !self.recording {
            return Err(Error::NotRecording);
        }
        self.recording = false;

        // Transcriber shutdown failures must not prevent device release.
        if let Some(transcriber) = self.transcriber.as_mut() {
            if let Err(e) = transcriber.stop().await {
                warn!("failed to stop transcription: {}", e);
            }
        }

        let released = self.backend.stop().await;

        if let Some(task) = self.audio_task.take() {
            if let Err(e) = task.await {
                error!("audio task panicked: {}", e);
            }
        }
        if let Some(task) = self.transcript_task.take() {
            if let Err(e) = task.await {
                error!("transcript task panicked: {}", e);
            }
        }

        released?;

        let started_at = self.started_at.take().ok_or(Error::NotRecording)?;
        let duration_secs = Utc::now()
            .signed_duration_since(started_at)
            .num_seconds()
            .max(0) as u64;

        let transcript = {
            let parts = self.transcript_parts.lock().await;
            let joined = parts.join(" ");
            let trimmed = joined.trim();
            if trimmed.is_empty() {
                NO_SPEECH_FALLBACK.to_string()
            } else {
                trimmed.to_string()
            }
        };

        let audio_wav = {
            let samples = self.samples.lock().await;
            encode_wav(&samples, self.format)?
        };

        info!(
            "recording stopped after {}s ({} bytes of audio)",
            duration_secs,
            audio_wav.len()
        );

        Ok(CaptureResult {
            transcript,
            audio_wav,
            duration_secs,
        })
    }
}

/// Encode captured PCM into an in-memory WAV file.
fn encode_wav(samples: &[i16], format: CaptureFormat) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| Error::DeviceUnavailable(format!("wav encoding failed: {}", e)))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| Error::DeviceUnavailable(format!("wav encoding failed: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| Error::DeviceUnavailable(format!("wav encoding failed: {}", e)))?;
    }

    Ok(cursor.into_inner())
}
