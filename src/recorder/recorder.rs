use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::state::RecorderState;
use crate::capture::{ArtifactWriter, AudioArtifact, CaptureConfig, CaptureDevice, CaptureStream};
use crate::error::SessionError;

/// Recording state machine for the active question
///
/// Owns the capture stream, the elapsed-seconds counter, and the background
/// tasks that feed the artifact writer and tick the counter. At most one
/// stream is open at a time; `teardown` force-releases it if the session view
/// is disposed mid-recording.
pub struct Recorder {
    device: Arc<dyn CaptureDevice>,
    config: CaptureConfig,
    artifacts_dir: PathBuf,

    state: RecorderState,

    /// Provisional elapsed seconds, incremented by the ticker task only
    /// while recording. Display-only; the authoritative duration comes from
    /// the server once the session ends.
    elapsed: Arc<AtomicU64>,

    stream: Option<Box<dyn CaptureStream>>,
    writer_task: Option<JoinHandle<anyhow::Result<AudioArtifact>>>,
    ticker_task: Option<JoinHandle<()>>,

    artifact: Option<AudioArtifact>,
}

impl Recorder {
    pub fn new(device: Arc<dyn CaptureDevice>, config: CaptureConfig, artifacts_dir: PathBuf) -> Self {
        Self {
            device,
            config,
            artifacts_dir,
            state: RecorderState::Idle,
            elapsed: Arc::new(AtomicU64::new(0)),
            stream: None,
            writer_task: None,
            ticker_task: None,
            artifact: None,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Elapsed seconds of the current (or last) take
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    /// The finalized artifact of the last completed take, if any
    pub fn artifact(&self) -> Option<&AudioArtifact> {
        self.artifact.as_ref()
    }

    /// `Idle|Stopped --begin--> Recording`
    ///
    /// Acquires and starts the capture device, spawns the writer and ticker
    /// tasks, and resets the elapsed counter. Beginning from `Stopped`
    /// discards the previous artifact. On acquisition failure the recorder
    /// stays in its prior state with no stream open.
    pub async fn begin(&mut self) -> Result<(), SessionError> {
        if !self.state.can_begin() {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: "begin recording",
            });
        }

        let writer = ArtifactWriter::create(
            &self.artifacts_dir,
            self.config.sample_rate,
            self.config.channels,
        )
        .map_err(|e| SessionError::Microphone(e.to_string()))?;

        let mut stream = self.device.acquire().await?;
        let rx = match stream.start().await {
            Ok(rx) => rx,
            Err(e) => {
                // Stream never opened; no lock to release
                return Err(e.into());
            }
        };

        // Fresh take: previous artifact and counter are gone
        self.artifact = None;
        self.elapsed.store(0, Ordering::SeqCst);

        self.writer_task = Some(tokio::spawn(writer.drain(rx)));

        let elapsed = Arc::clone(&self.elapsed);
        self.ticker_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // First tick completes immediately; skip it
            interval.tick().await;
            loop {
                interval.tick().await;
                elapsed.fetch_add(1, Ordering::SeqCst);
            }
        }));

        self.stream = Some(stream);
        self.state = RecorderState::Recording;

        info!("Recording started on device '{}'", self.device.name());

        Ok(())
    }

    /// `Recording --end--> Stopped`
    ///
    /// Cancels the ticker, releases the device, and finalizes the buffered
    /// frames into the current artifact.
    pub async fn end(&mut self) -> Result<(), SessionError> {
        if self.state != RecorderState::Recording {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: "stop recording",
            });
        }

        if let Some(ticker) = self.ticker_task.take() {
            ticker.abort();
        }

        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => {
                self.state = RecorderState::Idle;
                return Err(SessionError::Microphone("no capture stream open".to_string()));
            }
        };
        if let Err(e) = stream.stop().await {
            error!("Failed to stop capture stream: {}", e);
            // The stream is gone either way; don't leave the writer dangling
            if let Some(task) = self.writer_task.take() {
                task.abort();
            }
            self.state = RecorderState::Idle;
            return Err(SessionError::Microphone(e.to_string()));
        }

        // The stream closed its channel, so the writer drains and finalizes
        let artifact = match self.writer_task.take() {
            Some(task) => match task.await {
                Ok(Ok(artifact)) => artifact,
                Ok(Err(e)) => {
                    self.state = RecorderState::Idle;
                    return Err(SessionError::Microphone(e.to_string()));
                }
                Err(e) => {
                    self.state = RecorderState::Idle;
                    return Err(SessionError::Microphone(format!("writer task failed: {}", e)));
                }
            },
            None => {
                self.state = RecorderState::Idle;
                return Err(SessionError::Microphone("no writer task running".to_string()));
            }
        };

        info!(
            "Recording stopped after {}s: {:?}",
            self.elapsed_seconds(),
            artifact.path
        );

        self.artifact = Some(artifact);
        self.state = RecorderState::Stopped;

        Ok(())
    }

    /// `Stopped --play--> Playing`
    pub fn play(&mut self) -> Result<(), SessionError> {
        if self.state != RecorderState::Stopped {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: "play recording",
            });
        }
        self.state = RecorderState::Playing;
        Ok(())
    }

    /// `Playing --pause--> Stopped`
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.state != RecorderState::Playing {
            return Err(SessionError::InvalidTransition {
                state: self.state,
                action: "pause playback",
            });
        }
        self.state = RecorderState::Stopped;
        Ok(())
    }

    /// Reset to `Idle`, clearing the artifact and elapsed counter.
    ///
    /// Called on every question advance. Force-releases the device if a
    /// recording is somehow still active.
    pub async fn reset(&mut self) {
        if self.state == RecorderState::Recording {
            warn!("Recorder reset while recording; forcing stop");
        }
        self.teardown().await;
    }

    /// Release everything: ticker cancelled, device stopped, writer joined.
    ///
    /// Safe to call from any state and idempotent. Must be invoked before the
    /// session view is disposed; an unreleased stream is a device leak.
    pub async fn teardown(&mut self) {
        if let Some(ticker) = self.ticker_task.take() {
            ticker.abort();
        }

        if let Some(mut stream) = self.stream.take() {
            if stream.is_capturing() {
                if let Err(e) = stream.stop().await {
                    warn!("Failed to stop capture stream during teardown: {}", e);
                }
            }
        }

        if let Some(task) = self.writer_task.take() {
            match task.await {
                Ok(Ok(artifact)) => {
                    info!("Discarding artifact from torn-down recording: {:?}", artifact.path)
                }
                Ok(Err(e)) => warn!("Writer failed during teardown: {}", e),
                Err(e) => warn!("Writer task join failed during teardown: {}", e),
            }
        }

        self.artifact = None;
        self.elapsed.store(0, Ordering::SeqCst);
        self.state = RecorderState::Idle;
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        // Best effort only; teardown() is the supported release path
        if let Some(ticker) = self.ticker_task.take() {
            ticker.abort();
        }
        if let Some(task) = self.writer_task.take() {
            task.abort();
        }
        if self.stream.is_some() {
            warn!("Recorder dropped with an open capture stream; call teardown() first");
        }
    }
}
