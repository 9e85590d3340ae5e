use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

use super::backend::{AudioFrame, CaptureConfig, CaptureDevice, CaptureError, CaptureStream};

/// Failure mode for the mock device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Acquisition succeeds
    None,
    /// Acquisition fails as if the user denied microphone access
    PermissionDenied,
    /// Acquisition fails as if no microphone exists
    DeviceUnavailable,
}

/// Deterministic in-memory capture device for tests and headless demos.
///
/// Each started stream emits a fixed number of silent frames immediately,
/// then holds the channel open until stopped. The device tracks how many
/// streams are currently open so tests can assert the hardware lock is
/// released.
pub struct MockCaptureDevice {
    config: CaptureConfig,
    failure: MockFailure,
    frames_per_recording: usize,
    active_streams: Arc<AtomicUsize>,
}

impl MockCaptureDevice {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            failure: MockFailure::None,
            frames_per_recording: 10,
            active_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Configure the acquisition failure mode
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = failure;
        self
    }

    /// Number of frames each recording produces
    pub fn with_frames_per_recording(mut self, frames: usize) -> Self {
        self.frames_per_recording = frames;
        self
    }

    /// Number of streams currently holding the device lock
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::SeqCst)
    }

    /// Handle to the open-stream counter, for assertions after the device
    /// has been moved into a recorder
    pub fn stream_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.active_streams)
    }
}

#[async_trait::async_trait]
impl CaptureDevice for MockCaptureDevice {
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, CaptureError> {
        match self.failure {
            MockFailure::PermissionDenied => return Err(CaptureError::PermissionDenied),
            MockFailure::DeviceUnavailable => return Err(CaptureError::DeviceUnavailable),
            MockFailure::None => {}
        }

        Ok(Box::new(MockCaptureStream {
            config: self.config.clone(),
            frames: self.frames_per_recording,
            active_streams: Arc::clone(&self.active_streams),
            shutdown: None,
            capturing: false,
        }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

struct MockCaptureStream {
    config: CaptureConfig,
    frames: usize,
    active_streams: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
    capturing: bool,
}

#[async_trait::async_trait]
impl CaptureStream for MockCaptureStream {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        if self.capturing {
            return Err(CaptureError::Stream("stream already started".to_string()));
        }

        let (tx, rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let config = self.config.clone();
        let frames = self.frames;

        tokio::spawn(async move {
            let samples_per_frame = (config.sample_rate as u64 * config.frame_duration_ms / 1000)
                as usize
                * config.channels as usize;

            for i in 0..frames {
                let frame = AudioFrame {
                    samples: vec![0i16; samples_per_frame],
                    sample_rate: config.sample_rate,
                    channels: config.channels,
                    timestamp_ms: i as u64 * config.frame_duration_ms,
                };
                if tx.send(frame).await.is_err() {
                    return;
                }
            }

            // Hold the channel open until the stream is stopped, mirroring a
            // real device that keeps the hardware lock until released
            let _ = shutdown_rx.await;
        });

        self.shutdown = Some(shutdown_tx);
        self.capturing = true;
        self.active_streams.fetch_add(1, Ordering::SeqCst);

        info!("Mock capture stream started ({} frames)", frames);

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        if !self.capturing {
            return Err(CaptureError::Stream("stream not started".to_string()));
        }

        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.capturing = false;
        self.active_streams.fetch_sub(1, Ordering::SeqCst);

        info!("Mock capture stream stopped");

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }
}

impl Drop for MockCaptureStream {
    fn drop(&mut self) {
        // Release the lock if the stream was dropped without an explicit stop
        if self.capturing {
            if let Some(shutdown) = self.shutdown.take() {
                let _ = shutdown.send(());
            }
            self.active_streams.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
