use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from acquiring or driving a capture device
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user or OS denied microphone access
    #[error("microphone access denied")]
    PermissionDenied,

    /// No capture device exists on this machine
    #[error("no capture device available")]
    DeviceUnavailable,

    /// The device was acquired but the stream failed
    #[error("capture stream error: {0}")]
    Stream(String),
}

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Configuration for a capture device
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Frame size in milliseconds (affects latency)
    pub frame_duration_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000, // 16kHz mono is plenty for speech
            channels: 1,
            frame_duration_ms: 100,
        }
    }
}

/// Microphone capture device
///
/// Acquiring yields an exclusive stream handle; exactly one hardware stream
/// is open between a successful `acquire` and the matching `stop` on the
/// returned stream. Callers must guarantee `stop` is eventually invoked on
/// every started stream, or the device lock leaks.
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Acquire the device, claiming the exclusive hardware lock
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, CaptureError>;

    /// Device name for logging
    fn name(&self) -> &str;
}

/// An acquired capture stream
#[async_trait::async_trait]
pub trait CaptureStream: Send {
    /// Start buffering audio
    ///
    /// Returns a channel receiver that will receive audio frames. The channel
    /// closes once the stream is stopped and all buffered frames are flushed.
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError>;

    /// Stop capturing and release the device lock
    async fn stop(&mut self) -> Result<(), CaptureError>;

    /// Whether the stream is currently capturing
    fn is_capturing(&self) -> bool;
}
