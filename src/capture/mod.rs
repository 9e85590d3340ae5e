//! Microphone capture
//!
//! Wraps the platform capture primitive behind the [`CaptureDevice`] /
//! [`CaptureStream`] traits: `acquire` claims the exclusive device lock,
//! `start` begins buffering frames, `stop` releases the lock. Frames are
//! finalized into a single addressable WAV artifact by [`ArtifactWriter`].

pub mod artifact;
pub mod backend;
pub mod mock;

pub use artifact::{ArtifactWriter, AudioArtifact};
pub use backend::{AudioFrame, CaptureConfig, CaptureDevice, CaptureError, CaptureStream};
pub use mock::{MockCaptureDevice, MockFailure};
