use thiserror::Error;

use crate::recorder::RecorderState;

/// Error taxonomy for a single interview run.
///
/// Capture and submission errors are recoverable: the controller stays in its
/// last valid state and the caller may retry the same action. `Load` is
/// terminal for the session view.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Microphone access denied. Please allow microphone access and try again.")]
    PermissionDenied,

    #[error("No audio capture device available.")]
    DeviceUnavailable,

    #[error("Microphone error: {0}")]
    Microphone(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to submit answer: {0}")]
    Submission(String),

    #[error("Failed to load interview: {0}")]
    Load(String),

    #[error("Cannot {action} while recorder is {state:?}")]
    InvalidTransition {
        state: RecorderState,
        action: &'static str,
    },
}

impl From<crate::capture::CaptureError> for SessionError {
    fn from(err: crate::capture::CaptureError) -> Self {
        use crate::capture::CaptureError;
        match err {
            CaptureError::PermissionDenied => SessionError::PermissionDenied,
            CaptureError::DeviceUnavailable => SessionError::DeviceUnavailable,
            CaptureError::Stream(msg) => SessionError::Microphone(msg),
        }
    }
}
