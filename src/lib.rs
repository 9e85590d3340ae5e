pub mod api;
pub mod capture;
pub mod config;
pub mod error;
pub mod recorder;
pub mod session;

pub use api::{Answer, ApiError, HttpInterviewApi, Interview, InterviewApi, InterviewStatus, Question};
pub use capture::{
    ArtifactWriter, AudioArtifact, AudioFrame, CaptureConfig, CaptureDevice, CaptureError,
    CaptureStream, MockCaptureDevice, MockFailure,
};
pub use config::Config;
pub use error::SessionError;
pub use recorder::{format_elapsed, Recorder, RecorderState};
pub use session::{AnswerSubmission, InterviewController, Sequencer};
