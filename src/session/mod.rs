//! Interview session orchestration
//!
//! This module provides the single-run controller stack:
//! - `Sequencer` walks the immutable question list in order
//! - `submission` validates an answer and reconciles the server snapshot
//! - `InterviewController` drives load/start, recording, submission, and the
//!   terminal end transition

mod controller;
mod sequencer;
mod submission;

pub use controller::InterviewController;
pub use sequencer::Sequencer;
pub use submission::{submit, AnswerSubmission};
