use std::sync::Arc;
use tracing::{error, info, warn};

use super::sequencer::Sequencer;
use super::submission::{self, AnswerSubmission};
use crate::api::{Interview, InterviewApi, InterviewStatus, Question};
use crate::error::SessionError;
use crate::recorder::{Recorder, RecorderState};

/// Top-level orchestrator for one interview run.
///
/// Owns the session snapshot, the question sequencer, and the recording
/// state machine. All operations take `&mut self`, so at most one submission
/// is ever in flight and submissions are issued strictly in question order.
pub struct InterviewController {
    api: Arc<dyn InterviewApi>,
    recorder: Recorder,
    interview: Interview,
    sequencer: Sequencer,
    /// Set when the last answer was accepted but the end call has not yet
    /// succeeded; the only remaining action is to retry the end call.
    awaiting_end: bool,
    last_error: Option<String>,
}

impl InterviewController {
    /// Fetch the session and, if it is still `CREATED`, start it before any
    /// question is exposed.
    ///
    /// Failure of either call is a `Load` error: the session view is
    /// unusable and must not be retried automatically.
    pub async fn load(
        api: Arc<dyn InterviewApi>,
        recorder: Recorder,
        interview_id: u64,
    ) -> Result<Self, SessionError> {
        let mut interview = api
            .fetch_interview(interview_id)
            .await
            .map_err(|e| SessionError::Load(e.to_string()))?;

        if interview.status == InterviewStatus::Created {
            info!("Interview {} is newly created; starting it", interview_id);
            interview = api
                .start_interview(interview_id)
                .await
                .map_err(|e| SessionError::Load(e.to_string()))?;
        }

        let mut sequencer = Sequencer::new(interview.questions.clone());
        if interview.status == InterviewStatus::Completed {
            sequencer.finish();
        }

        info!(
            "Interview {} loaded: '{}' ({:?}, {} questions)",
            interview.id,
            interview.title,
            interview.status,
            sequencer.len()
        );

        Ok(Self {
            api,
            recorder,
            interview,
            sequencer,
            awaiting_end: false,
            last_error: None,
        })
    }

    /// The active question, or `None` once the run is complete
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() || self.awaiting_end {
            None
        } else {
            self.sequencer.current()
        }
    }

    /// Zero-based position and total question count, for display
    pub fn progress(&self) -> (usize, usize) {
        (self.sequencer.position(), self.sequencer.len())
    }

    pub fn recording_state(&self) -> RecorderState {
        self.recorder.state()
    }

    /// The finalized recording for the active question, if one exists.
    /// Preserved across failed submissions so the answer can be retried.
    pub fn current_artifact(&self) -> Option<&crate::capture::AudioArtifact> {
        self.recorder.artifact()
    }

    /// Provisional elapsed seconds of the current take (display only; the
    /// authoritative total duration comes from the server on end)
    pub fn elapsed_seconds(&self) -> u64 {
        self.recorder.elapsed_seconds()
    }

    pub fn is_complete(&self) -> bool {
        self.interview.status == InterviewStatus::Completed
    }

    /// The message of the last failed operation, if the most recent attempt
    /// failed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The latest server-confirmed session snapshot
    pub fn interview(&self) -> &Interview {
        &self.interview
    }

    /// Begin capturing audio for the active question
    pub async fn begin_recording(&mut self) -> Result<(), SessionError> {
        self.last_error = None;
        if self.is_complete() || self.awaiting_end {
            return self.fail(SessionError::Validation(
                "The interview is already finished.".to_string(),
            ));
        }
        let result = self.recorder.begin().await;
        result.or_else(|e| self.fail(e))
    }

    /// Stop capturing and finalize the current take
    pub async fn end_recording(&mut self) -> Result<(), SessionError> {
        self.last_error = None;
        let result = self.recorder.end().await;
        result.or_else(|e| self.fail(e))
    }

    /// Play back the just-recorded take
    pub fn playback(&mut self) -> Result<(), SessionError> {
        self.last_error = None;
        let result = self.recorder.play();
        result.or_else(|e| self.fail(e))
    }

    pub fn pause_playback(&mut self) -> Result<(), SessionError> {
        self.last_error = None;
        let result = self.recorder.pause();
        result.or_else(|e| self.fail(e))
    }

    /// Submit the answer for the active question, then advance or end.
    ///
    /// The answer combines the typed `text` with the recorder's artifact and
    /// provisional duration. Rejected while the recorder is mid-recording or
    /// mid-playback. On a failed submission everything local is preserved
    /// (artifact included) so the same answer can be retried.
    pub async fn submit_current_answer(&mut self, text: &str) -> Result<(), SessionError> {
        self.last_error = None;

        if self.is_complete() {
            return self.fail(SessionError::Validation(
                "The interview is already completed.".to_string(),
            ));
        }

        // The last answer is in; the only remaining action is the end call
        if self.awaiting_end {
            return self.finish_session().await;
        }

        if !self.recorder.state().can_submit() {
            return self.fail(SessionError::Validation(
                "Stop the recording before submitting your answer.".to_string(),
            ));
        }

        let question_id = match self.sequencer.current() {
            Some(q) => q.id,
            None => {
                return self.fail(SessionError::Validation(
                    "There is no active question to answer.".to_string(),
                ));
            }
        };

        let answer = AnswerSubmission {
            question_id,
            text: text.to_string(),
            audio_file_path: self
                .recorder
                .artifact()
                .map(|a| a.path.to_string_lossy().into_owned()),
            duration_secs: self.recorder.elapsed_seconds(),
        };

        let result = submission::submit(self.api.as_ref(), self.interview.id, answer).await;
        let snapshot = match result {
            Ok(snapshot) => snapshot,
            // Local session and recorder state stay untouched for retry
            Err(e) => return self.fail(e),
        };

        self.interview = snapshot;

        if self.sequencer.advance() {
            info!(
                "Advanced to question {}/{}",
                self.sequencer.position() + 1,
                self.sequencer.len()
            );
            self.recorder.reset().await;
            Ok(())
        } else {
            // Sequencer exhausted: end the session instead of advancing
            self.sequencer.finish();
            self.recorder.reset().await;
            self.awaiting_end = true;
            self.finish_session().await
        }
    }

    async fn finish_session(&mut self) -> Result<(), SessionError> {
        info!("All questions answered; ending interview {}", self.interview.id);

        let result = self.api.end_interview(self.interview.id).await;
        match result {
            Ok(snapshot) => {
                self.interview = snapshot;
                self.awaiting_end = false;
                info!(
                    "Interview {} completed (score: {:?}, duration: {:?} min)",
                    self.interview.id, self.interview.overall_score, self.interview.total_duration
                );
                Ok(())
            }
            Err(e) => {
                error!("Failed to end interview {}: {}", self.interview.id, e);
                self.fail(SessionError::Load(e.to_string()))
            }
        }
    }

    /// Release the capture device and cancel the elapsed ticker.
    ///
    /// Must be called when the session view is torn down; safe from any
    /// state, including mid-recording.
    pub async fn teardown(&mut self) {
        if self.recorder.state() == RecorderState::Recording {
            warn!("Session view torn down mid-recording; releasing capture device");
        }
        self.recorder.teardown().await;
    }

    fn fail(&mut self, err: SessionError) -> Result<(), SessionError> {
        self.last_error = Some(err.to_string());
        Err(err)
    }
}

impl std::fmt::Debug for InterviewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewController")
            .field("interview", &self.interview)
            .field("sequencer", &self.sequencer)
            .field("awaiting_end", &self.awaiting_end)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
