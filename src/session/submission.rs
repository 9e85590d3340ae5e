use tracing::{error, info};

use crate::api::{Interview, InterviewApi};
use crate::error::SessionError;

/// One answer ready to be sent to the scoring backend
#[derive(Debug, Clone)]
pub struct AnswerSubmission {
    pub question_id: u64,
    /// Typed answer text; trimmed before validation
    pub text: String,
    /// Path of the finalized audio artifact, if one was recorded
    pub audio_file_path: Option<String>,
    /// Provisional client-side duration in seconds
    pub duration_secs: u64,
}

impl AnswerSubmission {
    /// An answer is valid iff it carries non-empty text or a recorded artifact
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() || self.audio_file_path.is_some()
    }
}

/// Validate and submit one answer, returning the server's authoritative
/// session snapshot.
///
/// Invalid answers fail fast with `Validation` and never touch the network.
/// Transport or server failures surface as `Submission` and leave all local
/// state untouched, so the caller may retry without re-recording. A retry
/// after an ambiguous transport failure may duplicate the answer server-side;
/// the backend owns deduplication, not this client.
pub async fn submit(
    api: &dyn InterviewApi,
    interview_id: u64,
    submission: AnswerSubmission,
) -> Result<Interview, SessionError> {
    if !submission.is_valid() {
        return Err(SessionError::Validation(
            "Please provide a typed or recorded answer before submitting.".to_string(),
        ));
    }

    let text = submission.text.trim();

    info!(
        "Submitting answer for question {} ({} chars, audio: {}, {}s)",
        submission.question_id,
        text.len(),
        submission.audio_file_path.is_some(),
        submission.duration_secs,
    );

    match api
        .submit_answer(
            interview_id,
            submission.question_id,
            text,
            submission.audio_file_path.as_deref(),
            submission.duration_secs,
        )
        .await
    {
        Ok(snapshot) => {
            info!(
                "Answer accepted; server reports {} answers",
                snapshot.answers.len()
            );
            Ok(snapshot)
        }
        Err(e) => {
            error!("Answer submission failed: {}", e);
            Err(SessionError::Submission(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only_answer_is_valid() {
        let s = AnswerSubmission {
            question_id: 1,
            text: "an answer".to_string(),
            audio_file_path: None,
            duration_secs: 0,
        };
        assert!(s.is_valid());
    }

    #[test]
    fn audio_only_answer_is_valid() {
        let s = AnswerSubmission {
            question_id: 1,
            text: String::new(),
            audio_file_path: Some("/tmp/answer.wav".to_string()),
            duration_secs: 12,
        };
        assert!(s.is_valid());
    }

    #[test]
    fn whitespace_text_without_audio_is_invalid() {
        let s = AnswerSubmission {
            question_id: 1,
            text: "   \n\t ".to_string(),
            audio_file_path: None,
            duration_secs: 0,
        };
        assert!(!s.is_valid());
    }
}
