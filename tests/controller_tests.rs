// Integration tests for the interview lifecycle: load/autostart, ordered
// submission, error recovery, and the terminal completed state.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

use common::{created_interview, question, FakeApi};
use interview_session::{
    CaptureConfig, InterviewApi, InterviewController, InterviewStatus, MockCaptureDevice, Recorder,
    RecorderState, SessionError,
};

fn recorder(dir: &TempDir) -> (Arc<MockCaptureDevice>, Recorder) {
    let device = Arc::new(MockCaptureDevice::new(CaptureConfig::default()));
    let recorder = Recorder::new(
        device.clone(),
        CaptureConfig::default(),
        dir.path().to_path_buf(),
    );
    (device, recorder)
}

fn three_question_api() -> Arc<FakeApi> {
    FakeApi::new(created_interview(vec![
        question(1, "Tell me about yourself."),
        question(2, "Explain ownership in Rust."),
        question(3, "Describe a production incident you handled."),
    ]))
}

#[tokio::test]
async fn load_autostarts_a_created_interview() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    assert_eq!(controller.interview().status, InterviewStatus::InProgress);
    assert_eq!(controller.current_question().unwrap().id, 1);
    assert_eq!(controller.progress(), (0, 3));
    assert!(controller.last_error().is_none());
}

#[tokio::test]
async fn three_valid_answers_complete_the_interview() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    controller.submit_current_answer("I am a backend engineer.").await.unwrap();
    assert_eq!(controller.current_question().unwrap().id, 2);

    controller.submit_current_answer("Each value has a single owner.").await.unwrap();
    assert_eq!(controller.current_question().unwrap().id, 3);

    controller.submit_current_answer("We rolled back and added a regression test.").await.unwrap();

    assert!(controller.is_complete());
    assert!(controller.current_question().is_none());
    assert_eq!(api.submit_calls(), 3);
    assert_eq!(api.end_calls(), 1);

    let interview = controller.interview();
    assert_eq!(interview.status, InterviewStatus::Completed);
    assert_eq!(interview.answers.len(), 3);
    assert!(interview.overall_score.is_some());
    assert!(interview.overall_feedback.is_some());
    assert!(interview.total_duration.is_some());
}

#[tokio::test]
async fn empty_answer_is_rejected_without_a_network_call() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    let err = controller.submit_current_answer("   \n ").await.unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
    assert_eq!(api.submit_calls(), 0, "validation failures never reach the network");
    assert!(controller.last_error().is_some());
    assert_eq!(controller.current_question().unwrap().id, 1);
}

#[tokio::test]
async fn audio_only_answer_is_accepted() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    controller.begin_recording().await.unwrap();
    controller.end_recording().await.unwrap();
    assert!(controller.current_artifact().is_some());

    controller.submit_current_answer("").await.unwrap();

    assert_eq!(api.submit_calls(), 1);
    {
        let interview = api.interview.lock().unwrap();
        assert!(interview.answers[0].audio_file_path.is_some());
    }
    // Recorder reset for the next question
    assert_eq!(controller.recording_state(), RecorderState::Idle);
    assert!(controller.current_artifact().is_none());
    assert_eq!(controller.current_question().unwrap().id, 2);
}

#[tokio::test]
async fn transport_failure_preserves_state_for_retry() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    controller.begin_recording().await.unwrap();
    controller.end_recording().await.unwrap();
    let artifact_path = controller.current_artifact().unwrap().path.clone();

    api.fail_submit.store(true, Ordering::SeqCst);
    let err = controller.submit_current_answer("my answer").await.unwrap_err();
    assert!(matches!(err, SessionError::Submission(_)));

    // Session, question index, and the recorded artifact are all untouched
    assert_eq!(controller.interview().status, InterviewStatus::InProgress);
    assert_eq!(controller.current_question().unwrap().id, 1);
    assert_eq!(controller.recording_state(), RecorderState::Stopped);
    assert_eq!(controller.current_artifact().unwrap().path, artifact_path);
    assert!(controller.last_error().is_some());

    // Retry succeeds without re-recording
    api.fail_submit.store(false, Ordering::SeqCst);
    controller.submit_current_answer("my answer").await.unwrap();
    assert_eq!(controller.current_question().unwrap().id, 2);
    assert!(controller.last_error().is_none());
}

#[tokio::test]
async fn submission_is_rejected_while_recording() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    controller.begin_recording().await.unwrap();
    let err = controller.submit_current_answer("typed mid-recording").await.unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
    assert_eq!(api.submit_calls(), 0);
    assert_eq!(controller.recording_state(), RecorderState::Recording);

    // After stopping, the same submission goes through
    controller.end_recording().await.unwrap();
    controller.submit_current_answer("typed mid-recording").await.unwrap();
    assert_eq!(api.submit_calls(), 1);
    assert_eq!(device.active_streams(), 0);
}

#[tokio::test]
async fn failed_end_call_is_retried_not_resubmitted() {
    let api = FakeApi::new(created_interview(vec![question(1, "Only question.")]));
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    api.fail_end.store(true, Ordering::SeqCst);
    let err = controller.submit_current_answer("done").await.unwrap_err();
    assert!(matches!(err, SessionError::Load(_)));
    assert!(!controller.is_complete());
    assert!(controller.current_question().is_none(), "no further question is exposed");
    assert_eq!(api.submit_calls(), 1);
    assert_eq!(api.end_calls(), 1);

    // The next action is the end call, never another submit
    api.fail_end.store(false, Ordering::SeqCst);
    controller.submit_current_answer("ignored").await.unwrap();
    assert!(controller.is_complete());
    assert_eq!(api.submit_calls(), 1, "answer was not submitted twice");
    assert_eq!(api.end_calls(), 2);
}

#[tokio::test]
async fn fetch_failure_is_a_terminal_load_error() {
    let api = three_question_api();
    api.fail_fetch.store(true, Ordering::SeqCst);
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let err = InterviewController::load(api.clone(), rec, 1).await.unwrap_err();
    assert!(matches!(err, SessionError::Load(_)));
}

#[tokio::test]
async fn completed_interview_loads_as_terminal() {
    let mut interview = created_interview(vec![question(1, "Already answered.")]);
    interview.status = InterviewStatus::Completed;
    interview.overall_score = Some(9.0);
    let api = FakeApi::new(interview);
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    assert!(controller.is_complete());
    assert!(controller.current_question().is_none());

    // No further mutation is accepted
    assert!(matches!(
        controller.begin_recording().await.unwrap_err(),
        SessionError::Validation(_)
    ));
    assert!(matches!(
        controller.submit_current_answer("late").await.unwrap_err(),
        SessionError::Validation(_)
    ));
    assert_eq!(api.submit_calls(), 0);
}

#[tokio::test]
async fn teardown_mid_recording_releases_the_device() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();

    controller.begin_recording().await.unwrap();
    assert_eq!(device.active_streams(), 1);

    controller.teardown().await;
    assert_eq!(device.active_streams(), 0);
    assert_eq!(controller.recording_state(), RecorderState::Idle);
}

#[tokio::test]
async fn created_interview_never_reenters_created() {
    let api = three_question_api();
    let dir = TempDir::new().unwrap();
    let (_device, rec) = recorder(&dir);

    let mut controller = InterviewController::load(api.clone(), rec, 1).await.unwrap();
    assert_eq!(controller.interview().status, InterviewStatus::InProgress);

    // Every snapshot the server hands back after a submit stays in progress
    controller.submit_current_answer("first").await.unwrap();
    assert_eq!(controller.interview().status, InterviewStatus::InProgress);

    // The fake's create path never downgrades the status either
    let fresh = api.create_interview(1, 7, "again").await.unwrap();
    assert_ne!(controller.interview().status, InterviewStatus::Created);
    assert_eq!(fresh.title, "again");
}
