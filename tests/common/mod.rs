// Shared fixtures for integration tests: an in-memory interview backend and
// interview builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use interview_session::{
    Answer, ApiError, Interview, InterviewApi, InterviewStatus, Question,
};

pub fn question(id: u64, text: &str) -> Question {
    Question {
        id,
        question_text: text.to_string(),
        question_type: Some("technical".to_string()),
        difficulty_level: Some("medium".to_string()),
    }
}

pub fn created_interview(questions: Vec<Question>) -> Interview {
    Interview {
        id: 1,
        title: "Backend Engineer Screen".to_string(),
        status: InterviewStatus::Created,
        started_at: None,
        ended_at: None,
        total_duration: None,
        overall_score: None,
        overall_feedback: None,
        created_at: None,
        resume_id: Some(7),
        questions,
        answers: vec![],
    }
}

/// In-memory interview backend with switchable failure injection.
///
/// Mirrors the real server's behavior: each mutation returns the full
/// updated snapshot, and `end` computes the overall feedback.
pub struct FakeApi {
    pub interview: Mutex<Interview>,
    pub submit_calls: AtomicUsize,
    pub end_calls: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_submit: AtomicBool,
    pub fail_end: AtomicBool,
}

impl FakeApi {
    pub fn new(interview: Interview) -> Arc<Self> {
        Arc::new(Self {
            interview: Mutex::new(interview),
            submit_calls: AtomicUsize::new(0),
            end_calls: AtomicUsize::new(0),
            fail_fetch: AtomicBool::new(false),
            fail_submit: AtomicBool::new(false),
            fail_end: AtomicBool::new(false),
        })
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn end_calls(&self) -> usize {
        self.end_calls.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Interview {
        self.interview.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl InterviewApi for FakeApi {
    async fn create_interview(
        &self,
        _user_id: u64,
        _resume_id: u64,
        title: &str,
    ) -> Result<Interview, ApiError> {
        let mut interview = self.snapshot();
        interview.title = title.to_string();
        Ok(interview)
    }

    async fn fetch_interview(&self, _id: u64) -> Result<Interview, ApiError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(self.snapshot())
    }

    async fn start_interview(&self, _id: u64) -> Result<Interview, ApiError> {
        let mut interview = self.interview.lock().unwrap();
        interview.status = InterviewStatus::InProgress;
        Ok(interview.clone())
    }

    async fn end_interview(&self, _id: u64) -> Result<Interview, ApiError> {
        self.end_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_end.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection reset by peer".to_string()));
        }
        let mut interview = self.interview.lock().unwrap();
        interview.status = InterviewStatus::Completed;
        interview.overall_score = Some(8.2);
        interview.overall_feedback = Some("Solid fundamentals.".to_string());
        interview.total_duration = Some(12);
        Ok(interview.clone())
    }

    async fn submit_answer(
        &self,
        _id: u64,
        question_id: u64,
        answer_text: &str,
        audio_file_path: Option<&str>,
        duration_secs: u64,
    ) -> Result<Interview, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection reset by peer".to_string()));
        }
        let mut interview = self.interview.lock().unwrap();
        let answer = Answer {
            id: interview.answers.len() as u64 + 1,
            answer_text: Some(answer_text.to_string()),
            audio_file_path: audio_file_path.map(|p| p.to_string()),
            duration: Some(duration_secs as i64),
            score: Some(7.0),
            feedback: Some("Good answer.".to_string()),
            strengths: None,
            improvements: None,
            answered_at: None,
            question_id,
            question_text: None,
        };
        interview.answers.push(answer);
        Ok(interview.clone())
    }
}
