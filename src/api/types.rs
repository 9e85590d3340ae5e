use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Server-side interview status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewStatus {
    Created,
    InProgress,
    Completed,
}

/// One complete interview run, as returned by the backend.
///
/// The server is authoritative for this snapshot: the status, the aggregated
/// answer list, and any scores or feedback already computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: u64,
    pub title: String,
    pub status: InterviewStatus,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub ended_at: Option<NaiveDateTime>,
    /// Total duration in minutes, computed by the server on end
    #[serde(default)]
    pub total_duration: Option<i64>,
    /// Overall score on a 0-10 scale, computed by the server on end
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub overall_feedback: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub resume_id: Option<u64>,
    /// Ordered question sequence; fixed once the interview is generated
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Answers submitted so far, in submission order
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// An AI-generated interview question. Immutable once the interview loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u64,
    pub question_text: String,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
}

/// A submitted answer with any feedback the scoring backend has assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: u64,
    #[serde(default)]
    pub answer_text: Option<String>,
    #[serde(default)]
    pub audio_file_path: Option<String>,
    /// Recorded duration in seconds, as reported at submission time
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub strengths: Option<String>,
    #[serde(default)]
    pub improvements: Option<String>,
    #[serde(default)]
    pub answered_at: Option<NaiveDateTime>,
    pub question_id: u64,
    #[serde(default)]
    pub question_text: Option<String>,
}
