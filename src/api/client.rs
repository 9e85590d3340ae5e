use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::types::Interview;

/// Errors from the interview backend boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body was not a valid interview snapshot
    #[error("invalid response: {0}")]
    Decode(String),
}

/// REST boundary of the interview backend.
///
/// Every call returns the full authoritative session snapshot. Submission is
/// not idempotent: retrying after an ambiguous transport failure may produce
/// a duplicate answer server-side.
#[async_trait::async_trait]
pub trait InterviewApi: Send + Sync {
    /// POST /interviews
    async fn create_interview(
        &self,
        user_id: u64,
        resume_id: u64,
        title: &str,
    ) -> Result<Interview, ApiError>;

    /// GET /interviews/{id}
    async fn fetch_interview(&self, id: u64) -> Result<Interview, ApiError>;

    /// POST /interviews/{id}/start
    async fn start_interview(&self, id: u64) -> Result<Interview, ApiError>;

    /// POST /interviews/{id}/end
    async fn end_interview(&self, id: u64) -> Result<Interview, ApiError>;

    /// POST /interviews/{id}/submit-answer
    async fn submit_answer(
        &self,
        id: u64,
        question_id: u64,
        answer_text: &str,
        audio_file_path: Option<&str>,
        duration_secs: u64,
    ) -> Result<Interview, ApiError>;
}

/// HTTP implementation of [`InterviewApi`].
///
/// The acting user id is passed in explicitly and sent as a bearer token on
/// every request; there is no ambient current-user context.
pub struct HttpInterviewApi {
    client: reqwest::Client,
    base_url: String,
    user_id: u64,
}

impl HttpInterviewApi {
    pub fn new(base_url: impl Into<String>, user_id: u64, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Interview, ApiError> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.user_id))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Interview>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl InterviewApi for HttpInterviewApi {
    async fn create_interview(
        &self,
        user_id: u64,
        resume_id: u64,
        title: &str,
    ) -> Result<Interview, ApiError> {
        debug!("POST /interviews (resume {}, '{}')", resume_id, title);
        let request = self.client.post(self.url("/interviews")).query(&[
            ("userId", user_id.to_string()),
            ("resumeId", resume_id.to_string()),
            ("title", title.to_string()),
        ]);
        self.execute(request).await
    }

    async fn fetch_interview(&self, id: u64) -> Result<Interview, ApiError> {
        debug!("GET /interviews/{}", id);
        let request = self.client.get(self.url(&format!("/interviews/{}", id)));
        self.execute(request).await
    }

    async fn start_interview(&self, id: u64) -> Result<Interview, ApiError> {
        debug!("POST /interviews/{}/start", id);
        let request = self
            .client
            .post(self.url(&format!("/interviews/{}/start", id)));
        self.execute(request).await
    }

    async fn end_interview(&self, id: u64) -> Result<Interview, ApiError> {
        debug!("POST /interviews/{}/end", id);
        let request = self
            .client
            .post(self.url(&format!("/interviews/{}/end", id)));
        self.execute(request).await
    }

    async fn submit_answer(
        &self,
        id: u64,
        question_id: u64,
        answer_text: &str,
        audio_file_path: Option<&str>,
        duration_secs: u64,
    ) -> Result<Interview, ApiError> {
        debug!("POST /interviews/{}/submit-answer (question {})", id, question_id);

        // The backend reads these as request parameters, not a JSON body
        let mut params = vec![
            ("questionId", question_id.to_string()),
            ("answerText", answer_text.to_string()),
            ("duration", duration_secs.to_string()),
        ];
        if let Some(path) = audio_file_path {
            params.push(("audioFilePath", path.to_string()));
        }

        let request = self
            .client
            .post(self.url(&format!("/interviews/{}/submit-answer", id)))
            .query(&params);
        self.execute(request).await
    }
}
