//! Interview backend REST boundary
//!
//! JSON over HTTP, owned by an external service:
//! - POST /interviews                       create a session
//! - GET  /interviews/{id}                  fetch the current snapshot
//! - POST /interviews/{id}/start            CREATED -> IN_PROGRESS
//! - POST /interviews/{id}/end              -> COMPLETED with overall feedback
//! - POST /interviews/{id}/submit-answer    append one answer

mod client;
mod types;

pub use client::{ApiError, HttpInterviewApi, InterviewApi};
pub use types::{Answer, Interview, InterviewStatus, Question};
