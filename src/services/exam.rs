// src/services/exam.rs

use async_trait::async_trait;
use reqwest::{StatusCode, header};
use validator::Validate;

use crate::config::Config;
use crate::error::ClientError;
use crate::models::exam::{CreateExamRequest, ExamItem, ExamSubmission, SubmittedExamItem};
use crate::services::{api_error, base_url, build_client};
use crate::session::Session;

/// Remote operations on exams, course-scoped.
///
/// A trait so screens and the attempt model can be driven against a fake
/// in tests; `HttpExamService` is the real thing.
#[async_trait]
pub trait ExamService: Send + Sync {
    /// Fetches the stored submission of one student for one exam.
    ///
    /// The exam's items travel along so a student who never submitted gets
    /// a fresh blank submission shaped like the exam, and so a fetched
    /// submission can be checked against the exam before it is handed out.
    async fn get_exam_submission(
        &self,
        session: &Session,
        course_id: i64,
        exam_id: i64,
        student_id: i64,
        items: &[ExamItem],
    ) -> Result<ExamSubmission, ClientError>;

    /// Sends the full ordered answer sequence in one call.
    /// All-or-nothing from the caller's perspective.
    async fn submit_exam(
        &self,
        session: &Session,
        course_id: i64,
        exam_id: i64,
        items: &[SubmittedExamItem],
    ) -> Result<(), ClientError>;

    /// Creates a new exam in a course (teacher role).
    async fn create_exam(
        &self,
        session: &Session,
        course_id: i64,
        req: &CreateExamRequest,
    ) -> Result<(), ClientError>;
}

pub struct HttpExamService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExamService {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: base_url(config),
        })
    }

    fn exams_url(&self, course_id: i64) -> String {
        format!("{}/api/courses/{}/exams", self.base_url, course_id)
    }
}

#[async_trait]
impl ExamService for HttpExamService {
    async fn get_exam_submission(
        &self,
        session: &Session,
        course_id: i64,
        exam_id: i64,
        student_id: i64,
        items: &[ExamItem],
    ) -> Result<ExamSubmission, ClientError> {
        let url = format!(
            "{}/{}/submissions/{}",
            self.exams_url(course_id),
            exam_id,
            student_id
        );

        let resp = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, session.bearer())
            .send()
            .await?;

        // No stored submission yet: the student simply has not submitted.
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(ExamSubmission::blank(items));
        }
        if !resp.status().is_success() {
            let err = api_error(resp).await;
            tracing::error!("Failed to fetch submission for exam {}: {}", exam_id, err);
            return Err(err);
        }

        let submission: ExamSubmission = resp.json().await?;
        submission
            .conforms_to(items)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(submission)
    }

    async fn submit_exam(
        &self,
        session: &Session,
        course_id: i64,
        exam_id: i64,
        items: &[SubmittedExamItem],
    ) -> Result<(), ClientError> {
        let url = format!("{}/{}/submissions", self.exams_url(course_id), exam_id);

        let resp = self
            .client
            .put(&url)
            .header(header::AUTHORIZATION, session.bearer())
            .json(&items)
            .send()
            .await?;

        if !resp.status().is_success() {
            let err = api_error(resp).await;
            tracing::error!("Failed to submit exam {}: {}", exam_id, err);
            return Err(err);
        }

        tracing::info!(
            "Submitted exam {} for course {} ({} items)",
            exam_id,
            course_id,
            items.len()
        );
        Ok(())
    }

    async fn create_exam(
        &self,
        session: &Session,
        course_id: i64,
        req: &CreateExamRequest,
    ) -> Result<(), ClientError> {
        // Reject bad payloads before they leave the client.
        req.validate()?;

        let resp = self
            .client
            .post(&self.exams_url(course_id))
            .header(header::AUTHORIZATION, session.bearer())
            .json(req)
            .send()
            .await?;

        if !resp.status().is_success() {
            let err = api_error(resp).await;
            tracing::error!("Failed to create exam in course {}: {}", course_id, err);
            return Err(err);
        }

        tracing::info!("Created exam '{}' in course {}", req.title, course_id);
        Ok(())
    }
}
