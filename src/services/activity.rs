// src/services/activity.rs

use async_trait::async_trait;
use reqwest::{StatusCode, header};

use crate::config::Config;
use crate::error::ClientError;
use crate::models::activity::ActivitySubmission;
use crate::services::{api_error, base_url, build_client};
use crate::session::Session;

/// Remote operations on course activities.
#[async_trait]
pub trait ActivityService: Send + Sync {
    /// Fetches one student's submission for an activity.
    /// A student who never delivered gets a blank submission.
    async fn get_activity_submission(
        &self,
        session: &Session,
        course_id: i64,
        activity_id: i64,
        student_id: i64,
    ) -> Result<ActivitySubmission, ClientError>;

    /// Delivers the activity, replacing any previous delivery.
    async fn submit_activity(
        &self,
        session: &Session,
        course_id: i64,
        activity_id: i64,
        submission: &ActivitySubmission,
    ) -> Result<(), ClientError>;
}

pub struct HttpActivityService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpActivityService {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: base_url(config),
        })
    }

    fn activities_url(&self, course_id: i64) -> String {
        format!("{}/api/courses/{}/activities", self.base_url, course_id)
    }
}

#[async_trait]
impl ActivityService for HttpActivityService {
    async fn get_activity_submission(
        &self,
        session: &Session,
        course_id: i64,
        activity_id: i64,
        student_id: i64,
    ) -> Result<ActivitySubmission, ClientError> {
        let url = format!(
            "{}/{}/submissions/{}",
            self.activities_url(course_id),
            activity_id,
            student_id
        );

        let resp = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, session.bearer())
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(ActivitySubmission::blank());
        }
        if !resp.status().is_success() {
            let err = api_error(resp).await;
            tracing::error!(
                "Failed to fetch submission for activity {}: {}",
                activity_id,
                err
            );
            return Err(err);
        }

        Ok(resp.json().await?)
    }

    async fn submit_activity(
        &self,
        session: &Session,
        course_id: i64,
        activity_id: i64,
        submission: &ActivitySubmission,
    ) -> Result<(), ClientError> {
        let url = format!("{}/{}/submissions", self.activities_url(course_id), activity_id);

        let resp = self
            .client
            .put(&url)
            .header(header::AUTHORIZATION, session.bearer())
            .json(submission)
            .send()
            .await?;

        if !resp.status().is_success() {
            let err = api_error(resp).await;
            tracing::error!("Failed to submit activity {}: {}", activity_id, err);
            return Err(err);
        }

        tracing::info!("Submitted activity {} for course {}", activity_id, course_id);
        Ok(())
    }
}
