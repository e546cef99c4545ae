use crate::config::Settings;
use crate::core::executor::{classify_status, Disposition, ExecutorError, ExecutorState, RetryPolicy};
use crate::core::payload::parse_outcome;
use crate::models::{
    AdminStats, AdminUser, AnalysisOutcome, AnalysisPage, AnalysisRequest, HistoryEntry,
    LoginRequest, LoginResponse, MessageResponse, PictureResponse, RegisterRequest, ResumeFile,
    Session, UpdateProfileRequest, UpdateRoleRequest, UserPage, UserProfile,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors from the thin (non-retried) API calls
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("authentication failed (status {status}), please log in again")]
    Unauthorized { status: u16 },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Analyzer API client
///
/// Handles all communication with the resume analyzer backend:
/// - the resilient analysis submission (multipart upload with retries)
/// - auth (login/register)
/// - profile and history lookups
/// - the admin tables
pub struct ApiClient {
    base_url: String,
    retry: RetryPolicy,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, timeout: Duration, retry: RetryPolicy) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            retry,
            client,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.api.base_url.clone(),
            Duration::from_secs(settings.api.timeout_secs),
            RetryPolicy::new(
                settings.retry.max_attempts,
                Duration::from_millis(settings.retry.base_delay_ms),
            ),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // ==================== ANALYSIS ====================

    /// Submits a resume and job description for scoring, retrying
    /// transient failures with exponential backoff.
    ///
    /// 401/403 fail on the first attempt. A `PENDING_TIMEOUT` body is a
    /// terminal outcome, never retried: the backend is still scoring and
    /// the result lands in the history.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        session: Option<&Session>,
    ) -> Result<AnalysisOutcome, ExecutorError> {
        let mut state = self.retry.initial();
        let mut last_error: Option<ExecutorError> = None;
        let mut outcome: Option<AnalysisOutcome> = None;

        loop {
            match state {
                ExecutorState::Attempting { attempt } => {
                    match self.try_analyze(request, session).await {
                        Ok(result) => {
                            outcome = Some(result);
                            state = ExecutorState::Succeeded;
                        }
                        Err(err) => {
                            tracing::warn!(
                                "Analysis attempt {} of {} failed: {}",
                                attempt + 1,
                                self.retry.max_attempts,
                                err
                            );
                            state = self.retry.after_failure(attempt, err.is_retryable());
                            last_error = Some(err);
                        }
                    }
                }
                ExecutorState::Retrying {
                    next_attempt,
                    delay,
                } => {
                    tracing::debug!("Backing off {}ms before retry", delay.as_millis());
                    tokio::time::sleep(delay).await;
                    state = ExecutorState::Attempting {
                        attempt: next_attempt,
                    };
                }
                ExecutorState::Succeeded => {
                    return outcome.ok_or_else(|| {
                        ExecutorError::InvalidResponse("executor lost its result".into())
                    });
                }
                ExecutorState::Failed => {
                    return Err(last_error.unwrap_or_else(|| {
                        ExecutorError::Network("request was never attempted".into())
                    }));
                }
            }
        }
    }

    /// One attempt: multipart POST /api/analyze, classified by status.
    async fn try_analyze(
        &self,
        request: &AnalysisRequest,
        session: Option<&Session>,
    ) -> Result<AnalysisOutcome, ExecutorError> {
        let part = Part::bytes(request.resume.bytes.clone())
            .file_name(request.resume.file_name.clone());
        let form = Form::new()
            .part("resume", part)
            .text("jobDescription", request.job_description.clone());

        let mut builder = self.client.post(self.url("/api/analyze")).multipart(form);
        if let Some(session) = session {
            builder = builder.bearer_auth(&session.token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ExecutorError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ExecutorError::Network(e.to_string()))?;

        match classify_status(status, &body) {
            Disposition::Success => parse_outcome(&body),
            Disposition::Fatal(err) | Disposition::Retry(err) => Err(err),
        }
    }

    // ==================== AUTH ====================

    /// POST /api/auth/login
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        tracing::debug!("Logging in as {}", request.username);
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(request)
            .send()
            .await?;

        let login: LoginResponse = Self::read_json(response).await?;
        Ok(Session {
            token: login.token,
            username: login.username,
        })
    }

    /// POST /api/auth/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await?;

        Self::read_json(response).await
    }

    // ==================== PROFILE ====================

    /// GET /api/profile/user
    pub async fn profile(&self, session: &Session) -> Result<UserProfile, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/api/profile/user")), session)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// PUT /api/profile/user
    pub async fn update_profile(
        &self,
        session: &Session,
        request: &UpdateProfileRequest,
    ) -> Result<MessageResponse, ApiError> {
        let response = self
            .authed(self.client.put(self.url("/api/profile/user")), session)
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// POST /api/profile/picture (multipart field `file`)
    pub async fn upload_picture(
        &self,
        session: &Session,
        picture: &ResumeFile,
    ) -> Result<PictureResponse, ApiError> {
        let part = Part::bytes(picture.bytes.clone()).file_name(picture.file_name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .authed(self.client.post(self.url("/api/profile/picture")), session)
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// GET /api/profile/history, newest first
    pub async fn history(&self, session: &Session) -> Result<Vec<HistoryEntry>, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/api/profile/history")), session)
            .send()
            .await?;
        Self::read_json(response).await
    }

    // ==================== ADMIN ====================

    /// GET /api/admin/stats
    pub async fn admin_stats(&self, session: &Session) -> Result<AdminStats, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/api/admin/stats")), session)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// GET /api/admin/users?page&size
    pub async fn admin_users(
        &self,
        session: &Session,
        page: u32,
        size: u32,
    ) -> Result<UserPage, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/api/admin/users")), session)
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// GET /api/admin/analyses?page&size
    pub async fn admin_analyses(
        &self,
        session: &Session,
        page: u32,
        size: u32,
    ) -> Result<AnalysisPage, ApiError> {
        let response = self
            .authed(self.client.get(self.url("/api/admin/analyses")), session)
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// DELETE /api/admin/users/{id}
    pub async fn delete_user(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<MessageResponse, ApiError> {
        let response = self
            .authed(
                self.client
                    .delete(self.url(&format!("/api/admin/users/{}", id))),
                session,
            )
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// PUT /api/admin/users/{id}/role
    pub async fn update_role(
        &self,
        session: &Session,
        id: i64,
        role: &str,
    ) -> Result<AdminUser, ApiError> {
        let response = self
            .authed(
                self.client
                    .put(self.url(&format!("/api/admin/users/{}/role", id))),
                session,
            )
            .json(&UpdateRoleRequest {
                role: role.to_uppercase(),
            })
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// DELETE /api/admin/analyses/{id}
    pub async fn delete_analysis(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<MessageResponse, ApiError> {
        let response = self
            .authed(
                self.client
                    .delete(self.url(&format!("/api/admin/analyses/{}", id))),
                session,
            )
            .send()
            .await?;
        Self::read_json(response).await
    }

    // ==================== HELPERS ====================

    fn authed(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(&session.token)
    }

    /// Converts non-2xx responses to a typed error (with the backend's
    /// `{error}` message when present), then deserializes the body.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        let body = response.text().await?;

        if status == 401 || status == 403 {
            return Err(ApiError::Unauthorized { status });
        }
        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<crate::models::ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP error! Status: {}", status));
            return Err(ApiError::Api { status, message });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
