//! Sign-up email existence check.
//!
//! One `GET <endpoint>?email=...` per call, cancellable by the caller. There is
//! no retry, debounce or timeout here; the sign-up form owns that policy.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Outcome of one existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheckResult {
    pub exists: bool,
}

#[derive(Debug, Error)]
pub enum CheckError {
    /// The caller cancelled the check. Expected; not a failure to display.
    #[error("email check was cancelled")]
    Cancelled,

    /// The endpoint answered with a non-success status.
    #[error("email check failed with status {status}")]
    Failed { status: StatusCode },

    #[error("email check request could not be sent")]
    Request(#[source] reqwest::Error),

    #[error("email check response could not be decoded")]
    Decode(#[source] reqwest::Error),
}

impl CheckError {
    /// Whether this outcome comes from the caller's own cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CheckError::Cancelled)
    }

    /// Status code of a failed response, if the endpoint answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CheckError::Failed { status } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the account existence endpoint.
#[derive(Debug, Clone)]
pub struct EmailCheckClient {
    client: reqwest::Client,
    endpoint: String,
}

impl EmailCheckClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Reuse an existing HTTP client (connection pool).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask whether `email` already has an account.
    ///
    /// The address is sent as-is (URL-encoded); validation is the caller's
    /// job. When `cancel` fires before the response arrives the call resolves
    /// with [`CheckError::Cancelled`] and the in-flight request is dropped. A
    /// token that is already cancelled sends nothing. The token is consumed,
    /// so it cannot outlive the call it was made for.
    pub async fn check_email_exists(
        &self,
        email: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<EmailCheckResult, CheckError> {
        let Some(token) = cancel else {
            return self.send(email).await;
        };

        if token.is_cancelled() {
            debug!("Email check cancelled before sending");
            return Err(CheckError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Email check cancelled while in flight");
                Err(CheckError::Cancelled)
            }
            result = self.send(email) => result,
        }
    }

    async fn send(&self, email: &str) -> Result<EmailCheckResult, CheckError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(CheckError::Request)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Email check endpoint returned {}", status);
            return Err(CheckError::Failed { status });
        }

        response
            .json::<EmailCheckResult>()
            .await
            .map_err(CheckError::Decode)
    }
}

/// Caller-side tracker for one form field's checks.
///
/// Starting a new check cancels the previous one, so only the latest check's
/// result is ever acted upon.
#[derive(Debug, Default)]
pub struct CheckTracker {
    current: Option<CancellationToken>,
}

impl CheckTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any in-flight check and return the token for the next one.
    pub fn start(&mut self) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        token
    }

    /// Cancel the in-flight check, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
    }

    /// Whether a started check has not been cancelled yet.
    pub fn is_active(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }
}
