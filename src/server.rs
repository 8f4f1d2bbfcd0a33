//! HTTP surface serving resolved message bundles to the frontend.
//!
//! - `GET /api/messages`: default locale
//! - `GET /api/messages/:locale`: locale from the path segment, falling back
//!   to the default when unsupported
//! - `GET /api/check-email?email=`: sign-up existence check, forwarded to
//!   the account service
//! - `GET /health`: enabled locales and bundle metrics

use crate::email_check::{CheckError, EmailCheckClient, EmailCheckResult};
use crate::i18n::{
    BundleLoadError, Locale, LocaleService, MetricsReport, Namespace, NamespaceMessages,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

#[derive(Clone)]
pub struct AppState {
    pub locales: Arc<LocaleService>,
    pub email_check: EmailCheckClient,
}

impl AppState {
    pub fn new(locales: LocaleService, email_check: EmailCheckClient) -> Self {
        Self {
            locales: Arc::new(locales),
            email_check,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CheckEmailQuery {
    email: String,
}

#[derive(Debug, Serialize)]
struct MessagesResponse {
    locale: Locale,
    messages: BTreeMap<Namespace, NamespaceMessages>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    default_locale: Locale,
    locales: Vec<Locale>,
    bundles: MetricsReport,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

enum ApiError {
    /// Fatal for the request; there is no partial bundle to serve.
    Messages(BundleLoadError),
    /// The account service could not answer.
    EmailCheck(CheckError),
}

impl From<BundleLoadError> for ApiError {
    fn from(e: BundleLoadError) -> Self {
        Self::Messages(e)
    }
}

impl From<CheckError> for ApiError {
    fn from(e: CheckError) -> Self {
        Self::EmailCheck(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Messages(e) => {
                error!("Message bundle unavailable: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "messages unavailable")
            }
            ApiError::EmailCheck(e) => {
                warn!("Email check failed: {}", e);
                (StatusCode::BAD_GATEWAY, "email check failed")
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/messages", get(default_messages))
        .route("/api/messages/:locale", get(locale_messages))
        .route("/api/check-email", get(check_email))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.locales.registry();
    Json(HealthResponse {
        status: "ok",
        default_locale: registry.default_locale(),
        locales: registry.enabled().to_vec(),
        bundles: state.locales.metrics().report(),
    })
}

async fn default_messages(
    State(state): State<AppState>,
) -> Result<Json<MessagesResponse>, ApiError> {
    messages(&state, None).await
}

async fn locale_messages(
    State(state): State<AppState>,
    Path(hint): Path<String>,
) -> Result<Json<MessagesResponse>, ApiError> {
    messages(&state, Some(hint.as_str())).await
}

async fn messages(
    state: &AppState,
    hint: Option<&str>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let (locale, bundle) = state.locales.messages_for(hint).await?;
    Ok(Json(MessagesResponse {
        locale,
        messages: bundle.namespaces().clone(),
    }))
}

/// Forward a sign-up existence check.
///
/// A client disconnect drops this future, which drops the upstream request.
async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<CheckEmailQuery>,
) -> Result<Json<EmailCheckResult>, ApiError> {
    let result = state
        .email_check
        .check_email_exists(&query.email, None)
        .await?;
    Ok(Json(result))
}
