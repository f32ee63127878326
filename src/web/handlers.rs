//! Route handlers
//!
//! `GET /` starts a share; `GET /return` is where the platform sends the
//! user back. Every failure renders the error page with a status that says
//! what went wrong.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::app::{drain, LoggingSink, PullRequest, ShareResult};
use crate::web::links::{create_share_links, request_base_url};
use crate::web::state::AppState;
use crate::web::templates::{ErrorTemplate, IndexTemplate, ReturnTemplate};

/// A failed request, rendered as the error page
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    detail: Option<String>,
}

impl PageError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
        }
    }

    /// The user declined or cancelled; not a server fault
    fn declined() -> Self {
        Self {
            status: StatusCode::OK,
            detail: None,
        }
    }

    /// HTTP status of the rendered page
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let page = ErrorTemplate {
            message: "Your data could not be shared.".to_string(),
            detail: self.detail,
        };
        (self.status, page).into_response()
    }
}

/// Handler for the start page.
pub async fn start(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<IndexTemplate, PageError> {
    let base = state
        .settings()
        .public_base_url
        .clone()
        .or_else(|| request_base_url(&headers))
        .ok_or_else(|| {
            warn!("Start request without a usable Host header");
            PageError::new(
                StatusCode::BAD_REQUEST,
                "Could not determine this server's address.",
            )
        })?;

    let links = create_share_links(state.client(), state.credentials(), &base)
        .await
        .map_err(|e| {
            error!("Failed to establish session: {}", e);
            PageError::new(
                StatusCode::BAD_GATEWAY,
                "The data-sharing platform could not start a session. Please try again.",
            )
        })?;

    if state.settings().verify_session {
        state.sessions().issue(&links.session_key).await;
    }
    info!("Presenting share links for session {}", links.session_key);

    Ok(IndexTemplate {
        web_url: links.guest_url.to_string(),
        app_url: links.consent_url.to_string(),
    })
}

/// Query parameters the platform appends to the callback URL
#[derive(Debug, Deserialize)]
pub struct ReturnParams {
    /// Outcome of the authorization flow
    pub result: Option<String>,
    /// Session key echoed back from the callback URL
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Handler for the return route.
pub async fn share_return(
    State(state): State<AppState>,
    params: Result<Query<ReturnParams>, QueryRejection>,
) -> Result<ReturnTemplate, PageError> {
    // Repeated keys cannot be a clean SUCCESS
    let Query(params) = params.map_err(|rejection| {
        info!("Unusable return query: {}", rejection);
        PageError::declined()
    })?;

    let outcome = ShareResult::parse(params.result.as_deref());
    if !outcome.is_success() {
        info!("Share not approved: {:?}", outcome);
        return Err(PageError::declined());
    }

    let session_key = params
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| PageError::new(StatusCode::BAD_REQUEST, "The session id is missing."))?;

    if state.settings().verify_session && !state.sessions().redeem(&session_key).await {
        warn!("Rejected return for unknown session {}", session_key);
        return Err(PageError::new(
            StatusCode::FORBIDDEN,
            "This share link is unknown or has expired.",
        ));
    }

    let files = state
        .client()
        .pull_session_data(PullRequest {
            session_key: session_key.clone(),
            private_key: state.credentials().private_key.clone(),
        })
        .await
        .map_err(|e| {
            error!("Failed to pull data for session {}: {}", session_key, e);
            PageError::new(
                StatusCode::BAD_GATEWAY,
                "Your data could not be retrieved from the platform.",
            )
        })?;

    let mut sink = LoggingSink::new();
    let pull_timeout = state.settings().pull_timeout;
    if tokio::time::timeout(pull_timeout, drain(files, &mut sink))
        .await
        .is_err()
    {
        warn!(
            "Pull for session {} did not complete within {:?}",
            session_key, pull_timeout
        );
        return Err(PageError::new(
            StatusCode::GATEWAY_TIMEOUT,
            "Retrieving your data took too long.",
        ));
    }

    let summary = sink.into_summary();
    info!(
        "Data fetching complete for session {}: {} retrieved, {} failed",
        session_key,
        summary.retrieved.len(),
        summary.failed.len()
    );

    Ok(ReturnTemplate {
        retrieved: summary.retrieved.len(),
        failed: summary.failed.len(),
    })
}
