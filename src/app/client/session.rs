//! Session establishment and authorization URLs
//!
//! A session pairs the application with a contract. The two authorization
//! URLs carry its key and the callback the platform redirects back to.

use url::Url;

use crate::app::client::http::HttpHandler;
use crate::app::models::{Session, SessionRequest};
use crate::constants::platform;
use crate::errors::{SessionError, SessionResult};

/// Establish a session with the platform
pub(crate) async fn establish(
    http: &HttpHandler,
    session_url: &Url,
    request: &SessionRequest,
) -> SessionResult<Session> {
    tracing::info!(
        "Establishing session for application {} (contract {})",
        request.app_id,
        request.contract_id
    );

    let response = http
        .send(|client| client.post(session_url.clone()).json(request))
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SessionError::Rejected {
            status: status.as_u16(),
        });
    }

    let session: Session = response.json().await?;
    if session.session_key.trim().is_empty() {
        return Err(SessionError::MissingSessionKey);
    }

    match session.expires_at() {
        Some(expiry) => tracing::info!("Session established, expires {}", expiry),
        None => tracing::info!("Session established"),
    }
    Ok(session)
}

/// URL for the guest (web-only) private share flow
pub(crate) fn guest_url(base: &Url, session: &Session, callback_url: &Url) -> Url {
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("sessionKey", &session.session_key)
            .append_pair("callbackUrl", callback_url.as_str());
        if let Some(token) = &session.session_exchange_token {
            query.append_pair("sessionExchangeToken", token);
        }
    }
    url
}

/// URL for the consenting application flow
pub(crate) fn consent_url(
    base: &Url,
    application_id: &str,
    session: &Session,
    callback_url: &Url,
) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("appId", application_id)
        .append_pair("sessionKey", &session.session_key)
        .append_pair("callbackUrl", callback_url.as_str())
        .append_pair("resultVersion", platform::RESULT_VERSION);
    url
}
