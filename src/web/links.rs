//! Callback and authorization links for the start page

use axum::http::header::HOST;
use axum::http::HeaderMap;
use url::Url;

use crate::app::{DataSharingClient, SessionRequest};
use crate::auth::ApplicationCredentials;
use crate::constants::server;
use crate::errors::{SessionError, SessionResult};

/// The two ways into the platform for one session
#[derive(Debug, Clone)]
pub struct ShareLinks {
    /// Key of the session both links belong to
    pub session_key: String,
    /// Guest (web-only) flow
    pub guest_url: Url,
    /// Consenting application flow
    pub consent_url: Url,
}

/// Base URL as seen by the browser, from `X-Forwarded-Proto` and `Host`
pub fn request_base_url(headers: &HeaderMap) -> Option<Url> {
    let host = headers.get(HOST)?.to_str().ok()?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| *value == "http" || *value == "https")
        .unwrap_or("http");

    Url::parse(&format!("{}://{}", scheme, host)).ok()
}

/// `<base>/return?sessionId=<key>`, keeping any path prefix of `base`
pub fn callback_url(base: &Url, session_key: &str) -> Url {
    let mut url = base.clone();
    let path = format!(
        "{}{}",
        base.path().trim_end_matches('/'),
        server::RETURN_PATH
    );
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair(server::SESSION_ID_PARAM, session_key);
    url
}

/// Establish a session and build both authorization links for it
pub async fn create_share_links(
    client: &dyn DataSharingClient,
    credentials: &ApplicationCredentials,
    base: &Url,
) -> SessionResult<ShareLinks> {
    let session = client
        .establish_session(&SessionRequest {
            app_id: credentials.application_id.clone(),
            contract_id: credentials.contract_id.clone(),
        })
        .await?;

    if session.session_key.is_empty() {
        return Err(SessionError::MissingSessionKey);
    }

    let callback = callback_url(base, &session.session_key);
    let guest_url = client.guest_share_url(&session, &callback)?;
    let consent_url =
        client.consent_share_url(&credentials.application_id, &session, &callback)?;

    Ok(ShareLinks {
        session_key: session.session_key,
        guest_url,
        consent_url,
    })
}
