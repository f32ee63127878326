//! Pulling and decrypting the files of a completed session
//!
//! The file list is fetched up front; a failure there fails the whole pull.
//! Each file is then fetched and decrypted independently, up to
//! `concurrency` at a time, and surfaces as a [`FileEvent`] in completion
//! order. A failing file becomes a [`FileEvent::Error`] and never stops the
//! others.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::app::client::http::HttpHandler;
use crate::app::decrypt::FileDecryptor;
use crate::app::models::{FileError, FileEvent, FileStream, RetrievedFile};
use crate::errors::{PullError, PullResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    file_list: Vec<FileListEntry>,
}

#[derive(Debug, Deserialize)]
struct FileListEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEnvelope {
    file_content: String,
    #[serde(default)]
    file_metadata: serde_json::Value,
}

/// Fetch the names of the files shared in a session
pub(crate) async fn list_files(
    http: &HttpHandler,
    query_url: &Url,
    session_key: &str,
) -> PullResult<Vec<String>> {
    let response = http.send(|client| client.get(query_url.clone())).await?;

    match response.status() {
        StatusCode::NOT_FOUND => {
            return Err(PullError::SessionNotFound {
                session_key: session_key.to_string(),
            });
        }
        status if !status.is_success() => {
            return Err(PullError::ServerError {
                status: status.as_u16(),
            });
        }
        _ => {}
    }

    let list: FileList = response.json().await?;
    tracing::info!(
        "Session {} has {} file(s) ready",
        session_key,
        list.file_list.len()
    );
    Ok(list.file_list.into_iter().map(|entry| entry.name).collect())
}

/// Stream the named files, decrypted
pub(crate) fn stream_files(
    http: Arc<HttpHandler>,
    query_url: Url,
    decryptor: FileDecryptor,
    file_names: Vec<String>,
    concurrency: usize,
) -> FileStream {
    let events = stream::iter(file_names)
        .map(move |file_name| {
            let http = Arc::clone(&http);
            let query_url = query_url.clone();
            let decryptor = decryptor.clone();
            async move {
                match fetch_file(&http, &query_url, &file_name, &decryptor).await {
                    Ok(file) => FileEvent::Data(file),
                    Err(error) => FileEvent::Error(FileError { file_name, error }),
                }
            }
        })
        .buffer_unordered(concurrency.max(1));

    Box::pin(events)
}

async fn fetch_file(
    http: &HttpHandler,
    query_url: &Url,
    file_name: &str,
    decryptor: &FileDecryptor,
) -> Result<RetrievedFile, String> {
    let mut url = query_url.clone();
    url.path_segments_mut()
        .map_err(|_| format!("cannot build file URL from {}", query_url))?
        .push(file_name);

    let response = http
        .send(|client| client.get(url.clone()))
        .await
        .map_err(|failure| PullError::from(failure).to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("platform responded with HTTP {}", status.as_u16()));
    }

    let envelope: FileEnvelope = response
        .json()
        .await
        .map_err(|e| format!("malformed file response: {}", e))?;

    let file_data = decryptor
        .decrypt_base64(&envelope.file_content)
        .map_err(|e| e.to_string())?;

    tracing::debug!("Decrypted {} ({} bytes)", file_name, file_data.len());
    Ok(RetrievedFile {
        file_name: file_name.to_string(),
        file_data,
        file_metadata: envelope.file_metadata,
    })
}
