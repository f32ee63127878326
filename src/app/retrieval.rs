//! Consuming the files of a pull
//!
//! A [`FileSink`] receives every [`FileEvent`] of a pull, in whatever order
//! the client delivers them. [`drain`] returns only once the stream has
//! ended, which is the signal that every file has been handled.

use futures::StreamExt;
use tracing::{error, info};

use crate::app::models::{FileError, FileEvent, FileStream, RetrievedFile};
use crate::errors::ContentError;

/// Receives the files of a pull
pub trait FileSink: Send {
    /// Called for each file retrieved and decrypted
    fn on_file_data(&mut self, file: RetrievedFile);

    /// Called for each file that failed
    fn on_file_error(&mut self, failure: FileError);
}

/// Feed every event into `sink`; returns the number of events handled
pub async fn drain<S: FileSink + ?Sized>(mut files: FileStream, sink: &mut S) -> usize {
    let mut handled = 0;
    while let Some(event) = files.next().await {
        match event {
            FileEvent::Data(file) => sink.on_file_data(file),
            FileEvent::Error(failure) => sink.on_file_error(failure),
        }
        handled += 1;
    }
    handled
}

/// Parse a decrypted file as UTF-8 JSON
pub fn parse_file_content(file: &RetrievedFile) -> Result<serde_json::Value, ContentError> {
    let text = std::str::from_utf8(&file.file_data)?;
    Ok(serde_json::from_str(text)?)
}

/// What a drained pull produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalSummary {
    /// Names of the files retrieved and parsed
    pub retrieved: Vec<String>,
    /// Files that failed to retrieve, decrypt or parse
    pub failed: Vec<FileError>,
}

impl RetrievalSummary {
    /// Total number of files seen
    pub fn total(&self) -> usize {
        self.retrieved.len() + self.failed.len()
    }
}

/// Sink that logs each file and keeps only a summary.
///
/// File contents are dropped once logged.
#[derive(Debug, Default)]
pub struct LoggingSink {
    summary: RetrievalSummary,
}

impl LoggingSink {
    /// New, empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary of everything seen so far
    pub fn summary(&self) -> &RetrievalSummary {
        &self.summary
    }

    /// Consume the sink
    pub fn into_summary(self) -> RetrievalSummary {
        self.summary
    }
}

impl FileSink for LoggingSink {
    fn on_file_data(&mut self, file: RetrievedFile) {
        let content = match parse_file_content(&file) {
            Ok(content) => content,
            Err(e) => {
                self.on_file_error(FileError {
                    file_name: file.file_name,
                    error: e.to_string(),
                });
                return;
            }
        };

        info!("Retrieved: {}", file.file_name);
        info!("Metadata:\n{}", pretty(&file.file_metadata));
        info!("Content:\n{}", pretty(&content));
        self.summary.retrieved.push(file.file_name);
    }

    fn on_file_error(&mut self, failure: FileError) {
        error!(
            "Error retrieving file {}: {}",
            failure.file_name, failure.error
        );
        self.summary.failed.push(failure);
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
