//! JSON-lines log of ranking requests and their leading results.
//!
//! Each call to [`EventLog::append`] writes exactly one line holding a
//! [`RankEvent`], written with a single `write_all` on a file opened in
//! append mode.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::File;
use chrono::{DateTime, Utc};
use localbites_core::{RankRequest, RankedRestaurant};
use localbites_fs::open_append_file;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of leading results captured per event.
pub const PREVIEW_LEN: usize = 3;

/// The request half of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSummary {
    /// Request latitude in degrees.
    pub lat: f64,
    /// Request longitude in degrees.
    pub lon: f64,
    /// Cuisine filter as supplied.
    pub cuisine: Option<String>,
    /// Free-text query as supplied.
    pub query: Option<String>,
}

/// A condensed ranked entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPreview {
    /// Restaurant name.
    pub name: String,
    /// Restaurant cuisine.
    pub cuisine: String,
    /// Distance from the request origin in miles.
    pub distance_miles: f64,
}

/// One logged ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEvent {
    /// When the ranking ran, in UTC.
    pub timestamp: DateTime<Utc>,
    /// What was asked.
    pub request: RequestSummary,
    /// How many entries the ranking returned.
    pub result_count: usize,
    /// The first [`PREVIEW_LEN`] entries.
    pub top_results: Vec<ResultPreview>,
}

impl RankEvent {
    /// Summarise a completed ranking.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        request: &RankRequest,
        results: &[RankedRestaurant<'_>],
    ) -> Self {
        let top_results = results
            .iter()
            .take(PREVIEW_LEN)
            .map(|entry| ResultPreview {
                name: entry.restaurant.name.clone(),
                cuisine: entry.restaurant.cuisine.clone(),
                distance_miles: entry.distance_miles,
            })
            .collect();
        Self {
            timestamp,
            request: RequestSummary {
                lat: request.origin.y,
                lon: request.origin.x,
                cuisine: request.cuisine.clone(),
                query: request.query.clone(),
            },
            result_count: results.len(),
            top_results,
        }
    }
}

/// Errors raised while recording events.
#[derive(Debug, Error)]
pub enum EventLogError {
    /// The log file could not be opened for appending.
    #[error("failed to open event log at {path}")]
    Open {
        /// Log path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The event could not be encoded.
    #[error("failed to encode ranking event")]
    Serialise {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The encoded line could not be written.
    #[error("failed to append to event log at {path}")]
    Write {
        /// Log path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}

/// Append-only handle on a JSON-lines event file.
#[derive(Debug)]
pub struct EventLog {
    path: Utf8PathBuf,
    file: File,
}

impl EventLog {
    /// Open `path` for appending, creating the file and its parents.
    ///
    /// # Errors
    /// Returns [`EventLogError::Open`] when the file cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, EventLogError> {
        let file = open_append_file(path).map_err(|source| EventLogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path this log writes to.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Append `event` as a single line.
    ///
    /// # Errors
    /// Returns [`EventLogError::Serialise`] if encoding fails and
    /// [`EventLogError::Write`] if the line cannot be written or flushed.
    pub fn append(&mut self, event: &RankEvent) -> Result<(), EventLogError> {
        let mut line =
            serde_json::to_vec(event).map_err(|source| EventLogError::Serialise { source })?;
        line.push(b'\n');
        self.file
            .write_all(&line)
            .and_then(|()| self.file.flush())
            .map_err(|source| EventLogError::Write {
                path: self.path.clone(),
                source,
            })?;
        log::debug!(
            "recorded ranking event with {} results to {}",
            event.result_count,
            self.path
        );
        Ok(())
    }
}
