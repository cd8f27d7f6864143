//! Wire types for the course service and the transport seam.
//!
//! The core never opens a connection itself. Whoever hosts it provides a
//! [`Transport`] (or, in the browser, performs the `fetch` and hands the
//! response back), and the types here fix what goes over the wire.

use serde::{Deserialize, Serialize};

use crate::course::{null_as_default, Course, SearchResult};
use crate::error::{Result, SieveError};
use crate::slot::BusySet;

pub const FILTER_COURSES_PATH: &str = "/api/filter-courses";
pub const DOWNLOAD_COURSES_PATH: &str = "/api/download-courses";

/// File name the exported spreadsheet is saved under.
pub const EXPORT_FILENAME: &str = "selected_courses.xlsx";

// ── Requests ────────────────────────────────────────────────────────────────

/// Body of `POST /api/filter-courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    pub department: String,
    pub grade: u8,
    /// `"<weekdayOrdinal>-<periodSymbol>"` keys of every busy slot.
    pub busy_times: Vec<String>,
}

impl FilterRequest {
    pub fn new(department: &str, grade: u8, busy: &BusySet) -> Self {
        Self {
            department: department.to_string(),
            grade,
            busy_times: busy.to_wire_keys(),
        }
    }

    /// Rebuild the busy set carried by this request.
    pub fn busy_set(&self) -> Result<BusySet> {
        BusySet::from_wire_keys(&self.busy_times)
    }
}

/// Body of `POST /api/download-courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub course_codes: Vec<String>,
}

// ── Responses ───────────────────────────────────────────────────────────────

/// Body of a successful filter response. Fields other than `courses` are
/// informational and ignored by the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<Course>,
}

impl FilterResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn into_courses(self) -> SearchResult {
        self.courses
    }
}

/// Status and body of an HTTP exchange, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::HttpStatus`] for any other status.
    pub fn into_success_body(self) -> Result<Vec<u8>> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(SieveError::HttpStatus(self.status))
        }
    }
}

/// The saved result of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Number of courses requested.
    pub course_count: usize,
}

impl ExportFile {
    pub fn new(bytes: Vec<u8>, course_count: usize) -> Self {
        Self {
            filename: EXPORT_FILENAME.to_string(),
            bytes,
            course_count,
        }
    }
}

// ── Transport ───────────────────────────────────────────────────────────────

/// Sends JSON bodies to the course service.
///
/// Implementations report network failures as [`SieveError::Transport`] and
/// return every HTTP response, whatever its status, as an [`HttpResponse`].
pub trait Transport {
    fn post_json(&self, url: &str, body: &str) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, body: &str) -> Result<HttpResponse> {
        (**self).post_json(url, body)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
