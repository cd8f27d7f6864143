//! Interchangeable ways of running a search.
//!
//! [`LocalCatalog`] filters an in-memory catalog; [`ApiClient`] delegates the
//! same query to the course service. Both honour the conflict contract in
//! [`crate::matcher`], so the orchestrator does not care which one it is given.

use log::{debug, warn};

use crate::api::{
    DownloadRequest, ExportFile, FilterRequest, FilterResponse, Transport,
    DOWNLOAD_COURSES_PATH, FILTER_COURSES_PATH,
};
use crate::course::{Course, SearchResult};
use crate::eligibility;
use crate::error::Result;
use crate::matcher;
use crate::period::PeriodTable;
use crate::slot::BusySet;

/// Everything one search needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The student's department; empty means unrestricted.
    pub department: String,
    /// Grade ordinal (1-4 undergraduate, 5-6 graduate).
    pub grade: u8,
    pub busy: BusySet,
}

impl SearchQuery {
    pub fn new(department: &str, grade: u8, busy: BusySet) -> Self {
        Self {
            department: department.trim().to_string(),
            grade,
            busy,
        }
    }

    pub fn to_request(&self) -> FilterRequest {
        FilterRequest::new(&self.department, self.grade, &self.busy)
    }
}

pub trait SearchStrategy {
    /// Produce the ordered, conflict-free result for `query`.
    fn search(&self, query: &SearchQuery) -> Result<SearchResult>;
}

pub trait CourseExporter {
    /// Fetch the spreadsheet for `codes`.
    fn export(&self, codes: &[String]) -> Result<ExportFile>;
}

// ── LocalCatalog ────────────────────────────────────────────────────────────

/// Searches a catalog held in memory.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    courses: Vec<Course>,
    table: PeriodTable,
}

impl LocalCatalog {
    pub fn new(courses: Vec<Course>, table: PeriodTable) -> Self {
        Self { courses, table }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl SearchStrategy for LocalCatalog {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let mut result = matcher::filter(&self.courses, &query.busy, &self.table);
        result.retain(|course| {
            eligibility::department_allows(&course.restrictions, &query.department)
                && eligibility::grade_allows(&course.restrictions, query.grade)
        });
        debug!(
            "local search: {} of {} courses match ({} busy slots)",
            result.len(),
            self.courses.len(),
            query.busy.len()
        );
        Ok(result)
    }
}

// ── ApiClient ───────────────────────────────────────────────────────────────

/// Delegates searches and exports to the course service.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<Vec<u8>> {
        let url = self.url(path);
        let body = serde_json::to_string(body)?;
        let response = self.transport.post_json(&url, &body)?;
        if !response.is_success() {
            warn!("{url} answered with status {}", response.status);
        }
        response.into_success_body()
    }
}

impl<T: Transport> SearchStrategy for ApiClient<T> {
    fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let body = self.post(FILTER_COURSES_PATH, &query.to_request())?;
        let courses = FilterResponse::from_slice(&body)?.into_courses();
        debug!("remote search returned {} courses", courses.len());
        Ok(courses)
    }
}

impl<T: Transport> CourseExporter for ApiClient<T> {
    fn export(&self, codes: &[String]) -> Result<ExportFile> {
        let request = DownloadRequest {
            course_codes: codes.to_vec(),
        };
        let bytes = self.post(DOWNLOAD_COURSES_PATH, &request)?;
        Ok(ExportFile::new(bytes, codes.len()))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
