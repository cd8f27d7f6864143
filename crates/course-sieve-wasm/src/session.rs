//! Host-facing session: the orchestrator plus the JSON shapes the page
//! exchanges with it.
//!
//! The page performs every `fetch` itself. `begin_*` hands it a
//! [`PendingRequest`] (URL and JSON body); once the response arrives the page
//! reports status and body through `complete_*`, or a network error through
//! `fail_*`.

use course_sieve::api::{DOWNLOAD_COURSES_PATH, FILTER_COURSES_PATH};
use course_sieve::{
    export_message, Environment, ExportFile, FilterResponse, HttpResponse, RenderOrchestrator,
    SieveConfig, SieveError, Weekday, EXPORT_FILENAME,
};
use serde::Serialize;

type Result<T> = std::result::Result<T, SieveError>;

/// A request the page should send with `fetch`.
#[derive(Debug, Serialize)]
pub struct PendingRequest<B> {
    pub url: String,
    pub body: B,
}

#[derive(Debug, Serialize)]
struct PeriodEntry {
    symbol: char,
    interval: String,
}

#[derive(Debug, Serialize)]
struct GridLayout {
    weekdays: Vec<(u8, char)>,
    periods: Vec<PeriodEntry>,
}

pub struct Session {
    orchestrator: RenderOrchestrator,
    base_url: String,
    export_count: usize,
}

impl Session {
    /// Build a session from a JSON configuration (empty string for defaults)
    /// and the page's `location.hostname` / `location.protocol`.
    pub fn new(config_json: &str, hostname: &str, protocol: &str) -> Result<Self> {
        let config = if config_json.trim().is_empty() {
            SieveConfig::default()
        } else {
            SieveConfig::from_json(config_json)?
        };
        let environment = Environment::detect(hostname, protocol);
        let base_url = config
            .api
            .base_url(environment)
            .trim_end_matches('/')
            .to_string();
        log::info!("course service for {environment:?}: {base_url}");

        Ok(Self {
            orchestrator: RenderOrchestrator::from_config(&config)?,
            base_url,
            export_count: 0,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn orchestrator(&self) -> &RenderOrchestrator {
        &self.orchestrator
    }

    /// Weekdays and periods of the busy grid, in display order.
    pub fn grid_layout_json(&self) -> Result<String> {
        let layout = GridLayout {
            weekdays: Weekday::ALL
                .iter()
                .map(|day| (day.ordinal(), day.symbol()))
                .collect(),
            periods: self
                .orchestrator
                .table()
                .periods()
                .iter()
                .map(|p| PeriodEntry {
                    symbol: p.symbol,
                    interval: p.interval_label(),
                })
                .collect(),
        };
        Ok(serde_json::to_string(&layout)?)
    }

    // ── Busy grid ───────────────────────────────────────────────────────

    pub fn toggle_busy(&mut self, day: u8, period: &str) -> Result<bool> {
        let (day, symbol) = parse_cell(day, period)?;
        self.orchestrator
            .toggle_busy(day, symbol)
            .ok_or_else(|| SieveError::InvalidSlotKey(format!("{}-{period}", day.ordinal())))
    }

    pub fn is_busy(&self, day: u8, period: &str) -> bool {
        parse_cell(day, period)
            .map(|(day, symbol)| self.orchestrator.grid().is_marked(day, symbol))
            .unwrap_or(false)
    }

    // ── Search ──────────────────────────────────────────────────────────

    pub fn begin_search(&mut self, department: &str, grade: u8) -> Result<String> {
        let query = self.orchestrator.begin_search(department, grade)?;
        let request = PendingRequest {
            url: format!("{}{FILTER_COURSES_PATH}", self.base_url),
            body: query.to_request(),
        };
        Ok(serde_json::to_string(&request)?)
    }

    pub fn complete_search(&mut self, status: u16, body: &[u8]) {
        let outcome = HttpResponse::new(status, body)
            .into_success_body()
            .and_then(|body| FilterResponse::from_slice(&body))
            .map(FilterResponse::into_courses);
        self.orchestrator.complete_search(outcome);
    }

    pub fn fail_search(&mut self, message: &str) {
        self.orchestrator
            .complete_search(Err(SieveError::Transport(message.to_string())));
    }

    // ── Scrolling and selection ─────────────────────────────────────────

    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.orchestrator.on_scroll(offset)
    }

    pub fn toggle_row(&mut self, code: &str) -> Option<bool> {
        self.orchestrator.toggle_row(code)
    }

    pub fn set_row_selected(&mut self, code: &str, on: bool) -> bool {
        self.orchestrator.set_row_selected(code, on)
    }

    pub fn set_all_selected(&mut self, on: bool) {
        self.orchestrator.set_all_selected(on);
    }

    pub fn frame_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.orchestrator.render())?)
    }

    // ── Export ──────────────────────────────────────────────────────────

    /// Start an export. On error the message is ready to show the user.
    pub fn begin_export(&mut self) -> std::result::Result<String, String> {
        let request = self
            .orchestrator
            .begin_export()
            .map_err(|err| export_message(&Err(err)))?;
        self.export_count = request.course_codes.len();
        let request = PendingRequest {
            url: format!("{}{DOWNLOAD_COURSES_PATH}", self.base_url),
            body: request,
        };
        match serde_json::to_string(&request) {
            Ok(json) => Ok(json),
            Err(err) => {
                let outcome = self.orchestrator.complete_export(Err(err.into()));
                Err(export_message(&outcome))
            }
        }
    }

    /// Finish an export with the service response; returns the message for
    /// the user.
    pub fn complete_export(&mut self, status: u16, body: Vec<u8>) -> String {
        let count = self.export_count;
        let outcome = HttpResponse::new(status, body)
            .into_success_body()
            .map(|bytes| ExportFile::new(bytes, count));
        let outcome = self.orchestrator.complete_export(outcome);
        export_message(&outcome)
    }

    pub fn fail_export(&mut self, message: &str) -> String {
        let outcome = self
            .orchestrator
            .complete_export(Err(SieveError::Transport(message.to_string())));
        export_message(&outcome)
    }

    pub fn export_filename(&self) -> &'static str {
        EXPORT_FILENAME
    }
}

fn parse_cell(day: u8, period: &str) -> Result<(Weekday, char)> {
    let invalid = || SieveError::InvalidSlotKey(format!("{day}-{period}"));
    let day = Weekday::from_ordinal(day).ok_or_else(invalid)?;
    let mut chars = period.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok((day, symbol)),
        _ => Err(invalid()),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
