//! The event-driven state machine behind the course picker.
//!
//! [`RenderOrchestrator`] owns every piece of mutable state the page needs:
//! the busy grid, the current result list, the export selection, the window
//! engine and the two pending-request flags. Each event handler mutates that
//! state synchronously; [`RenderOrchestrator::render`] turns it into a
//! [`RenderFrame`] the presentation layer paints without further logic.
//!
//! Network round-trips are split into `begin_*` / `complete_*` pairs so the
//! host can perform the I/O in between. `complete_*` always clears the pending
//! flag, whether the request succeeded or not. The `run_*` helpers drive a
//! synchronous [`SearchStrategy`] or [`CourseExporter`] through the same pair.

use log::{debug, info, warn};
use serde::Serialize;

use crate::api::{DownloadRequest, ExportFile};
use crate::config::SieveConfig;
use crate::course::{Course, SearchResult};
use crate::error::{Result, SieveError};
use crate::period::{PeriodTable, Weekday};
use crate::selection::SelectionStore;
use crate::slot::BusyGrid;
use crate::strategy::{CourseExporter, SearchQuery, SearchStrategy};
use crate::viewport::{ViewportConfig, ViewportWindow, WindowEngine};

const SEARCH_LABEL: &str = "搜尋課程";
const SEARCH_PENDING_LABEL: &str = "⏳ 正在搜尋課程...";
const DOWNLOAD_LABEL: &str = "下載選中課程";
const DOWNLOAD_PENDING_LABEL: &str = "⏳ 正在準備下載...";
const NO_MATCHES_MESSAGE: &str = "沒有找到符合條件的課程，試著取消一些忙碌時段吧！";
const EMPTY_SELECTION_MESSAGE: &str = "請先選擇要下載的課程";

// ── Frame types ─────────────────────────────────────────────────────────────

/// One materialized row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDescriptor<'a> {
    /// Position in the full result list.
    pub index: usize,
    pub course: &'a Course,
    pub time_display: String,
    /// Read from the selection store at render time.
    pub selected: bool,
}

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultView<'a> {
    /// No search has run yet.
    Idle,
    Loading { message: String },
    Failed { message: String },
    /// The search succeeded with zero courses.
    Empty { message: String },
    Rows { rows: Vec<RowDescriptor<'a>> },
}

/// Label and state of a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub label: String,
    pub enabled: bool,
    pub visible: bool,
}

/// Everything the presentation layer needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame<'a> {
    pub view: ResultView<'a>,
    pub window: ViewportWindow,
    pub course_count: usize,
    pub selected_count: usize,
    pub all_selected: bool,
    pub search_button: ControlState,
    pub download_button: ControlState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Searching,
    Failed(String),
    Loaded,
}

// ── RenderOrchestrator ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RenderOrchestrator {
    table: PeriodTable,
    grid: BusyGrid,
    results: SearchResult,
    selection: SelectionStore,
    window: WindowEngine,
    phase: Phase,
    search_pending: bool,
    export_pending: bool,
}

impl RenderOrchestrator {
    pub fn new(table: PeriodTable, viewport: ViewportConfig) -> Self {
        Self {
            grid: BusyGrid::new(table.clone()),
            table,
            results: Vec::new(),
            selection: SelectionStore::new(),
            window: WindowEngine::new(viewport),
            phase: Phase::Idle,
            search_pending: false,
            export_pending: false,
        }
    }

    /// # Errors
    ///
    /// Returns [`SieveError::InvalidConfig`] if the configuration is invalid.
    pub fn from_config(config: &SieveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.period_table(), config.viewport))
    }

    pub fn table(&self) -> &PeriodTable {
        &self.table
    }

    pub fn grid(&self) -> &BusyGrid {
        &self.grid
    }

    pub fn results(&self) -> &[Course] {
        &self.results
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn window(&self) -> ViewportWindow {
        self.window.window()
    }

    pub fn is_search_pending(&self) -> bool {
        self.search_pending
    }

    pub fn is_export_pending(&self) -> bool {
        self.export_pending
    }

    // ── Busy grid ───────────────────────────────────────────────────────

    /// Flip one cell of the busy grid. Returns the new state, or `None` if
    /// the period is not in the active table.
    pub fn toggle_busy(&mut self, day: Weekday, period: char) -> Option<bool> {
        self.grid.toggle(day, period)
    }

    pub fn clear_busy(&mut self) {
        self.grid.clear();
    }

    // ── Search ──────────────────────────────────────────────────────────

    /// Start a search: rebuild the busy set from the grid and mark the search
    /// control pending.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::SearchPending`] if a search is already in flight.
    pub fn begin_search(&mut self, department: &str, grade: u8) -> Result<SearchQuery> {
        if self.search_pending {
            return Err(SieveError::SearchPending);
        }
        let query = SearchQuery::new(department, grade, self.grid.busy_set());
        info!(
            "search started (department={:?}, grade={}, busy slots={})",
            query.department,
            query.grade,
            query.busy.len()
        );
        self.search_pending = true;
        self.phase = Phase::Searching;
        Ok(query)
    }

    /// Finish the in-flight search with its outcome.
    ///
    /// A failure replaces the result area with its message; nothing from the
    /// previous result survives either way.
    pub fn complete_search(&mut self, outcome: Result<SearchResult>) {
        self.search_pending = false;
        match outcome {
            Ok(courses) => {
                info!("search completed with {} courses", courses.len());
                self.load_results(courses);
            }
            Err(err) => {
                warn!("search failed: {err}");
                self.results.clear();
                self.selection.clear();
                self.window.reset(0);
                self.phase = Phase::Failed(format!("搜尋失敗：{err}。請確認後端伺服器是否正在運行"));
            }
        }
    }

    /// Run a whole search through `strategy`.
    ///
    /// Strategy failures end up in the rendered view, not in the return
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::SearchPending`] if a search is already in flight.
    pub fn run_search<S>(&mut self, strategy: &S, department: &str, grade: u8) -> Result<()>
    where
        S: SearchStrategy + ?Sized,
    {
        let query = self.begin_search(department, grade)?;
        let outcome = strategy.search(&query);
        self.complete_search(outcome);
        Ok(())
    }

    /// Replace the result list wholesale. Clears the selection and scrolls
    /// the window back to the top.
    pub fn load_results(&mut self, courses: SearchResult) {
        self.results = courses;
        self.selection.clear();
        self.window.reset(self.results.len());
        self.phase = Phase::Loaded;
    }

    // ── Scrolling ───────────────────────────────────────────────────────

    /// Report a scroll position. Returns `true` if the visible slice changed
    /// and must be re-rendered.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        let recomputed = self.window.on_scroll(offset);
        if recomputed {
            let window = self.window.window();
            debug!(
                "window recomputed at offset {offset}: rows {}..{}",
                window.start, window.end
            );
        }
        recomputed
    }

    // ── Selection ───────────────────────────────────────────────────────

    /// Flip the selection of one result row. Returns the new state, or `None`
    /// if `code` is not part of the current result.
    pub fn toggle_row(&mut self, code: &str) -> Option<bool> {
        if !self.in_results(code) {
            return None;
        }
        Some(self.selection.toggle(code))
    }

    /// Set the selection of one result row, as a checkbox change does.
    /// Returns `false` if `code` is not part of the current result.
    pub fn set_row_selected(&mut self, code: &str, on: bool) -> bool {
        if !self.in_results(code) {
            return false;
        }
        self.selection.set(code, on);
        true
    }

    /// Select or deselect every course in the result, visible or not.
    pub fn set_all_selected(&mut self, on: bool) {
        self.selection.clear();
        if on {
            self.selection
                .set_all(self.results.iter().map(|course| course.code.as_str()), true);
        }
        self.window.refresh();
    }

    pub fn all_selected(&self) -> bool {
        !self.results.is_empty() && self.selection.count() == self.results.len()
    }

    /// The "N selected" label of the download control.
    pub fn selection_label(&self) -> String {
        match self.selection.count() {
            0 => DOWNLOAD_LABEL.to_string(),
            n => format!("{DOWNLOAD_LABEL} ({n})"),
        }
    }

    fn in_results(&self, code: &str) -> bool {
        self.results.iter().any(|course| course.code == code)
    }

    // ── Export ──────────────────────────────────────────────────────────

    /// Start an export of the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::EmptySelection`] if nothing is selected (no
    /// request may be sent) or [`SieveError::ExportPending`] if an export is
    /// already in flight.
    pub fn begin_export(&mut self) -> Result<DownloadRequest> {
        if self.selection.is_empty() {
            warn!("export attempted with an empty selection");
            return Err(SieveError::EmptySelection);
        }
        if self.export_pending {
            return Err(SieveError::ExportPending);
        }
        self.export_pending = true;
        let course_codes = self.selection.codes_in(&self.results);
        info!("export started for {} courses", course_codes.len());
        Ok(DownloadRequest { course_codes })
    }

    /// Finish the in-flight export, passing its outcome through.
    pub fn complete_export(&mut self, outcome: Result<ExportFile>) -> Result<ExportFile> {
        self.export_pending = false;
        match &outcome {
            Ok(file) => info!(
                "export completed: {} ({} bytes)",
                file.filename,
                file.bytes.len()
            ),
            Err(err) => warn!("export failed: {err}"),
        }
        outcome
    }

    /// Run a whole export through `exporter`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::begin_export`] and any exporter failure.
    pub fn run_export<E>(&mut self, exporter: &E) -> Result<ExportFile>
    where
        E: CourseExporter + ?Sized,
    {
        let request = self.begin_export()?;
        let outcome = exporter.export(&request.course_codes);
        self.complete_export(outcome)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Build the frame for the current state. Only the rows inside the
    /// current window are materialized.
    pub fn render(&self) -> RenderFrame<'_> {
        let (view, window) = match &self.phase {
            Phase::Idle => (ResultView::Idle, ViewportWindow::EMPTY),
            Phase::Searching => (
                ResultView::Loading {
                    message: SEARCH_PENDING_LABEL.to_string(),
                },
                ViewportWindow::EMPTY,
            ),
            Phase::Failed(message) => (
                ResultView::Failed {
                    message: message.clone(),
                },
                ViewportWindow::EMPTY,
            ),
            Phase::Loaded if self.results.is_empty() => (
                ResultView::Empty {
                    message: NO_MATCHES_MESSAGE.to_string(),
                },
                ViewportWindow::EMPTY,
            ),
            Phase::Loaded => {
                let window = self.window.window();
                (
                    ResultView::Rows {
                        rows: self.visible_rows(&window),
                    },
                    window,
                )
            }
        };

        RenderFrame {
            view,
            window,
            course_count: self.results.len(),
            selected_count: self.selection.count(),
            all_selected: self.all_selected(),
            search_button: self.search_control(),
            download_button: self.download_control(),
        }
    }

    fn visible_rows(&self, window: &ViewportWindow) -> Vec<RowDescriptor<'_>> {
        self.results
            .get(window.range())
            .unwrap_or_default()
            .iter()
            .zip(window.range())
            .map(|(course, index)| RowDescriptor {
                index,
                course,
                time_display: course.time_display(&self.table),
                selected: self.selection.contains(&course.code),
            })
            .collect()
    }

    fn search_control(&self) -> ControlState {
        let label = if self.search_pending {
            SEARCH_PENDING_LABEL
        } else {
            SEARCH_LABEL
        };
        ControlState {
            label: label.to_string(),
            enabled: !self.search_pending,
            visible: true,
        }
    }

    fn download_control(&self) -> ControlState {
        let visible = self.phase == Phase::Loaded && !self.results.is_empty();
        if self.export_pending {
            return ControlState {
                label: DOWNLOAD_PENDING_LABEL.to_string(),
                enabled: false,
                visible,
            };
        }
        ControlState {
            label: self.selection_label(),
            enabled: !self.selection.is_empty(),
            visible,
        }
    }
}

/// The user-facing message for an export attempt.
pub fn export_message(outcome: &Result<ExportFile>) -> String {
    match outcome {
        Ok(file) => format!("成功下載 {} 門課程！", file.course_count),
        Err(SieveError::EmptySelection) => EMPTY_SELECTION_MESSAGE.to_string(),
        Err(err) => format!("下載失敗：{err}"),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
