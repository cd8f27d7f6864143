//! # course-sieve
//!
//! Conflict-free course search and windowed result rendering for a weekly
//! timetable picker.
//!
//! The user marks the periods they are unavailable in a five-day grid. Courses
//! whose time strings touch any of those slots are filtered out, either in
//! memory or by the course service. The remaining result list, possibly
//! thousands of rows long, is rendered through a fixed-row-height window while
//! a multi-select export selection persists across every re-render.
//!
//! ## Modules
//!
//! - [`period`] — Weekday and period tables (14- and 16-period variants)
//! - [`slot`] — Time slots, slot sets, and the busy-grid toggle state
//! - [`codec`] — Course time strings → slot sets and display text
//! - [`course`] — Course records
//! - [`matcher`] — Schedule-conflict filtering
//! - [`eligibility`] — Department and grade enrollment rules
//! - [`strategy`] — Local and service-backed search behind one trait
//! - [`selection`] — Export selection store
//! - [`viewport`] — Window computation and scroll hysteresis
//! - [`orchestrator`] — Event handling and frame rendering
//! - [`api`] — Wire types and the transport seam
//! - [`config`] — Endpoints, viewport geometry, period variant
//! - [`error`] — Error types

pub mod api;
pub mod codec;
pub mod config;
pub mod course;
pub mod eligibility;
pub mod error;
pub mod matcher;
pub mod orchestrator;
pub mod period;
pub mod selection;
pub mod slot;
pub mod strategy;
pub mod viewport;

pub use api::{
    DownloadRequest, ExportFile, FilterRequest, FilterResponse, HttpResponse, Transport,
    EXPORT_FILENAME,
};
pub use codec::{decode, format_for_display};
pub use config::{ApiEndpoints, Environment, SieveConfig};
pub use course::{Course, SearchResult};
pub use error::SieveError;
pub use matcher::{filter, has_conflict};
pub use orchestrator::{
    export_message, ControlState, RenderFrame, RenderOrchestrator, ResultView, RowDescriptor,
};
pub use period::{Period, PeriodTable, PeriodVariant, Weekday};
pub use selection::SelectionStore;
pub use slot::{BusyGrid, BusySet, TimeSlot, TimeSlotSet};
pub use strategy::{ApiClient, CourseExporter, LocalCatalog, SearchQuery, SearchStrategy};
pub use viewport::{compute_window, ViewportConfig, ViewportWindow, WindowEngine};
