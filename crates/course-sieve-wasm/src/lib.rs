//! WASM bindings for the course picker.
//!
//! THE PATTERN:
//! - JS constructs `CourseSieveApp` with an optional JSON config and the page
//!   location, then builds the busy grid from `grid_layout()`.
//! - Grid clicks call `toggle_busy(day, period)`.
//! - Search: `begin_search()` returns `{url, body}`; JS performs the `fetch`
//!   and reports back via `complete_search(status, body)` or
//!   `fail_search(message)`.
//! - Scroll events call `on_scroll(scrollTop)`; repaint only when it returns
//!   `true`. Checkbox and select-all changes call `set_row_selected` /
//!   `set_all_selected`, then repaint.
//! - `frame()` returns the current render frame as JSON.
//! - Export follows the same begin/complete pattern; the returned string is
//!   the message to show the user.

mod session;

use wasm_bindgen::prelude::*;

pub use session::{PendingRequest, Session};

// ── CourseSieveApp ──────────────────────────────────────────────────────────

#[wasm_bindgen]
pub struct CourseSieveApp {
    session: Session,
}

#[wasm_bindgen]
impl CourseSieveApp {
    // ── Constructor ────────────────────────────────────────────────────

    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, hostname: &str, protocol: &str) -> Result<CourseSieveApp, JsError> {
        Ok(CourseSieveApp {
            session: Session::new(config_json, hostname, protocol)?,
        })
    }

    /// Base URL of the course service in use.
    pub fn base_url(&self) -> String {
        self.session.base_url().to_string()
    }

    /// `{weekdays: [[ordinal, symbol]...], periods: [{symbol, interval}...]}`.
    pub fn grid_layout(&self) -> Result<String, JsError> {
        Ok(self.session.grid_layout_json()?)
    }

    // ── Busy grid ─────────────────────────────────────────────────────

    pub fn toggle_busy(&mut self, day: u8, period: &str) -> Result<bool, JsError> {
        Ok(self.session.toggle_busy(day, period)?)
    }

    pub fn is_busy(&self, day: u8, period: &str) -> bool {
        self.session.is_busy(day, period)
    }

    // ── Search ────────────────────────────────────────────────────────

    pub fn begin_search(&mut self, department: &str, grade: u8) -> Result<String, JsError> {
        Ok(self.session.begin_search(department, grade)?)
    }

    pub fn complete_search(&mut self, status: u16, body: &[u8]) {
        self.session.complete_search(status, body);
    }

    pub fn fail_search(&mut self, message: &str) {
        self.session.fail_search(message);
    }

    // ── Scrolling and selection ───────────────────────────────────────

    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.session.on_scroll(offset)
    }

    pub fn toggle_row(&mut self, code: &str) -> Option<bool> {
        self.session.toggle_row(code)
    }

    pub fn set_row_selected(&mut self, code: &str, on: bool) -> bool {
        self.session.set_row_selected(code, on)
    }

    pub fn set_all_selected(&mut self, on: bool) {
        self.session.set_all_selected(on);
    }

    pub fn frame(&self) -> Result<String, JsError> {
        Ok(self.session.frame_json()?)
    }

    // ── Export ────────────────────────────────────────────────────────

    pub fn begin_export(&mut self) -> Result<String, JsError> {
        self.session
            .begin_export()
            .map_err(|message| JsError::new(&message))
    }

    pub fn complete_export(&mut self, status: u16, body: Vec<u8>) -> String {
        self.session.complete_export(status, body)
    }

    pub fn fail_export(&mut self, message: &str) -> String {
        self.session.fail_export(message)
    }

    pub fn export_filename(&self) -> String {
        self.session.export_filename().to_string()
    }
}
