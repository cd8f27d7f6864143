//! Fixed-row-height viewport windowing.
//!
//! Only a contiguous slice of a large result list is materialized. The slice
//! starts `buffer_count` rows above the first row under the scroll offset and
//! ends `visible_count + buffer_count` rows after it. The materialized block is
//! translated down by `vertical_offset` so it sits where those rows would be
//! in the full list, while the container reserves `total * row_height` so the
//! scrollbar keeps its proportions.
//!
//! [`WindowEngine`] adds the re-render policy: a scroll only recomputes the
//! window once it has moved more than half a row from the last rendered
//! offset.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

// ── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Height of every row in pixels.
    pub row_height: f64,
    /// Rows that fit in the viewport.
    pub visible_count: usize,
    /// Extra rows materialized on each side of the viewport.
    pub buffer_count: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            row_height: 70.0,
            visible_count: 12,
            buffer_count: 3,
        }
    }
}

impl ViewportConfig {
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidConfig`] if the row height is not a
    /// positive finite number or the viewport holds no rows.
    pub fn validate(&self) -> Result<()> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(SieveError::InvalidConfig(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        if self.visible_count == 0 {
            return Err(SieveError::InvalidConfig(
                "visible_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Upper bound on the number of rows a window can hold.
    pub fn max_window_len(&self) -> usize {
        self.visible_count + 2 * self.buffer_count
    }
}

// ── ViewportWindow ──────────────────────────────────────────────────────────

/// The slice of the result list to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportWindow {
    /// First materialized index (buffer included).
    pub start: usize,
    /// One past the last materialized index.
    pub end: usize,
    /// Translation applied to the materialized block, `start * row_height`.
    pub vertical_offset: f64,
    /// Space the container reserves for the whole list, `total * row_height`.
    pub reserved_height: f64,
}

impl ViewportWindow {
    pub const EMPTY: ViewportWindow = ViewportWindow {
        start: 0,
        end: 0,
        vertical_offset: 0.0,
        reserved_height: 0.0,
    };

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Compute the window for `total` rows at `scroll_offset`.
///
/// Negative offsets (overscroll) are treated as 0. An offset past the end of
/// the list yields an empty window at the end rather than `start > end`.
///
/// # Examples
///
/// ```
/// use course_sieve::viewport::{compute_window, ViewportConfig};
///
/// let window = compute_window(&ViewportConfig::default(), 700.0, 100);
/// assert_eq!((window.start, window.end), (7, 25));
/// assert_eq!(window.vertical_offset, 490.0);
/// ```
pub fn compute_window(config: &ViewportConfig, scroll_offset: f64, total: usize) -> ViewportWindow {
    if total == 0 {
        return ViewportWindow::EMPTY;
    }

    let raw_start = if config.row_height > 0.0 && scroll_offset > 0.0 {
        (scroll_offset / config.row_height).floor() as usize
    } else {
        0
    };
    let raw_end = raw_start
        .saturating_add(config.visible_count)
        .saturating_add(config.buffer_count)
        .min(total);
    let start = raw_start.saturating_sub(config.buffer_count).min(raw_end);

    ViewportWindow {
        start,
        end: raw_end,
        vertical_offset: start as f64 * config.row_height,
        reserved_height: total as f64 * config.row_height,
    }
}

// ── WindowEngine ────────────────────────────────────────────────────────────

/// Scroll-driven window state with hysteresis.
#[derive(Debug, Clone)]
pub struct WindowEngine {
    config: ViewportConfig,
    total: usize,
    scroll_offset: f64,
    rendered_offset: f64,
    window: ViewportWindow,
}

impl WindowEngine {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            total: 0,
            scroll_offset: 0.0,
            rendered_offset: 0.0,
            window: ViewportWindow::EMPTY,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// The latest reported scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// The scroll offset the current window was computed for.
    pub fn rendered_offset(&self) -> f64 {
        self.rendered_offset
    }

    pub fn window(&self) -> ViewportWindow {
        self.window
    }

    /// Start over for a new result list: scroll back to the top and recompute
    /// unconditionally.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.scroll_offset = 0.0;
        self.rendered_offset = 0.0;
        self.window = compute_window(&self.config, 0.0, total);
    }

    /// Record a scroll event. Returns `true` if the window was recomputed and
    /// the visible slice must be re-rendered.
    ///
    /// Non-finite offsets are recorded as 0.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_offset = offset;
        if (offset - self.rendered_offset).abs() > self.config.row_height / 2.0 {
            self.refresh();
            true
        } else {
            false
        }
    }

    /// Recompute the window at the latest scroll offset regardless of the
    /// threshold.
    pub fn refresh(&mut self) {
        self.rendered_offset = self.scroll_offset;
        self.window = compute_window(&self.config, self.scroll_offset, self.total);
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ViewportConfig {
        ViewportConfig::default()
    }

    // ── compute_window tests ────────────────────────────────────────────

    #[test]
    fn test_window_mid_list() {
        let window = compute_window(&config(), 700.0, 100);
        assert_eq!(window.start, 7);
        assert_eq!(window.end, 25);
        assert_eq!(window.vertical_offset, 490.0);
        assert_eq!(window.reserved_height, 7000.0);
    }

    #[test]
    fn test_window_at_top_has_no_leading_buffer() {
        let window = compute_window(&config(), 0.0, 100);
        assert_eq!(window.range(), 0..15);
        assert_eq!(window.vertical_offset, 0.0);
    }

    #[test]
    fn test_window_empty_list() {
        let window = compute_window(&config(), 350.0, 0);
        assert_eq!(window, ViewportWindow::EMPTY);
        assert!(window.is_empty());
    }

    #[test]
    fn test_window_short_list_covers_everything() {
        let window = compute_window(&config(), 0.0, 5);
        assert_eq!(window.range(), 0..5);
        assert_eq!(window.vertical_offset, 0.0);
        assert_eq!(window.reserved_height, 350.0);
    }

    #[test]
    fn test_window_sub_row_offset_floors() {
        let window = compute_window(&config(), 769.9, 100);
        assert_eq!(window.start, 7);
    }

    #[test]
    fn test_window_near_end_is_clamped() {
        let window = compute_window(&config(), 95.0 * 70.0, 100);
        assert_eq!(window.range(), 92..100);
    }

    #[test]
    fn test_window_past_end_stays_ordered() {
        let window = compute_window(&config(), 1_000_000.0, 10);
        assert!(window.start <= window.end);
        assert_eq!(window.end, 10);
    }

    #[test]
    fn test_window_negative_offset_treated_as_top() {
        let window = compute_window(&config(), -120.0, 100);
        assert_eq!(window.range(), 0..15);
    }

    #[test]
    fn test_window_never_exceeds_max_len() {
        let cfg = config();
        for offset in (0..10_000).step_by(37) {
            let window = compute_window(&cfg, offset as f64, 120);
            assert!(window.len() <= cfg.max_window_len());
        }
    }

    // ── config tests ────────────────────────────────────────────────────

    #[test]
    fn test_config_validation() {
        assert!(config().validate().is_ok());
        let bad = ViewportConfig {
            row_height: 0.0,
            ..config()
        };
        assert!(bad.validate().is_err());
        let bad = ViewportConfig {
            visible_count: 0,
            ..config()
        };
        assert!(bad.validate().is_err());
    }

    // ── WindowEngine tests ──────────────────────────────────────────────

    #[test]
    fn test_engine_reset_recomputes_at_top() {
        let mut engine = WindowEngine::new(config());
        engine.reset(100);
        engine.on_scroll(700.0);
        engine.reset(50);
        assert_eq!(engine.scroll_offset(), 0.0);
        assert_eq!(engine.window().range(), 0..15);
        assert_eq!(engine.window().reserved_height, 3500.0);
    }

    #[test]
    fn test_engine_ignores_small_scrolls() {
        let mut engine = WindowEngine::new(config());
        engine.reset(100);
        assert!(!engine.on_scroll(35.0));
        assert!(!engine.on_scroll(20.0));
        assert_eq!(engine.rendered_offset(), 0.0);
        assert_eq!(engine.scroll_offset(), 20.0);
    }

    #[test]
    fn test_engine_recomputes_past_half_row() {
        let mut engine = WindowEngine::new(config());
        engine.reset(100);
        assert!(engine.on_scroll(700.0));
        assert_eq!(engine.rendered_offset(), 700.0);
        assert_eq!(engine.window().start, 7);
    }

    #[test]
    fn test_engine_threshold_is_relative_to_last_render() {
        let mut engine = WindowEngine::new(config());
        engine.reset(100);
        assert!(engine.on_scroll(700.0));
        assert!(!engine.on_scroll(730.0));
        assert!(!engine.on_scroll(670.0));
        assert!(engine.on_scroll(771.0));
        assert!(engine.on_scroll(700.0));
    }

    #[test]
    fn test_engine_refresh_uses_latest_offset() {
        let mut engine = WindowEngine::new(config());
        engine.reset(100);
        engine.on_scroll(30.0);
        engine.refresh();
        assert_eq!(engine.rendered_offset(), 30.0);
    }

    #[test]
    fn test_engine_non_finite_offset_reads_as_top() {
        let mut engine = WindowEngine::new(config());
        engine.reset(100);
        assert!(!engine.on_scroll(f64::NAN));
        assert_eq!(engine.scroll_offset(), 0.0);
        engine.refresh();
        assert_eq!(engine.rendered_offset(), 0.0);

        assert!(engine.on_scroll(700.0));
        assert_eq!(engine.window().start, 7);
        assert!(engine.on_scroll(f64::INFINITY));
        assert_eq!(engine.window().start, 0);
    }
}
