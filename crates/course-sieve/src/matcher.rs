//! Schedule-conflict matching.
//!
//! A course conflicts with a busy set when any single slot it occupies is
//! busy. There is no partial credit: one overlapping slot excludes the whole
//! course. A course whose time string decodes to no slots never conflicts.
//!
//! Everything here is a pure function of its arguments, so the same predicate
//! can run in memory or be delegated to the course service.

use crate::course::{Course, SearchResult};
use crate::period::PeriodTable;
use crate::slot::BusySet;

/// Whether the raw time string `time` overlaps `busy`.
pub fn has_conflict(time: &str, busy: &BusySet, table: &PeriodTable) -> bool {
    if busy.is_empty() {
        return false;
    }
    crate::codec::decode(time, table).intersects(busy)
}

/// Keep the courses that do not conflict with `busy`, in their original order.
///
/// # Examples
///
/// ```
/// use course_sieve::course::Course;
/// use course_sieve::matcher::filter;
/// use course_sieve::period::PeriodTable;
/// use course_sieve::slot::BusySet;
///
/// let courses = vec![
///     Course { code: "A".into(), time: "一A".into(), ..Course::default() },
///     Course { code: "B".into(), time: "三1".into(), ..Course::default() },
/// ];
/// let busy = BusySet::from_wire_keys(["1-A"]).unwrap();
/// let kept = filter(&courses, &busy, &PeriodTable::standard());
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].code, "B");
/// ```
pub fn filter(courses: &[Course], busy: &BusySet, table: &PeriodTable) -> SearchResult {
    courses
        .iter()
        .filter(|course| !has_conflict(&course.time, busy, table))
        .cloned()
        .collect()
}

/// In-place variant of [`filter`] for owned collections.
pub fn retain_available(courses: &mut SearchResult, busy: &BusySet, table: &PeriodTable) {
    courses.retain(|course| !has_conflict(&course.time, busy, table));
}

// ── Tests ───────────────────────────────────────────────────────────────────
