//! Export selection, keyed by course code.
//!
//! The store is the single authority on whether a course is picked. Rows never
//! cache their checkbox state: every render asks [`SelectionStore::contains`],
//! so an item toggled, scrolled out and scrolled back shows exactly what the
//! store holds.

use std::collections::HashSet;

use crate::course::Course;

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    codes: HashSet<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `code`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, code: &str) -> bool {
        if self.codes.remove(code) {
            false
        } else {
            self.codes.insert(code.to_string());
            true
        }
    }

    /// Set membership explicitly, as a checkbox change event does.
    pub fn set(&mut self, code: &str, on: bool) {
        if on {
            self.codes.insert(code.to_string());
        } else {
            self.codes.remove(code);
        }
    }

    /// Add (`on`) or remove every code in `codes`.
    pub fn set_all<I, S>(&mut self, codes: I, on: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for code in codes {
            self.set(code.as_ref(), on);
        }
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn count(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Selected codes in the order the courses appear in `courses`.
    pub fn codes_in(&self, courses: &[Course]) -> Vec<String> {
        courses
            .iter()
            .filter(|course| self.contains(&course.code))
            .map(|course| course.code.clone())
            .collect()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_an_involution() {
        let mut store = SelectionStore::new();
        assert!(store.toggle("A"));
        assert!(store.contains("A"));
        assert!(!store.toggle("A"));
        assert!(!store.contains("A"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_set_all_on_then_count() {
        let mut store = SelectionStore::new();
        store.set_all(["A", "B", "C"], true);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_set_all_off_removes_only_given_codes() {
        let mut store = SelectionStore::new();
        store.set_all(["A", "B", "C"], true);
        store.set_all(["A", "C"], false);
        assert_eq!(store.count(), 1);
        assert!(store.contains("B"));
    }

    #[test]
    fn test_clear_resets_count() {
        let mut store = SelectionStore::new();
        store.set_all(vec!["A".to_string(), "B".to_string()], true);
        store.clear();
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut store = SelectionStore::new();
        store.set("A", true);
        store.set("A", true);
        assert_eq!(store.count(), 1);
        store.set("A", false);
        store.set("A", false);
        assert!(store.is_empty());
    }

    #[test]
    fn test_codes_in_follows_result_order() {
        let courses: Vec<Course> = ["C", "A", "B"]
            .iter()
            .map(|code| Course {
                code: code.to_string(),
                ..Course::default()
            })
            .collect();
        let mut store = SelectionStore::new();
        store.toggle("B");
        store.toggle("C");
        store.toggle("Z");
        assert_eq!(store.codes_in(&courses), vec!["C", "B"]);
    }
}
