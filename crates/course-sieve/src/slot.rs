//! Timetable slots, slot sets, and the busy-grid toggle state.
//!
//! A [`TimeSlot`] is one (weekday, period) cell. The wire form used by the
//! search endpoint is `"<weekdayOrdinal>-<periodSymbol>"`, e.g. `"1-A"` for the
//! first evening period on Monday.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};
use crate::period::{PeriodTable, Weekday};

// ── TimeSlot ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Weekday,
    pub period: char,
}

impl TimeSlot {
    pub fn new(day: Weekday, period: char) -> Self {
        Self { day, period }
    }

    /// Parse a `"<weekdayOrdinal>-<periodSymbol>"` key.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidSlotKey`] if the ordinal is not 1-5 or the
    /// period part is not exactly one character.
    pub fn from_wire_key(key: &str) -> Result<Self> {
        let invalid = || SieveError::InvalidSlotKey(key.to_string());

        let (ordinal, period) = key.split_once('-').ok_or_else(invalid)?;
        let day = ordinal
            .parse::<u8>()
            .ok()
            .and_then(Weekday::from_ordinal)
            .ok_or_else(invalid)?;

        let mut chars = period.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Ok(Self::new(day, symbol)),
            _ => Err(invalid()),
        }
    }

    pub fn wire_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day.ordinal(), self.period)
    }
}

// ── TimeSlotSet ─────────────────────────────────────────────────────────────

/// A deduplicated set of slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSlotSet {
    slots: BTreeSet<TimeSlot>,
}

/// The slots the user has declared unavailable.
pub type BusySet = TimeSlotSet;

impl TimeSlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: TimeSlot) -> bool {
        self.slots.insert(slot)
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.slots.contains(slot)
    }

    /// Whether the two sets share at least one slot.
    pub fn intersects(&self, other: &TimeSlotSet) -> bool {
        // Probe the larger set with the smaller one.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|slot| large.contains(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Wire keys in a stable order (weekday first, then period symbol).
    pub fn to_wire_keys(&self) -> Vec<String> {
        self.slots.iter().map(TimeSlot::wire_key).collect()
    }

    pub fn from_wire_keys<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| TimeSlot::from_wire_key(key.as_ref()))
            .collect()
    }
}

impl FromIterator<TimeSlot> for TimeSlotSet {
    fn from_iter<T: IntoIterator<Item = TimeSlot>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Extend<TimeSlot> for TimeSlotSet {
    fn extend<T: IntoIterator<Item = TimeSlot>>(&mut self, iter: T) {
        self.slots.extend(iter);
    }
}

// ── BusyGrid ────────────────────────────────────────────────────────────────

/// The toggle state of the weekly busy grid.
///
/// The grid is the only thing user clicks mutate. A [`BusySet`] is never kept
/// alongside it: [`BusyGrid::busy_set`] rebuilds one from scratch every time a
/// search needs it.
#[derive(Debug, Clone)]
pub struct BusyGrid {
    table: PeriodTable,
    marked: HashSet<TimeSlot>,
}

impl BusyGrid {
    pub fn new(table: PeriodTable) -> Self {
        Self {
            table,
            marked: HashSet::new(),
        }
    }

    pub fn table(&self) -> &PeriodTable {
        &self.table
    }

    /// Flip one cell. Returns the new state of the cell, or `None` if the
    /// period is not part of the active table.
    pub fn toggle(&mut self, day: Weekday, period: char) -> Option<bool> {
        if !self.table.contains(period) {
            return None;
        }
        let slot = TimeSlot::new(day, period);
        if self.marked.remove(&slot) {
            Some(false)
        } else {
            self.marked.insert(slot);
            Some(true)
        }
    }

    pub fn is_marked(&self, day: Weekday, period: char) -> bool {
        self.marked.contains(&TimeSlot::new(day, period))
    }

    pub fn clear(&mut self) {
        self.marked.clear();
    }

    /// Rebuild the busy set from the current grid state.
    pub fn busy_set(&self) -> BusySet {
        let mut busy = BusySet::new();
        for day in Weekday::ALL {
            for period in self.table.periods() {
                if self.is_marked(day, period.symbol) {
                    busy.insert(TimeSlot::new(day, period.symbol));
                }
            }
        }
        busy
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
