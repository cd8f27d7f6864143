//! Fixed weekday and class-period lookup tables.
//!
//! A timetable cell is addressed by a [`Weekday`] (five teaching days) and a
//! period symbol. Which period symbols exist depends on the deployment: the
//! standard table has 14 periods (`1`..`9`, `N`, `A`..`D`), the extended table
//! adds the late evening periods `E` and `F` and shifts the evening block onto
//! the hour. The active table is chosen with [`PeriodVariant`], so the codec
//! and matcher never branch on the deployment themselves.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

// ── Weekday ─────────────────────────────────────────────────────────────────

/// One of the five teaching days of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days in grid order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// The 1-based ordinal used in wire keys (`Monday` = 1).
    pub fn ordinal(self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Weekday> {
        match ordinal {
            1..=5 => Some(Weekday::ALL[usize::from(ordinal - 1)]),
            _ => None,
        }
    }

    /// The symbol used in course time strings (`一` for Monday).
    pub fn symbol(self) -> char {
        match self {
            Weekday::Monday => '一',
            Weekday::Tuesday => '二',
            Weekday::Wednesday => '三',
            Weekday::Thursday => '四',
            Weekday::Friday => '五',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Weekday> {
        Weekday::ALL.into_iter().find(|day| day.symbol() == symbol)
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
        }
    }
}

// ── Period ──────────────────────────────────────────────────────────────────

/// A single class period and its wall-clock interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    /// The symbol used in course time strings and wire keys.
    pub symbol: char,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Period {
    /// The interval as shown next to the period in the busy grid, e.g. `"08:00-08:50"`.
    pub fn interval_label(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Which period table a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodVariant {
    /// 14 periods: `1`..`4`, `N`, `5`..`9`, `A`..`D`.
    #[default]
    Standard,
    /// 16 periods: the standard day block plus `A`..`F` on the hour.
    Extended,
}

type RawPeriod = (char, (u32, u32), (u32, u32));

const DAY_PERIODS: [RawPeriod; 10] = [
    ('1', (8, 0), (8, 50)),
    ('2', (9, 0), (9, 50)),
    ('3', (10, 0), (10, 50)),
    ('4', (11, 0), (11, 50)),
    ('N', (12, 0), (13, 0)),
    ('5', (13, 0), (13, 50)),
    ('6', (14, 0), (14, 50)),
    ('7', (15, 0), (15, 50)),
    ('8', (16, 0), (16, 50)),
    ('9', (17, 0), (17, 50)),
];

const STANDARD_EVENING: [RawPeriod; 4] = [
    ('A', (18, 30), (19, 20)),
    ('B', (19, 25), (20, 15)),
    ('C', (20, 20), (21, 10)),
    ('D', (21, 15), (22, 5)),
];

const EXTENDED_EVENING: [RawPeriod; 6] = [
    ('A', (18, 0), (18, 50)),
    ('B', (19, 0), (19, 50)),
    ('C', (20, 0), (20, 50)),
    ('D', (21, 0), (21, 50)),
    ('E', (22, 0), (22, 50)),
    ('F', (23, 0), (23, 50)),
];

/// The ordered, immutable period table of one deployment variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTable {
    variant: PeriodVariant,
    periods: Vec<Period>,
}

impl PeriodTable {
    pub fn new(variant: PeriodVariant) -> Self {
        let evening: &[RawPeriod] = match variant {
            PeriodVariant::Standard => &STANDARD_EVENING,
            PeriodVariant::Extended => &EXTENDED_EVENING,
        };
        let periods = DAY_PERIODS
            .iter()
            .chain(evening)
            .map(|&(symbol, start, end)| Period {
                symbol,
                start: clock(start),
                end: clock(end),
            })
            .collect();

        Self { variant, periods }
    }

    pub fn standard() -> Self {
        Self::new(PeriodVariant::Standard)
    }

    pub fn extended() -> Self {
        Self::new(PeriodVariant::Extended)
    }

    pub fn variant(&self) -> PeriodVariant {
        self.variant
    }

    /// Periods in grid (display) order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn get(&self, symbol: char) -> Option<&Period> {
        self.periods.iter().find(|p| p.symbol == symbol)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.get(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl Default for PeriodTable {
    fn default() -> Self {
        Self::new(PeriodVariant::default())
    }
}

fn clock((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_has_fourteen_periods() {
        let table = PeriodTable::standard();
        assert_eq!(table.len(), 14);
        let symbols: String = table.periods().iter().map(|p| p.symbol).collect();
        assert_eq!(symbols, "1234N56789ABCD");
        assert!(!table.contains('E'));
        assert!(!table.contains('F'));
    }

    #[test]
    fn test_extended_table_has_sixteen_periods() {
        let table = PeriodTable::extended();
        assert_eq!(table.len(), 16);
        assert!(table.contains('E'));
        assert!(table.contains('F'));
        assert_eq!(table.get('F').unwrap().interval_label(), "23:00-23:50");
    }

    #[test]
    fn test_evening_intervals_differ_between_variants() {
        let standard = PeriodTable::standard();
        let extended = PeriodTable::extended();
        assert_eq!(standard.get('A').unwrap().interval_label(), "18:30-19:20");
        assert_eq!(extended.get('A').unwrap().interval_label(), "18:00-18:50");
        assert_eq!(standard.get('D').unwrap().interval_label(), "21:15-22:05");
    }

    #[test]
    fn test_lunch_period_spans_full_hour() {
        let table = PeriodTable::default();
        assert_eq!(table.get('N').unwrap().interval_label(), "12:00-13:00");
    }

    #[test]
    fn test_every_period_ends_after_it_starts() {
        for table in [PeriodTable::standard(), PeriodTable::extended()] {
            for period in table.periods() {
                assert!(period.end > period.start, "period {}", period.symbol);
            }
        }
    }

    #[test]
    fn test_weekday_symbol_and_ordinal_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_symbol(day.symbol()), Some(day));
            assert_eq!(Weekday::from_ordinal(day.ordinal()), Some(day));
        }
        assert_eq!(Weekday::from_symbol('六'), None);
        assert_eq!(Weekday::from_ordinal(0), None);
        assert_eq!(Weekday::from_ordinal(6), None);
    }

    #[test]
    fn test_weekday_maps_to_chrono() {
        assert_eq!(Weekday::Wednesday.to_chrono(), chrono::Weekday::Wed);
    }

    #[test]
    fn test_variant_deserializes_lowercase() {
        let v: PeriodVariant = serde_json::from_str("\"extended\"").unwrap();
        assert_eq!(v, PeriodVariant::Extended);
    }
}
