//! Course time-string codec.
//!
//! A course time string is one or more comma-separated tokens, each a weekday
//! symbol followed by a run of period symbols: `"一234,三5"` means Monday
//! periods 2, 3 and 4 plus Wednesday period 5. Which period symbols are valid
//! comes from the active [`PeriodTable`].
//!
//! Decoding never fails. A token that does not contain a weekday symbol
//! directly followed by at least one period symbol contributes no slots, and
//! the display formatter passes it through untouched.

use crate::period::{PeriodTable, Weekday};
use crate::slot::{TimeSlot, TimeSlotSet};

const TOKEN_SEPARATOR: char = ',';
const DISPLAY_SEPARATOR: &str = " / ";
const DAY_PREFIX: char = '週';

/// Decode a raw course time string into the set of slots it occupies.
///
/// # Examples
///
/// ```
/// use course_sieve::codec::decode;
/// use course_sieve::period::{PeriodTable, Weekday};
/// use course_sieve::slot::TimeSlot;
///
/// let slots = decode("一23,三5", &PeriodTable::standard());
/// assert_eq!(slots.len(), 3);
/// assert!(slots.contains(&TimeSlot::new(Weekday::Wednesday, '5')));
/// ```
pub fn decode(raw: &str, table: &PeriodTable) -> TimeSlotSet {
    raw.split(TOKEN_SEPARATOR)
        .filter_map(|token| match_token(token, |p| table.contains(p)))
        .flat_map(|(day, periods)| periods.into_iter().map(move |p| TimeSlot::new(day, p)))
        .collect()
}

/// Render a raw course time string for display.
///
/// Each matching token becomes `"週<day> <p>,<p>,..."`; tokens are joined with
/// `" / "`. Any ASCII digit is shown as a period, so `"一10"` reads
/// `"週一 1,0"` even though `0` is not in the table.
///
/// # Examples
///
/// ```
/// use course_sieve::codec::format_for_display;
/// use course_sieve::period::PeriodTable;
///
/// let shown = format_for_display("一234,三5", &PeriodTable::standard());
/// assert_eq!(shown, "週一 2,3,4 / 週三 5");
/// ```
pub fn format_for_display(raw: &str, table: &PeriodTable) -> String {
    let shown = |p: char| table.contains(p) || p.is_ascii_digit();
    raw.split(TOKEN_SEPARATOR)
        .map(|token| match match_token(token, shown) {
            Some((day, periods)) => {
                let periods: Vec<String> = periods.iter().map(char::to_string).collect();
                format!("{DAY_PREFIX}{} {}", day.symbol(), periods.join(","))
            }
            None => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}

/// Find the first weekday symbol in `token` that is immediately followed by
/// one or more accepted period symbols, and return the day with its period run.
fn match_token(token: &str, accepts: impl Fn(char) -> bool) -> Option<(Weekday, Vec<char>)> {
    let chars: Vec<char> = token.chars().collect();

    chars.iter().enumerate().find_map(|(i, &c)| {
        let day = Weekday::from_symbol(c)?;
        let periods: Vec<char> = chars[i + 1..]
            .iter()
            .copied()
            .take_while(|&p| accepts(p))
            .collect();
        (!periods.is_empty()).then_some((day, periods))
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
