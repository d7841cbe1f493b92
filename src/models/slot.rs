//! The weekly grid: days, periods, clock times, and practical blocks.
//!
//! The teaching week is fixed at 6 days × 7 periods (42 cells). Each period
//! carries canonical start/end clock times; periods 1-4 run before lunch,
//! 5-7 after. Practical subjects occupy one of three contiguous period
//! triples on a single day; a block never crosses the lunch boundary.

use serde::{Deserialize, Serialize};

/// A teaching day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Teaching days in canonical order.
pub const DAYS: [Day; 6] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
];

impl Day {
    /// Position in the canonical day order (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A period number within a day (1-based).
pub type Period = u8;

/// Periods in canonical order.
pub const PERIODS: [Period; 7] = [1, 2, 3, 4, 5, 6, 7];

/// Canonical (start, end) clock times per period, "HH:MM".
pub const PERIOD_TIMES: [(&str, &str); 7] = [
    ("09:30", "10:20"),
    ("10:20", "11:10"),
    ("11:30", "12:20"),
    ("12:20", "13:10"),
    ("14:00", "14:50"),
    ("14:50", "15:40"),
    ("15:40", "16:30"),
];

/// Every (day, period) cell of the weekly grid in canonical scan order.
pub fn all_slots() -> Vec<(Day, Period)> {
    let mut slots = Vec::with_capacity(DAYS.len() * PERIODS.len());
    for &day in &DAYS {
        for &period in &PERIODS {
            slots.push((day, period));
        }
    }
    slots
}

/// A contiguous three-period run on a single day.
pub type Block = [Period; 3];

/// Valid practical blocks. (1,2,3) and (2,3,4) are morning blocks and
/// overlap on periods 2-3; (5,6,7) is the sole afternoon block.
pub const PRACTICAL_BLOCKS: [Block; 3] = [[1, 2, 3], [2, 3, 4], [5, 6, 7]];

/// Whether a block is one of the two morning blocks.
#[inline]
pub fn is_morning_block(block: Block) -> bool {
    block == [1, 2, 3] || block == [2, 3, 4]
}

/// Whether sorted periods form one of the valid practical blocks.
pub fn is_valid_practical_block(periods: &[Period]) -> bool {
    PRACTICAL_BLOCKS.iter().any(|b| b[..] == *periods)
}

/// One (day, period) cell with its canonical clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of week.
    pub day: Day,
    /// Period number (1-7).
    pub period: Period,
    /// Start clock time, "HH:MM".
    pub start: String,
    /// End clock time, "HH:MM".
    pub end: String,
}

impl TimeSlot {
    /// Resolves the canonical slot for a grid cell.
    ///
    /// `period` must be in 1..=7.
    pub fn canonical(day: Day, period: Period) -> Self {
        let (start, end) = PERIOD_TIMES[usize::from(period) - 1];
        Self {
            day,
            period,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// "HH:MM-HH:MM" label for display.
    pub fn time_label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}
