//! Faculty occupancy tracking.
//!
//! Tracks, per faculty, the committed (day, period) slots together with a
//! per-day load counter and a weekly load counter, and answers conflict
//! queries against the hard workload caps.
//!
//! Invariant: a faculty's busy-set size equals the sum of its per-day
//! loads, which equals its weekly load. `assign` counts each slot once, so
//! re-marking an already-committed slot leaves the counters untouched.

use std::collections::{HashMap, HashSet};

use crate::models::{Day, Period};

/// Most periods a faculty may teach on one day.
pub const MAX_DAILY_LOAD: u32 = 6;

/// Most periods a faculty may teach in one week.
pub const MAX_WEEKLY_LOAD: u32 = 30;

#[derive(Debug, Clone, Default)]
struct FacultyLoad {
    slots: HashSet<(Day, Period)>,
    per_day: [u32; 6],
    week: u32,
}

/// Busy-slot and workload state for a set of faculty.
///
/// `Clone` produces an independent snapshot: per-attempt working copies are
/// cloned from the external baseline and never written back to it.
#[derive(Debug, Clone, Default)]
pub struct FacultyOccupancy {
    loads: HashMap<String, FacultyLoad>,
}

impl FacultyOccupancy {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether assigning `faculty` at (day, period) would clash: the slot
    /// is already committed, or the daily or weekly cap is reached.
    pub fn is_conflict(&self, faculty: &str, day: Day, period: Period) -> bool {
        match self.loads.get(faculty) {
            Some(load) => {
                load.slots.contains(&(day, period))
                    || load.per_day[day.index()] >= MAX_DAILY_LOAD
                    || load.week >= MAX_WEEKLY_LOAD
            }
            None => false,
        }
    }

    /// Commits a slot. Idempotent per slot: counters move only on the
    /// first insertion.
    pub fn assign(&mut self, faculty: &str, day: Day, period: Period) {
        let load = self.loads.entry(faculty.to_string()).or_default();
        if load.slots.insert((day, period)) {
            load.per_day[day.index()] += 1;
            load.week += 1;
        }
    }

    /// Releases a slot. Counters never underflow.
    pub fn unassign(&mut self, faculty: &str, day: Day, period: Period) {
        if let Some(load) = self.loads.get_mut(faculty) {
            if load.slots.remove(&(day, period)) {
                load.per_day[day.index()] = load.per_day[day.index()].saturating_sub(1);
                load.week = load.week.saturating_sub(1);
            }
        }
    }

    /// Whether the faculty has committed this exact slot.
    pub fn is_busy(&self, faculty: &str, day: Day, period: Period) -> bool {
        self.loads
            .get(faculty)
            .is_some_and(|load| load.slots.contains(&(day, period)))
    }

    /// Number of committed slots for a faculty.
    pub fn busy_count(&self, faculty: &str) -> usize {
        self.loads.get(faculty).map_or(0, |load| load.slots.len())
    }

    /// Committed periods for a faculty on one day.
    pub fn day_load(&self, faculty: &str, day: Day) -> u32 {
        self.loads
            .get(faculty)
            .map_or(0, |load| load.per_day[day.index()])
    }

    /// Committed periods for a faculty across the week.
    pub fn week_load(&self, faculty: &str) -> u32 {
        self.loads.get(faculty).map_or(0, |load| load.week)
    }
}
