//! The weekly board: a 6×7 grid of subject assignments.
//!
//! Cells transition `None` → assigned → (possibly) `None` again during
//! backtracking. A valid final board has every one of its 42 cells assigned.

use std::collections::HashMap;

use super::{all_slots, Day, Period, DAYS, PERIODS};

/// The in-progress timetable grid for one class.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [[Option<String>; 7]; 6],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: Default::default(),
        }
    }

    /// Subject id at a cell, if assigned.
    ///
    /// Out-of-range periods read as empty, so adjacency probes at the grid
    /// edges need no special casing.
    pub fn get(&self, day: Day, period: Period) -> Option<&str> {
        if !(1..=7).contains(&period) {
            return None;
        }
        self.cells[day.index()][usize::from(period) - 1].as_deref()
    }

    /// Whether a cell is unassigned.
    #[inline]
    pub fn is_free(&self, day: Day, period: Period) -> bool {
        self.get(day, period).is_none()
    }

    /// Assigns a subject to a cell. `period` must be in 1..=7.
    pub fn set(&mut self, day: Day, period: Period, subject_id: impl Into<String>) {
        self.cells[day.index()][usize::from(period) - 1] = Some(subject_id.into());
    }

    /// Clears a cell. `period` must be in 1..=7.
    pub fn clear(&mut self, day: Day, period: Period) {
        self.cells[day.index()][usize::from(period) - 1] = None;
    }

    /// Unassigned cells in canonical scan order.
    pub fn open_slots(&self) -> Vec<(Day, Period)> {
        all_slots()
            .into_iter()
            .filter(|&(day, period)| self.is_free(day, period))
            .collect()
    }

    /// Number of assigned cells.
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Whether every cell is assigned.
    pub fn is_full(&self) -> bool {
        self.filled_count() == DAYS.len() * PERIODS.len()
    }

    /// Occupied slots grouped by subject id, in canonical scan order.
    pub fn slots_by_subject(&self) -> HashMap<String, Vec<(Day, Period)>> {
        let mut map: HashMap<String, Vec<(Day, Period)>> = HashMap::new();
        for (day, period) in all_slots() {
            if let Some(subject_id) = self.get(day, period) {
                map.entry(subject_id.to_string()).or_default().push((day, period));
            }
        }
        map
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
