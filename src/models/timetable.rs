//! Persisted timetable rows and the weekly presentation view.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{all_slots, Board, Day, Period, TimeSlot, DAYS, PERIODS};

/// One persisted timetable cell: (day, period) → subject, tied to its
/// canonical time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableRow {
    /// Day of week.
    pub day: Day,
    /// Period number (1-7).
    pub period: Period,
    /// Assigned subject code.
    pub subject_id: String,
    /// Resolved canonical time slot for this cell.
    pub slot: TimeSlot,
}

impl TimetableRow {
    /// Flattens a completed board into persistence rows, one per assigned
    /// cell, in canonical scan order.
    pub fn from_board(board: &Board) -> Vec<TimetableRow> {
        let mut rows = Vec::with_capacity(DAYS.len() * PERIODS.len());
        for (day, period) in all_slots() {
            if let Some(subject_id) = board.get(day, period) {
                rows.push(TimetableRow {
                    day,
                    period,
                    subject_id: subject_id.to_string(),
                    slot: TimeSlot::canonical(day, period),
                });
            }
        }
        rows
    }
}

/// One period entry in the weekly view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Period number (1-7).
    pub period: Period,
    /// "HH:MM-HH:MM" time label.
    pub time: String,
    /// Subject display name (falls back to the code).
    pub subject: String,
    /// Subject code.
    pub subject_code: String,
}

/// One day's column of the weekly view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    /// Day of week.
    pub day: Day,
    /// Entries in period order.
    pub entries: Vec<TimetableEntry>,
}

/// A rendered week, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableView {
    /// Days in canonical order.
    pub days: Vec<DayView>,
}

impl TimetableView {
    /// Renders a board, resolving subject names through `names`
    /// (subject code → display name).
    ///
    /// Empty cells are skipped; a validated board fills every cell.
    pub fn from_board(board: &Board, names: &HashMap<String, String>) -> Self {
        let days = DAYS
            .iter()
            .map(|&day| {
                let entries = PERIODS
                    .iter()
                    .filter_map(|&period| {
                        let code = board.get(day, period)?;
                        let subject = names
                            .get(code)
                            .filter(|name| !name.is_empty())
                            .cloned()
                            .unwrap_or_else(|| code.to_string());
                        Some(TimetableEntry {
                            period,
                            time: TimeSlot::canonical(day, period).time_label(),
                            subject,
                            subject_code: code.to_string(),
                        })
                    })
                    .collect();
                DayView { day, entries }
            })
            .collect();
        Self { days }
    }

    /// The entry at a cell, if present.
    pub fn entry(&self, day: Day, period: Period) -> Option<&TimetableEntry> {
        self.days
            .iter()
            .find(|d| d.day == day)?
            .entries
            .iter()
            .find(|e| e.period == period)
    }

    /// Total entries across the week.
    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}
