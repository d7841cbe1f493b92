//! Mentoring placement.
//!
//! One mentoring period per week. Preference runs from the end of the
//! week backwards: Saturday period 7 first, the remaining Saturday periods
//! in descending order, then every other day in descending period order.
//! The first slot that is empty on the board and clash-free for the
//! mentor is taken.

use std::collections::HashMap;

use crate::models::{Day, Period, Subject, DAYS, PERIODS};

use super::AttemptState;

/// Places the mentoring period, or returns `false` if no slot is both
/// free and clash-free.
pub fn place_mentoring(
    state: &mut AttemptState,
    subject: &Subject,
    faculty_map: &HashMap<String, String>,
) -> bool {
    let Some(faculty) = faculty_map.get(&subject.id) else {
        return false;
    };

    let mut candidates: Vec<(Day, Period)> = vec![(Day::Saturday, 7)];
    candidates.extend(
        PERIODS
            .iter()
            .rev()
            .filter(|&&p| p != 7)
            .map(|&p| (Day::Saturday, p)),
    );
    for &day in DAYS.iter().filter(|&&d| d != Day::Saturday) {
        candidates.extend(PERIODS.iter().rev().map(|&p| (day, p)));
    }

    for (day, period) in candidates {
        if !state.board.is_free(day, period) {
            continue;
        }
        if state.occupancy.is_conflict(faculty, day, period) {
            continue;
        }
        state.board.set(day, period, subject.id.as_str());
        state.occupancy.assign(faculty, day, period);
        return true;
    }
    false
}
