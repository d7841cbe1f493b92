//! CRT placement.
//!
//! Two CRT periods per week on non-adjacent slots, never Monday period 1.
//! A short preference list spreads the periods across early slots on
//! different days; the rest of the grid, in canonical order, is the
//! fallback. Slots are consumed greedily until two are placed.

use std::collections::HashMap;

use crate::models::{all_slots, Day, Period, Subject, SubjectType};

use super::AttemptState;

/// Preferred CRT slots, tried before the rest of the grid.
const PREFERRED: [(Day, Period); 6] = [
    (Day::Tuesday, 1),
    (Day::Thursday, 1),
    (Day::Wednesday, 2),
    (Day::Friday, 2),
    (Day::Saturday, 2),
    (Day::Monday, 2),
];

/// Places both CRT periods, or returns `false` if fewer than two slots
/// survive the bans and clash checks.
pub fn place_crt(
    state: &mut AttemptState,
    subject: &Subject,
    faculty_map: &HashMap<String, String>,
) -> bool {
    let Some(faculty) = faculty_map.get(&subject.id) else {
        return false;
    };
    let needed = usize::from(SubjectType::Crt.weekly_periods());

    let mut candidates: Vec<(Day, Period)> = PREFERRED.to_vec();
    candidates.extend(all_slots().into_iter().filter(|s| !PREFERRED.contains(s)));

    let mut placed: Vec<(Day, Period)> = Vec::with_capacity(needed);
    for (day, period) in candidates {
        if placed.len() >= needed {
            break;
        }
        // Monday first period is reserved for the week opening
        if day == Day::Monday && period == 1 {
            continue;
        }
        if !state.board.is_free(day, period) {
            continue;
        }
        if placed
            .iter()
            .any(|&(d, p)| d == day && p.abs_diff(period) == 1)
        {
            continue;
        }
        if state.occupancy.is_conflict(faculty, day, period) {
            continue;
        }
        state.board.set(day, period, subject.id.as_str());
        state.occupancy.assign(faculty, day, period);
        placed.push((day, period));
    }

    placed.len() == needed
}
