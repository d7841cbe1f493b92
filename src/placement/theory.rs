//! Theory placement: most-constrained-cell backtracking.
//!
//! Theory subjects fill every slot left open by the earlier phases, five
//! periods each. The search always expands the open cell with the fewest
//! eligible subjects; for that cell, candidates are ordered to spread each
//! subject across the week. A subject never takes a third period on one
//! day or a period adjacent to one it already holds.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::error::GenerationError;
use crate::models::{Day, Period, Subject};

use super::AttemptState;

/// Places every theory subject on the remaining open slots.
///
/// Returns `Ok(false)` when the search proves no complete placement exists
/// (the attempt is retried), and a configuration error when the open-slot
/// count does not match the pool's total requirement: that mismatch means
/// the earlier phases were mis-sized, and no retry can fix it.
pub fn place_theory(
    state: &mut AttemptState,
    subjects: &[Subject],
    faculty_map: &HashMap<String, String>,
) -> Result<bool, GenerationError> {
    let remaining: Vec<u8> = subjects
        .iter()
        .map(|s| s.subject_type.weekly_periods())
        .collect();
    let required: usize = remaining.iter().map(|&r| usize::from(r)).sum();
    let open = state.board.open_slots();
    if open.len() != required {
        return Err(GenerationError::configuration(format!(
            "weekly slot distribution leaves {} open periods but theory subjects need exactly {}",
            open.len(),
            required
        )));
    }

    let mut faculty = Vec::with_capacity(subjects.len());
    for subject in subjects {
        match faculty_map.get(&subject.id) {
            Some(f) => faculty.push(f.as_str()),
            None => return Ok(false),
        }
    }

    // Fail fast when a subject cannot even count enough clash-free cells;
    // the search below could only prove that by exhaustion
    for (idx, need) in remaining.iter().enumerate() {
        let free = open
            .iter()
            .filter(|&&(day, period)| !state.occupancy.is_conflict(faculty[idx], day, period))
            .count();
        if free < usize::from(*need) {
            return Ok(false);
        }
    }

    let day_count = vec![[0u8; 6]; subjects.len()];
    let mut search = TheorySearch {
        state,
        subjects,
        faculty,
        remaining,
        day_count,
    };
    Ok(search.run())
}

/// Explains a theory-phase dead end: names the first subject whose faculty
/// has fewer clash-free open periods than the subject still needs.
pub fn theory_failure_reason(
    state: &AttemptState,
    subjects: &[Subject],
    faculty_map: &HashMap<String, String>,
) -> String {
    let open = state.board.open_slots();
    for subject in subjects {
        let Some(faculty) = faculty_map.get(&subject.id) else {
            return format!("no faculty mapping for subject {}", subject.id);
        };
        let free = open
            .iter()
            .filter(|&&(day, period)| !state.occupancy.is_conflict(faculty, day, period))
            .count();
        let needed = usize::from(subject.subject_type.weekly_periods());
        if free < needed {
            return format!(
                "unable to place theory subject {}: faculty {} has only {} clash-free periods, {} required",
                subject.id, faculty, free, needed
            );
        }
    }
    "unable to place theory subjects under the current constraints".to_string()
}

struct TheorySearch<'a> {
    state: &'a mut AttemptState,
    subjects: &'a [Subject],
    faculty: Vec<&'a str>,
    remaining: Vec<u8>,
    day_count: Vec<[u8; 6]>,
}

impl TheorySearch<'_> {
    fn days_used(&self, idx: usize) -> usize {
        self.day_count[idx].iter().filter(|&&c| c > 0).count()
    }

    /// Subjects eligible for a cell, in try order.
    fn eligible(&self, day: Day, period: Period) -> Vec<usize> {
        let mut out = Vec::new();
        for idx in 0..self.subjects.len() {
            if self.remaining[idx] == 0 {
                continue;
            }
            // At most two periods of one subject per day
            if self.day_count[idx][day.index()] >= 2 {
                continue;
            }
            let sid = self.subjects[idx].id.as_str();
            // No back-to-back repeats of the same subject
            if self.state.board.get(day, period - 1) == Some(sid)
                || self.state.board.get(day, period + 1) == Some(sid)
            {
                continue;
            }
            if self.state.occupancy.is_conflict(self.faculty[idx], day, period) {
                continue;
            }
            out.push(idx);
        }

        // Prefer spreading: fewest periods today, fewest days touched,
        // most periods still needed, subject id as the final tiebreak
        out.sort_by_key(|&idx| {
            (
                self.day_count[idx][day.index()],
                self.days_used(idx),
                Reverse(self.remaining[idx]),
                self.subjects[idx].id.clone(),
            )
        });
        out
    }

    /// The open cell with the fewest eligible subjects.
    fn most_constrained_cell(&self) -> Option<((Day, Period), Vec<usize>)> {
        let mut best: Option<((Day, Period), Vec<usize>)> = None;
        for (day, period) in self.state.board.open_slots() {
            let candidates = self.eligible(day, period);
            let tighter = match &best {
                None => true,
                Some((_, current)) => candidates.len() < current.len(),
            };
            if tighter {
                let len = candidates.len();
                best = Some(((day, period), candidates));
                if len <= 1 {
                    break;
                }
            }
        }
        best
    }

    fn run(&mut self) -> bool {
        if self.remaining.iter().all(|&r| r == 0) {
            return self.state.board.is_full();
        }

        let Some(((day, period), candidates)) = self.most_constrained_cell() else {
            return false;
        };
        // A cell nothing can fill dooms the whole branch
        if candidates.is_empty() {
            return false;
        }

        for idx in candidates {
            let faculty = self.faculty[idx];
            self.state
                .board
                .set(day, period, self.subjects[idx].id.as_str());
            self.remaining[idx] -= 1;
            self.day_count[idx][day.index()] += 1;
            self.state.occupancy.assign(faculty, day, period);

            if self.run() {
                return true;
            }

            self.state.occupancy.unassign(faculty, day, period);
            self.day_count[idx][day.index()] -= 1;
            self.remaining[idx] += 1;
            self.state.board.clear(day, period);
        }
        false
    }
}
