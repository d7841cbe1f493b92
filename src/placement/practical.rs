//! Practical block placement.
//!
//! Each practical subject takes one contiguous three-period block on a
//! single day, at most one practical block per day per class. Search is
//! depth-first over (day, block) candidates, most-constrained subject
//! first; a complete assignment must land at least one morning and one
//! afternoon block. The day order rotates with the attempt number and the
//! block order reverses on odd attempts, so retries explore different
//! corners of the search space.

use std::collections::{HashMap, HashSet};

use crate::models::{is_morning_block, Block, Day, Period, Subject, DAYS, PRACTICAL_BLOCKS};

use super::AttemptState;

/// Places every practical subject, or returns `false` when no complete
/// assignment exists under the current state.
///
/// `practical_busy` holds slots where another class of the same branch
/// already runs a practical; those periods are off-limits for lab blocks.
/// Subjects without a faculty mapping are rejected by the generator before
/// any phase runs.
pub fn place_practicals(
    state: &mut AttemptState,
    subjects: &[Subject],
    faculty_map: &HashMap<String, String>,
    practical_busy: &HashSet<(Day, Period)>,
    attempt: usize,
) -> bool {
    let shift = attempt % DAYS.len();
    let day_order: Vec<Day> = DAYS[shift..]
        .iter()
        .chain(DAYS[..shift].iter())
        .copied()
        .collect();
    let mut block_order: Vec<Block> = PRACTICAL_BLOCKS.to_vec();
    if attempt % 2 == 1 {
        block_order.reverse();
    }

    // Candidate (day, block) pairs per subject under the current state.
    // The DFS re-checks board and faculty state as earlier choices land.
    let mut candidates: Vec<Vec<(Day, Block)>> = Vec::with_capacity(subjects.len());
    for subject in subjects {
        let Some(faculty) = faculty_map.get(&subject.id) else {
            return false;
        };
        let mut options = Vec::new();
        for &day in &day_order {
            for &block in &block_order {
                if block.iter().any(|&p| practical_busy.contains(&(day, p))) {
                    continue;
                }
                if block.iter().any(|&p| !state.board.is_free(day, p)) {
                    continue;
                }
                if block
                    .iter()
                    .any(|&p| state.occupancy.is_conflict(faculty, day, p))
                {
                    continue;
                }
                options.push((day, block));
            }
        }
        candidates.push(options);
    }

    // Most-constrained subject first; ties keep pool order (stable sort)
    let mut order: Vec<usize> = (0..subjects.len()).collect();
    order.sort_by_key(|&i| candidates[i].len());

    let mut used_days = HashSet::new();
    let mut morning = 0usize;
    let mut afternoon = 0usize;
    search(
        0,
        &order,
        subjects,
        &candidates,
        faculty_map,
        state,
        &mut used_days,
        &mut morning,
        &mut afternoon,
    )
}

#[allow(clippy::too_many_arguments)]
fn search(
    position: usize,
    order: &[usize],
    subjects: &[Subject],
    candidates: &[Vec<(Day, Block)>],
    faculty_map: &HashMap<String, String>,
    state: &mut AttemptState,
    used_days: &mut HashSet<Day>,
    morning: &mut usize,
    afternoon: &mut usize,
) -> bool {
    if position == order.len() {
        // Per-subject validity isn't enough: the set must cover both
        // halves of the day
        return *morning > 0 && *afternoon > 0;
    }

    let subject = &subjects[order[position]];
    let Some(faculty) = faculty_map.get(&subject.id) else {
        return false;
    };

    for &(day, block) in &candidates[order[position]] {
        if used_days.contains(&day) {
            continue;
        }
        if block.iter().any(|&p| !state.board.is_free(day, p)) {
            continue;
        }
        if block
            .iter()
            .any(|&p| state.occupancy.is_conflict(faculty, day, p))
        {
            continue;
        }

        used_days.insert(day);
        for &period in &block {
            state.board.set(day, period, subject.id.as_str());
            state.occupancy.assign(faculty, day, period);
        }
        let in_morning = is_morning_block(block);
        if in_morning {
            *morning += 1;
        } else {
            *afternoon += 1;
        }

        if search(
            position + 1,
            order,
            subjects,
            candidates,
            faculty_map,
            state,
            used_days,
            morning,
            afternoon,
        ) {
            return true;
        }

        if in_morning {
            *morning -= 1;
        } else {
            *afternoon -= 1;
        }
        for &period in &block {
            state.board.clear(day, period);
            state.occupancy.unassign(faculty, day, period);
        }
        used_days.remove(&day);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{is_valid_practical_block, SubjectType};
    use crate::occupancy::FacultyOccupancy;

    fn lab_subjects() -> Vec<Subject> {
        vec![
            Subject::new("LAB1", SubjectType::Practical),
            Subject::new("LAB2", SubjectType::Practical),
            Subject::new("LAB3", SubjectType::Practical),
        ]
    }

    fn distinct_faculty(subjects: &[Subject]) -> HashMap<String, String> {
        subjects
            .iter()
            .map(|s| (s.id.clone(), format!("F-{}", s.id)))
            .collect()
    }

    fn placed_blocks(state: &AttemptState, subjects: &[Subject]) -> Vec<(Day, Vec<Period>)> {
        let by_subject = state.board.slots_by_subject();
        subjects
            .iter()
            .map(|s| {
                let slots = &by_subject[&s.id];
                let day = slots[0].0;
                let mut periods: Vec<Period> = slots.iter().map(|&(_, p)| p).collect();
                periods.sort_unstable();
                assert!(slots.iter().all(|&(d, _)| d == day));
                (day, periods)
            })
            .collect()
    }

    #[test]
    fn test_places_all_subjects_on_distinct_days() {
        let subjects = lab_subjects();
        let faculty = distinct_faculty(&subjects);
        let mut state = AttemptState::new(&FacultyOccupancy::new());

        assert!(place_practicals(
            &mut state,
            &subjects,
            &faculty,
            &HashSet::new(),
            0
        ));

        let blocks = placed_blocks(&state, &subjects);
        let days: HashSet<Day> = blocks.iter().map(|&(d, _)| d).collect();
        assert_eq!(days.len(), 3);
        let mut morning = 0;
        let mut afternoon = 0;
        for (_, periods) in &blocks {
            assert!(is_valid_practical_block(periods));
            let block: Block = [periods[0], periods[1], periods[2]];
            if is_morning_block(block) {
                morning += 1;
            } else {
                afternoon += 1;
            }
        }
        assert!(morning >= 1 && afternoon >= 1);
    }

    #[test]
    fn test_occupancy_updated_for_placed_blocks() {
        let subjects = lab_subjects();
        let faculty = distinct_faculty(&subjects);
        let mut state = AttemptState::new(&FacultyOccupancy::new());

        assert!(place_practicals(
            &mut state,
            &subjects,
            &faculty,
            &HashSet::new(),
            0
        ));
        for subject in &subjects {
            assert_eq!(state.occupancy.week_load(&format!("F-{}", subject.id)), 3);
        }
    }

    #[test]
    fn test_shared_lab_slots_avoided() {
        let subjects = lab_subjects();
        let faculty = distinct_faculty(&subjects);
        // Sibling sections hold the morning labs on Monday through Friday
        let mut busy = HashSet::new();
        for &day in &[Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday] {
            for period in 1..=4 {
                busy.insert((day, period));
            }
        }
        let mut state = AttemptState::new(&FacultyOccupancy::new());

        assert!(place_practicals(&mut state, &subjects, &faculty, &busy, 0));
        for (day, periods) in placed_blocks(&state, &subjects) {
            for &period in &periods {
                assert!(!busy.contains(&(day, period)));
            }
        }
    }

    #[test]
    fn test_single_faculty_for_all_labs_still_places() {
        // One faculty teaching every lab: blocks must dodge each other
        let subjects = lab_subjects();
        let faculty: HashMap<String, String> = subjects
            .iter()
            .map(|s| (s.id.clone(), "F-ALL".to_string()))
            .collect();
        let mut state = AttemptState::new(&FacultyOccupancy::new());

        assert!(place_practicals(
            &mut state,
            &subjects,
            &faculty,
            &HashSet::new(),
            0
        ));
        assert_eq!(state.occupancy.week_load("F-ALL"), 9);
    }

    #[test]
    fn test_fails_when_afternoons_unavailable() {
        let subjects = lab_subjects();
        let faculty = distinct_faculty(&subjects);
        // Every afternoon slot is taken by sibling-section labs, so the
        // morning+afternoon distribution can never be met
        let mut busy = HashSet::new();
        for &day in &DAYS {
            for period in 5..=7 {
                busy.insert((day, period));
            }
        }
        let mut state = AttemptState::new(&FacultyOccupancy::new());

        assert!(!place_practicals(&mut state, &subjects, &faculty, &busy, 0));
    }

    #[test]
    fn test_attempt_rotation_changes_days() {
        let subjects = lab_subjects();
        let faculty = distinct_faculty(&subjects);

        let mut first = AttemptState::new(&FacultyOccupancy::new());
        assert!(place_practicals(
            &mut first,
            &subjects,
            &faculty,
            &HashSet::new(),
            0
        ));
        let mut third = AttemptState::new(&FacultyOccupancy::new());
        assert!(place_practicals(
            &mut third,
            &subjects,
            &faculty,
            &HashSet::new(),
            2
        ));

        // Attempt 2 rotates the day order to start from Wednesday
        let first_days: HashSet<Day> = placed_blocks(&first, &subjects)
            .iter()
            .map(|&(d, _)| d)
            .collect();
        let third_days: HashSet<Day> = placed_blocks(&third, &subjects)
            .iter()
            .map(|&(d, _)| d)
            .collect();
        assert_ne!(first_days, third_days);
    }

    #[test]
    fn test_missing_faculty_mapping_fails() {
        let subjects = lab_subjects();
        let mut state = AttemptState::new(&FacultyOccupancy::new());
        assert!(!place_practicals(
            &mut state,
            &subjects,
            &HashMap::new(),
            &HashSet::new(),
            0
        ));
    }
}
