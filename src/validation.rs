//! Full-schedule validation.
//!
//! Re-derives per-subject slot lists from a completed board and checks
//! every hard constraint, independent of whatever checks the placement
//! phases already performed:
//! - No empty cell; exactly 42 filled cells
//! - Theory subjects hold exactly 5 periods, practicals exactly 3 forming
//!   one valid block on a single day
//! - The practical set covers both morning and afternoon
//! - CRT holds exactly 2 periods and never Monday period 1
//! - Mentoring holds exactly 1 period
//! - No theory/CRT/mentoring subject appears more than twice on one day
//! - Replaying the whole board against the external occupancy baseline
//!   produces zero faculty clashes (the authoritative safety check)

use std::collections::HashMap;

use crate::models::{
    all_slots, is_morning_block, is_valid_practical_block, Block, Board, Day, Period, Subject,
    DAYS, PERIODS,
};
use crate::occupancy::FacultyOccupancy;

/// A hard-constraint violation found in a completed board.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleViolation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A board cell is empty.
    EmptySlot,
    /// A subject occupies the wrong number of periods.
    PeriodCount,
    /// A practical's periods are not one valid block on a single day.
    BrokenBlock,
    /// The practical set misses the morning or the afternoon.
    BlockDistribution,
    /// CRT sits in a banned slot.
    ForbiddenSlot,
    /// A subject appears more than twice on one day.
    DailyRepetition,
    /// A faculty is double-booked or over a workload cap.
    FacultyClash,
}

impl ScheduleViolation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a completed board against every hard constraint.
///
/// Returns the first violation found. `external` is the occupancy baseline
/// the attempt started from; the whole board is replayed on a copy of it
/// to establish faculty safety from scratch.
#[allow(clippy::too_many_arguments)]
pub fn validate_schedule(
    board: &Board,
    theory: &[Subject],
    practical: &[Subject],
    crt: &Subject,
    mentoring: &Subject,
    faculty_map: &HashMap<String, String>,
    external: &FacultyOccupancy,
) -> Result<(), ScheduleViolation> {
    for (day, period) in all_slots() {
        if board.is_free(day, period) {
            return Err(ScheduleViolation::new(
                ViolationKind::EmptySlot,
                format!("empty period at {day} period {period}"),
            ));
        }
    }
    if board.filled_count() != DAYS.len() * PERIODS.len() {
        return Err(ScheduleViolation::new(
            ViolationKind::PeriodCount,
            format!(
                "total weekly periods must be exactly {}",
                DAYS.len() * PERIODS.len()
            ),
        ));
    }

    let subject_slots = board.slots_by_subject();

    for subject in theory {
        let expected = usize::from(subject.subject_type.weekly_periods());
        if slots_of(&subject_slots, subject).len() != expected {
            return Err(ScheduleViolation::new(
                ViolationKind::PeriodCount,
                format!(
                    "theory subject {} must have exactly {} periods",
                    subject.id, expected
                ),
            ));
        }
    }

    let mut morning = 0usize;
    let mut afternoon = 0usize;
    for subject in practical {
        let slots = slots_of(&subject_slots, subject);
        let expected = usize::from(subject.subject_type.weekly_periods());
        if slots.len() != expected {
            return Err(ScheduleViolation::new(
                ViolationKind::PeriodCount,
                format!(
                    "practical subject {} must have exactly {} periods",
                    subject.id, expected
                ),
            ));
        }
        if slots.iter().any(|&(day, _)| day != slots[0].0) {
            return Err(ScheduleViolation::new(
                ViolationKind::BrokenBlock,
                format!("practical subject {} must stay on a single day", subject.id),
            ));
        }
        let mut periods: Vec<u8> = slots.iter().map(|&(_, p)| p).collect();
        periods.sort_unstable();
        if !is_valid_practical_block(&periods) {
            return Err(ScheduleViolation::new(
                ViolationKind::BrokenBlock,
                format!(
                    "practical subject {} must occupy one of the blocks (1,2,3), (2,3,4) or (5,6,7)",
                    subject.id
                ),
            ));
        }
        let block: Block = [periods[0], periods[1], periods[2]];
        if is_morning_block(block) {
            morning += 1;
        } else {
            afternoon += 1;
        }
    }
    if morning == 0 || afternoon == 0 {
        return Err(ScheduleViolation::new(
            ViolationKind::BlockDistribution,
            "practical blocks must cover both morning and afternoon",
        ));
    }

    let crt_expected = usize::from(crt.subject_type.weekly_periods());
    if slots_of(&subject_slots, crt).len() != crt_expected {
        return Err(ScheduleViolation::new(
            ViolationKind::PeriodCount,
            format!("CRT must have exactly {crt_expected} periods"),
        ));
    }
    if board.get(Day::Monday, 1) == Some(crt.id.as_str()) {
        return Err(ScheduleViolation::new(
            ViolationKind::ForbiddenSlot,
            "CRT cannot be scheduled in Monday period 1",
        ));
    }

    if slots_of(&subject_slots, mentoring).len() != usize::from(mentoring.subject_type.weekly_periods())
    {
        return Err(ScheduleViolation::new(
            ViolationKind::PeriodCount,
            "mentoring must have exactly 1 period",
        ));
    }

    for &day in &DAYS {
        let mut day_counts: HashMap<&str, usize> = HashMap::new();
        for &period in &PERIODS {
            if let Some(subject_id) = board.get(day, period) {
                *day_counts.entry(subject_id).or_insert(0) += 1;
            }
        }
        for subject in theory.iter().chain([crt, mentoring]) {
            if day_counts.get(subject.id.as_str()).copied().unwrap_or(0) > 2 {
                return Err(ScheduleViolation::new(
                    ViolationKind::DailyRepetition,
                    format!(
                        "subject {} cannot appear more than 2 times on {day}",
                        subject.id
                    ),
                ));
            }
        }
    }

    // Authoritative faculty-safety check: replay every cell from the
    // external baseline, independent of what the placers tracked
    let mut replay = external.clone();
    for (day, period) in all_slots() {
        let Some(subject_id) = board.get(day, period) else {
            continue;
        };
        let Some(faculty) = faculty_map.get(subject_id) else {
            return Err(ScheduleViolation::new(
                ViolationKind::FacultyClash,
                format!("no faculty mapping for subject {subject_id}"),
            ));
        };
        if replay.is_conflict(faculty, day, period) {
            return Err(ScheduleViolation::new(
                ViolationKind::FacultyClash,
                format!("faculty clash for subject {subject_id} on {day} period {period}"),
            ));
        }
        replay.assign(faculty, day, period);
    }

    Ok(())
}

fn slots_of<'a>(
    map: &'a HashMap<String, Vec<(Day, Period)>>,
    subject: &Subject,
) -> &'a [(Day, Period)] {
    map.get(&subject.id).map_or(&[], |slots| slots.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectType;

    struct Fixture {
        board: Board,
        theory: Vec<Subject>,
        practical: Vec<Subject>,
        crt: Subject,
        mentoring: Subject,
        faculty_map: HashMap<String, String>,
    }

    impl Fixture {
        fn validate(&self) -> Result<(), ScheduleViolation> {
            self.validate_against(&FacultyOccupancy::new())
        }

        fn validate_against(&self, external: &FacultyOccupancy) -> Result<(), ScheduleViolation> {
            validate_schedule(
                &self.board,
                &self.theory,
                &self.practical,
                &self.crt,
                &self.mentoring,
                &self.faculty_map,
                external,
            )
        }
    }

    /// A hand-built valid week: labs on Monday/Tuesday mornings and the
    /// Wednesday afternoon, CRT on Thursday 1 and Wednesday 2, mentoring
    /// on Saturday 7, theory round-robin over the remaining 30 cells.
    fn valid_week() -> Fixture {
        let theory: Vec<Subject> = (1..=6)
            .map(|i| Subject::new(format!("T{i}"), SubjectType::Theory))
            .collect();
        let practical: Vec<Subject> = (1..=3)
            .map(|i| Subject::new(format!("LAB{i}"), SubjectType::Practical))
            .collect();
        let crt = Subject::new("CRT1", SubjectType::Crt);
        let mentoring = Subject::new("MEN1", SubjectType::Mentoring);

        let mut board = Board::new();
        for period in 1..=3 {
            board.set(Day::Monday, period, "LAB1");
            board.set(Day::Tuesday, period, "LAB2");
        }
        for period in 5..=7 {
            board.set(Day::Wednesday, period, "LAB3");
        }
        board.set(Day::Thursday, 1, "CRT1");
        board.set(Day::Wednesday, 2, "CRT1");
        board.set(Day::Saturday, 7, "MEN1");

        // Theory fills the 30 remaining cells: walking the open slots in
        // order while dealing subjects round-robin gives each subject 5
        // periods, never adjacent, never more than twice a day
        let open = board.open_slots();
        assert_eq!(open.len(), 30);
        for (i, &(day, period)) in open.iter().enumerate() {
            board.set(day, period, format!("T{}", (i % 6) + 1));
        }

        let mut faculty_map = HashMap::new();
        for subject in theory.iter().chain(practical.iter()).chain([&crt, &mentoring]) {
            faculty_map.insert(subject.id.clone(), format!("F-{}", subject.id));
        }

        Fixture {
            board,
            theory,
            practical,
            crt,
            mentoring,
            faculty_map,
        }
    }

    #[test]
    fn test_valid_week_passes() {
        assert!(valid_week().validate().is_ok());
    }

    #[test]
    fn test_empty_cell_detected() {
        let mut fx = valid_week();
        fx.board.clear(Day::Friday, 4);
        let v = fx.validate().unwrap_err();
        assert_eq!(v.kind, ViolationKind::EmptySlot);
        assert!(v.message.contains("Friday"));
    }

    #[test]
    fn test_theory_period_count() {
        let mut fx = valid_week();
        // Swap one T1 cell to T2: T1 drops to 4, T2 rises to 6
        let slots = fx.board.slots_by_subject().remove("T1").unwrap();
        let (day, period) = slots[0];
        fx.board.set(day, period, "T2");
        let v = fx.validate().unwrap_err();
        assert_eq!(v.kind, ViolationKind::PeriodCount);
    }

    #[test]
    fn test_split_practical_detected() {
        let mut fx = valid_week();
        // Trade LAB1's first period for a Friday theory cell: the block
        // now spans two days
        let displaced = fx.board.get(Day::Friday, 4).unwrap().to_string();
        fx.board.set(Day::Monday, 1, displaced);
        fx.board.set(Day::Friday, 4, "LAB1");
        let v = fx.validate().unwrap_err();
        assert_eq!(v.kind, ViolationKind::BrokenBlock);
    }

    #[test]
    fn test_invalid_block_shape_detected() {
        let mut fx = valid_week();
        // Swap Wednesday cells 4 and 7: LAB3 becomes (4,5,6), which
        // crosses the lunch boundary
        let moved = fx.board.get(Day::Wednesday, 4).unwrap().to_string();
        fx.board.set(Day::Wednesday, 7, moved);
        fx.board.set(Day::Wednesday, 4, "LAB3");
        let v = fx.validate().unwrap_err();
        assert_eq!(v.kind, ViolationKind::BrokenBlock);
    }

    #[test]
    fn test_missing_afternoon_block_detected() {
        let fx = valid_week();
        // Rebuild with all three labs in the morning
        let mut board = Board::new();
        for period in 1..=3 {
            board.set(Day::Monday, period, "LAB1");
            board.set(Day::Tuesday, period, "LAB2");
            board.set(Day::Wednesday, period, "LAB3");
        }
        board.set(Day::Thursday, 1, "CRT1");
        board.set(Day::Thursday, 3, "CRT1");
        board.set(Day::Saturday, 7, "MEN1");
        let open = board.open_slots();
        for (i, &(day, period)) in open.iter().enumerate() {
            board.set(day, period, format!("T{}", (i % 6) + 1));
        }
        let fx = Fixture { board, ..fx };
        let v = fx.validate().unwrap_err();
        assert_eq!(v.kind, ViolationKind::BlockDistribution);
    }

    #[test]
    fn test_crt_on_monday_first_period_detected() {
        let fx = valid_week();
        // Rebuild with LAB1 shifted to (2,3,4) so Monday 1 is free for CRT
        let mut board = Board::new();
        board.set(Day::Monday, 1, "CRT1");
        for period in 2..=4 {
            board.set(Day::Monday, period, "LAB1");
        }
        for period in 1..=3 {
            board.set(Day::Tuesday, period, "LAB2");
        }
        for period in 5..=7 {
            board.set(Day::Wednesday, period, "LAB3");
        }
        board.set(Day::Thursday, 1, "CRT1");
        board.set(Day::Saturday, 7, "MEN1");
        let open = board.open_slots();
        for (i, &(day, period)) in open.iter().enumerate() {
            board.set(day, period, format!("T{}", (i % 6) + 1));
        }
        let fx = Fixture { board, ..fx };
        let v = fx.validate().unwrap_err();
        assert_eq!(v.kind, ViolationKind::ForbiddenSlot);
    }

    #[test]
    fn test_daily_repetition_detected() {
        let mut fx = valid_week();
        // Force T1 onto three Friday periods (1, 3, 5: non-adjacent)
        let t1_slots = fx.board.slots_by_subject().remove("T1").unwrap();
        for (i, &period) in [1u8, 3, 5].iter().enumerate() {
            let displaced = fx.board.get(Day::Friday, period).unwrap().to_string();
            let (day, p) = t1_slots[i];
            if (day, p) != (Day::Friday, period) {
                fx.board.set(day, p, displaced);
                fx.board.set(Day::Friday, period, "T1");
            }
        }
        let v = fx.validate().unwrap_err();
        assert!(matches!(
            v.kind,
            ViolationKind::DailyRepetition | ViolationKind::PeriodCount
        ));
    }

    #[test]
    fn test_faculty_clash_against_external_baseline() {
        let fx = valid_week();
        let mut external = FacultyOccupancy::new();
        // The mentor is already committed elsewhere on Saturday 7
        external.assign("F-MEN1", Day::Saturday, 7);
        let v = fx.validate_against(&external).unwrap_err();
        assert_eq!(v.kind, ViolationKind::FacultyClash);
        assert!(v.message.contains("MEN1"));
        assert!(v.message.contains("Saturday"));
    }

    #[test]
    fn test_daily_cap_breach_detected_in_replay() {
        let fx = valid_week();
        let mut external = FacultyOccupancy::new();
        // T1's teacher already covers six Monday periods elsewhere; the
        // board's own Monday cell for T1 then breaches the daily cap
        for period in [1u8, 2, 3, 5, 6, 7] {
            external.assign("F-T1", Day::Monday, period);
        }
        let v = fx.validate_against(&external).unwrap_err();
        assert_eq!(v.kind, ViolationKind::FacultyClash);
        assert!(v.message.contains("T1"));
    }

    #[test]
    fn test_missing_mapping_detected() {
        let mut fx = valid_week();
        fx.faculty_map.remove("T4");
        let v = fx.validate().unwrap_err();
        assert_eq!(v.kind, ViolationKind::FacultyClash);
        assert!(v.message.contains("T4"));
    }
}
