//! External occupancy: commitments imported from outside the class being
//! scheduled.
//!
//! Other classes' saved timetables and manually fixed period mappings claim
//! faculty time that the generator must schedule around. This module
//! defines the read-only port supplying those rows and the loader that
//! folds them into a baseline [`FacultyOccupancy`] snapshot plus the
//! same-branch practical slot set.
//!
//! The loader runs once per generation run; the snapshot it returns is the
//! immutable baseline every attempt starts from.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{ClassContext, Day, Period, SubjectType};
use crate::occupancy::FacultyOccupancy;

/// A manually fixed (day, period) → faculty commitment for some class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualCommitment {
    /// Class the commitment belongs to.
    pub context: ClassContext,
    /// Day of week.
    pub day: Day,
    /// Period number (1-7).
    pub period: Period,
    /// Committed faculty.
    pub faculty_id: String,
    /// Type of the subject taught in the slot.
    pub subject_type: SubjectType,
}

impl ManualCommitment {
    /// Creates a manual commitment row.
    pub fn new(
        context: ClassContext,
        day: Day,
        period: Period,
        faculty_id: impl Into<String>,
        subject_type: SubjectType,
    ) -> Self {
        Self {
            context,
            day,
            period,
            faculty_id: faculty_id.into(),
            subject_type,
        }
    }
}

/// A subject → faculty assignment for some class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyAssignment {
    /// Class the assignment belongs to.
    pub context: ClassContext,
    /// Subject code.
    pub subject_id: String,
    /// Assigned faculty.
    pub faculty_id: String,
}

impl FacultyAssignment {
    /// Creates an assignment row.
    pub fn new(
        context: ClassContext,
        subject_id: impl Into<String>,
        faculty_id: impl Into<String>,
    ) -> Self {
        Self {
            context,
            subject_id: subject_id.into(),
            faculty_id: faculty_id.into(),
        }
    }
}

/// One cell of a previously generated timetable for some class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAssignment {
    /// Class the timetable belongs to.
    pub context: ClassContext,
    /// Day of week.
    pub day: Day,
    /// Period number (1-7).
    pub period: Period,
    /// Scheduled subject code.
    pub subject_id: String,
    /// Type of the scheduled subject.
    pub subject_type: SubjectType,
}

impl SavedAssignment {
    /// Creates a saved-timetable row.
    pub fn new(
        context: ClassContext,
        day: Day,
        period: Period,
        subject_id: impl Into<String>,
        subject_type: SubjectType,
    ) -> Self {
        Self {
            context,
            day,
            period,
            subject_id: subject_id.into(),
            subject_type,
        }
    }
}

/// Read-only access to commitments recorded across all classes.
///
/// Implementations return whole-table row sets; the loader filters out the
/// class being scheduled. Reads are a point-in-time snapshot taken at the
/// start of generation; concurrent writers for other classes may be
/// missed, which is acceptable since distinct classes are generated
/// independently and infrequently.
pub trait CommitmentSource {
    /// Manually fixed period commitments, all classes.
    fn manual_commitments(&self) -> Vec<ManualCommitment>;

    /// Subject → faculty assignments, all classes.
    fn faculty_assignments(&self) -> Vec<FacultyAssignment>;

    /// Previously generated timetable cells, all classes.
    fn saved_assignments(&self) -> Vec<SavedAssignment>;
}

/// Baseline cross-class state loaded once per generation run.
#[derive(Debug, Clone, Default)]
pub struct ExternalSnapshot {
    /// Faculty busy-slot/load state from other classes' commitments.
    pub occupancy: FacultyOccupancy,
    /// Slots where another class of the same branch runs a practical.
    /// Labs are shared per branch, so these block this class's practicals.
    pub practical_busy: HashSet<(Day, Period)>,
}

impl ExternalSnapshot {
    /// Loads the baseline for the class identified by `context`.
    ///
    /// Marks every manual commitment belonging to other classes, then
    /// replays other classes' saved timetables, resolving each row's
    /// faculty through the cross-class subject→faculty lookup. Rows of the
    /// class itself are skipped (its board is what generation produces).
    pub fn load(source: &dyn CommitmentSource, context: &ClassContext) -> Self {
        let mut occupancy = FacultyOccupancy::new();
        let mut practical_busy = HashSet::new();

        for row in source.manual_commitments() {
            if row.context.same_class(context) {
                continue;
            }
            occupancy.assign(&row.faculty_id, row.day, row.period);
            if row.subject_type == SubjectType::Practical && row.context.same_branch(context) {
                practical_busy.insert((row.day, row.period));
            }
        }

        // (class, subject) → faculty set, across all classes
        let mut by_subject: HashMap<(ClassContext, String), HashSet<String>> = HashMap::new();
        for row in source.faculty_assignments() {
            by_subject
                .entry((row.context, row.subject_id))
                .or_default()
                .insert(row.faculty_id);
        }

        for row in source.saved_assignments() {
            if row.context.same_class(context) {
                continue;
            }
            if row.subject_type == SubjectType::Practical && row.context.same_branch(context) {
                practical_busy.insert((row.day, row.period));
            }
            let key = (row.context, row.subject_id);
            if let Some(faculty_ids) = by_subject.get(&key) {
                for faculty_id in faculty_ids {
                    occupancy.assign(faculty_id, row.day, row.period);
                }
            }
        }

        Self {
            occupancy,
            practical_busy,
        }
    }
}

/// In-memory [`CommitmentSource`] backed by plain row lists.
#[derive(Debug, Clone, Default)]
pub struct StaticCommitments {
    manual: Vec<ManualCommitment>,
    assignments: Vec<FacultyAssignment>,
    saved: Vec<SavedAssignment>,
}

impl StaticCommitments {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a manual commitment row.
    pub fn with_manual(mut self, row: ManualCommitment) -> Self {
        self.manual.push(row);
        self
    }

    /// Adds a subject → faculty assignment row.
    pub fn with_assignment(mut self, row: FacultyAssignment) -> Self {
        self.assignments.push(row);
        self
    }

    /// Adds a saved-timetable row.
    pub fn with_saved(mut self, row: SavedAssignment) -> Self {
        self.saved.push(row);
        self
    }
}

impl CommitmentSource for StaticCommitments {
    fn manual_commitments(&self) -> Vec<ManualCommitment> {
        self.manual.clone()
    }

    fn faculty_assignments(&self) -> Vec<FacultyAssignment> {
        self.assignments.clone()
    }

    fn saved_assignments(&self) -> Vec<SavedAssignment> {
        self.saved.clone()
    }
}
