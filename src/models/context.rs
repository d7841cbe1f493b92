//! Class scheduling context.

use serde::{Deserialize, Serialize};

/// Identifies one class/section whose timetable is being built.
///
/// All occupancy and conflict checks are scoped by context; cross-context
/// queries (external commitments, shared lab usage) compare against this
/// identity to decide which rows belong to *other* classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassContext {
    /// Academic year, e.g. "2024-25".
    pub academic_year: String,
    /// Branch, e.g. "CSE".
    pub branch: String,
    /// Semester, e.g. "5".
    pub semester: String,
    /// Section, e.g. "A".
    pub section: String,
    /// Regulation, e.g. "R20".
    pub regulation: String,
}

impl ClassContext {
    /// Creates a context.
    pub fn new(
        academic_year: impl Into<String>,
        branch: impl Into<String>,
        semester: impl Into<String>,
        section: impl Into<String>,
        regulation: impl Into<String>,
    ) -> Self {
        Self {
            academic_year: academic_year.into(),
            branch: branch.into(),
            semester: semester.into(),
            section: section.into(),
            regulation: regulation.into(),
        }
    }

    /// Whether `other` denotes the same class, ignoring regulation.
    ///
    /// This is the identity used to exclude a class's own rows when loading
    /// external commitments. Regulation stays out of it: a regulation change
    /// renames the curriculum, not the room full of students.
    pub fn same_class(&self, other: &ClassContext) -> bool {
        self.academic_year == other.academic_year
            && self.branch == other.branch
            && self.semester == other.semester
            && self.section == other.section
    }

    /// Whether both contexts belong to the same branch.
    #[inline]
    pub fn same_branch(&self, other: &ClassContext) -> bool {
        self.branch == other.branch
    }
}

impl std::fmt::Display for ClassContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}-{} {}",
            self.academic_year, self.branch, self.semester, self.section, self.regulation
        )
    }
}
