//! Subject model and type classification.

use serde::{Deserialize, Serialize};

/// Classification of a subject.
///
/// The type selects the placement strategy and fixes the weekly period
/// requirement. A closed set: anything the scheduler does not place is
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectType {
    /// Classroom subject, 5 periods/week spread across days.
    Theory,
    /// Lab subject, one contiguous 3-period block on a single day.
    Practical,
    /// Campus recruitment training, 2 non-adjacent periods/week.
    Crt,
    /// Mentoring hour, 1 period/week.
    Mentoring,
    /// Not placed by the generator.
    Other,
}

impl SubjectType {
    /// Weekly periods a subject of this type occupies.
    pub fn weekly_periods(self) -> u8 {
        match self {
            SubjectType::Theory => 5,
            SubjectType::Practical => 3,
            SubjectType::Crt => 2,
            SubjectType::Mentoring => 1,
            SubjectType::Other => 0,
        }
    }
}

/// A subject to be placed on the timetable.
///
/// Read-only collaborator data: immutable for the scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject code, unique within its scheduling context.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Type classification.
    pub subject_type: SubjectType,
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<String>, subject_type: SubjectType) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subject_type,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
