//! Timetable generation orchestration.
//!
//! Selects the subject pools, resolves the class's faculty mapping, builds
//! the external occupancy baseline once, then runs bounded attempts: fresh
//! board and working occupancy, practicals → mentoring → CRT → theory,
//! full-schedule validation. The first validated board wins and is
//! persisted through the output port, replacing any prior timetable for
//! the context. Any phase or validation failure records its reason and
//! restarts the next attempt from an empty board; when the budget runs out
//! the last reason surfaces to the caller.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::GenerationError;
use crate::external::{CommitmentSource, ExternalSnapshot};
use crate::models::{ClassContext, Subject, SubjectType, TimetableRow, TimetableView};
use crate::placement::{
    place_crt, place_mentoring, place_practicals, place_theory, theory_failure_reason,
    AttemptState,
};
use crate::validation::validate_schedule;

/// Theory subjects per class.
pub const THEORY_SUBJECT_COUNT: usize = 6;

/// Practical subjects per class.
pub const PRACTICAL_SUBJECT_COUNT: usize = 3;

/// Attempts before generation gives up. The attempt budget is the sole
/// runaway guard for the backtracking searches.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Input for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The class to schedule.
    pub context: ClassContext,
    /// The class's subject pool. Pools are selected by type in subject-id
    /// order; supplying more than the required counts is fine.
    pub subjects: Vec<Subject>,
}

impl GenerationRequest {
    /// Creates a request.
    pub fn new(context: ClassContext, subjects: Vec<Subject>) -> Self {
        Self { context, subjects }
    }
}

/// Output port: persists a finished timetable.
///
/// `replace_timetable` must atomically drop whatever is stored for exactly
/// `context` and store `rows` in its place. Failed generation never calls
/// it, so no partial timetable is ever persisted.
pub trait TimetableStore {
    /// Replaces the stored timetable for a context.
    fn replace_timetable(&mut self, context: &ClassContext, rows: Vec<TimetableRow>);
}

/// In-memory [`TimetableStore`] keeping the latest rows per context.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    timetables: HashMap<ClassContext, Vec<TimetableRow>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored rows for a context, if any.
    pub fn timetable(&self, context: &ClassContext) -> Option<&[TimetableRow]> {
        self.timetables.get(context).map(|rows| rows.as_slice())
    }
}

impl TimetableStore for MemoryStore {
    fn replace_timetable(&mut self, context: &ClassContext, rows: Vec<TimetableRow>) {
        self.timetables.insert(context.clone(), rows);
    }
}

/// The timetable generation engine.
///
/// # Example
///
/// ```
/// use u_timetable::external::{FacultyAssignment, StaticCommitments};
/// use u_timetable::generator::{GenerationRequest, MemoryStore, TimetableGenerator};
/// use u_timetable::models::{ClassContext, Subject, SubjectType};
///
/// let context = ClassContext::new("2024-25", "CSE", "5", "A", "R20");
/// let mut subjects = vec![
///     Subject::new("CRT1", SubjectType::Crt),
///     Subject::new("MEN1", SubjectType::Mentoring),
/// ];
/// for i in 1..=6 {
///     subjects.push(Subject::new(format!("T{i}"), SubjectType::Theory));
/// }
/// for i in 1..=3 {
///     subjects.push(Subject::new(format!("LAB{i}"), SubjectType::Practical));
/// }
///
/// let mut source = StaticCommitments::new();
/// for subject in &subjects {
///     source = source.with_assignment(FacultyAssignment::new(
///         context.clone(),
///         subject.id.clone(),
///         format!("F-{}", subject.id),
///     ));
/// }
///
/// let request = GenerationRequest::new(context.clone(), subjects);
/// let mut store = MemoryStore::new();
/// let view = TimetableGenerator::new()
///     .generate(&request, &source, &mut store)
///     .unwrap();
///
/// assert_eq!(view.entry_count(), 42);
/// assert_eq!(store.timetable(&context).unwrap().len(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGenerator {
    max_attempts: usize,
}

impl TimetableGenerator {
    /// Creates a generator with the standard attempt budget.
    pub fn new() -> Self {
        Self {
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Overrides the attempt budget.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Generates and persists a timetable for the requested class.
    ///
    /// Configuration problems (short pools, missing or ambiguous faculty
    /// mapping) fail before any attempt runs. Otherwise up to the attempt
    /// budget of full placement passes is tried; the first board that
    /// survives validation is persisted and returned as a view.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        source: &dyn CommitmentSource,
        store: &mut dyn TimetableStore,
    ) -> Result<TimetableView, GenerationError> {
        let mut pool = request.subjects.clone();
        pool.sort_by(|a, b| a.id.cmp(&b.id));

        let mut theory: Vec<Subject> = pool
            .iter()
            .filter(|s| s.subject_type == SubjectType::Theory)
            .cloned()
            .collect();
        let mut practical: Vec<Subject> = pool
            .iter()
            .filter(|s| s.subject_type == SubjectType::Practical)
            .cloned()
            .collect();

        if theory.len() < THEORY_SUBJECT_COUNT {
            return Err(GenerationError::configuration(format!(
                "at least {THEORY_SUBJECT_COUNT} theory subjects are required, found {}",
                theory.len()
            )));
        }
        if practical.len() < PRACTICAL_SUBJECT_COUNT {
            return Err(GenerationError::configuration(format!(
                "at least {PRACTICAL_SUBJECT_COUNT} practical subjects are required, found {}",
                practical.len()
            )));
        }
        let Some(crt) = pool
            .iter()
            .find(|s| s.subject_type == SubjectType::Crt)
            .cloned()
        else {
            return Err(GenerationError::configuration(
                "at least 1 CRT subject is required",
            ));
        };
        let Some(mentoring) = pool
            .iter()
            .find(|s| s.subject_type == SubjectType::Mentoring)
            .cloned()
        else {
            return Err(GenerationError::configuration(
                "at least 1 mentoring subject is required",
            ));
        };
        theory.truncate(THEORY_SUBJECT_COUNT);
        practical.truncate(PRACTICAL_SUBJECT_COUNT);

        let faculty_map = subject_faculty_map(source, &request.context)?;
        for subject in theory
            .iter()
            .chain(practical.iter())
            .chain([&crt, &mentoring])
        {
            if !faculty_map.contains_key(&subject.id) {
                return Err(GenerationError::configuration(format!(
                    "no faculty mapping for subject {}; save the subject-faculty mapping first",
                    subject.id
                )));
            }
        }

        let external = ExternalSnapshot::load(source, &request.context);

        let mut last_error: Option<String> = None;
        for attempt in 0..self.max_attempts {
            let mut state = AttemptState::new(&external.occupancy);

            if !place_practicals(
                &mut state,
                &practical,
                &faculty_map,
                &external.practical_busy,
                attempt,
            ) {
                last_error = Some("unable to place practical blocks without a clash".to_string());
                continue;
            }
            if !place_mentoring(&mut state, &mentoring, &faculty_map) {
                last_error =
                    Some("unable to place the mentoring period without a faculty clash".to_string());
                continue;
            }
            if !place_crt(&mut state, &crt, &faculty_map) {
                last_error =
                    Some("unable to place CRT periods without a faculty clash".to_string());
                continue;
            }
            if !place_theory(&mut state, &theory, &faculty_map)? {
                last_error = Some(theory_failure_reason(&state, &theory, &faculty_map));
                continue;
            }

            if let Err(violation) = validate_schedule(
                &state.board,
                &theory,
                &practical,
                &crt,
                &mentoring,
                &faculty_map,
                &external.occupancy,
            ) {
                last_error = Some(violation.message);
                continue;
            }

            store.replace_timetable(&request.context, TimetableRow::from_board(&state.board));

            let names: HashMap<String, String> = theory
                .iter()
                .chain(practical.iter())
                .chain([&crt, &mentoring])
                .map(|s| (s.id.clone(), s.name.clone()))
                .collect();
            return Ok(TimetableView::from_board(&state.board, &names));
        }

        Err(GenerationError::exhausted(
            last_error.unwrap_or_else(|| "unable to generate a timetable".to_string()),
        ))
    }
}

impl Default for TimetableGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// One faculty per subject for the class, from the context's assignment
/// rows. A subject mapped to more than one distinct faculty is a
/// configuration error.
fn subject_faculty_map(
    source: &dyn CommitmentSource,
    context: &ClassContext,
) -> Result<HashMap<String, String>, GenerationError> {
    // BTreeMap keeps the ambiguity check deterministic across runs
    let mut by_subject: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for row in source.faculty_assignments() {
        if &row.context != context {
            continue;
        }
        by_subject
            .entry(row.subject_id)
            .or_default()
            .insert(row.faculty_id);
    }

    let mut map = HashMap::new();
    for (subject_id, faculty_ids) in by_subject {
        if faculty_ids.len() > 1 {
            return Err(GenerationError::configuration(format!(
                "subject {subject_id} is mapped to {} faculties; keep one faculty per subject",
                faculty_ids.len()
            )));
        }
        if let Some(faculty_id) = faculty_ids.into_iter().next() {
            map.insert(subject_id, faculty_id);
        }
    }
    Ok(map)
}
