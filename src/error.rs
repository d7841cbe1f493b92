//! Generation error surface.

/// Failure of a timetable generation run.
///
/// Per-attempt placement and validation failures are internal retry fuel;
/// what reaches the caller is either a configuration problem found before
/// the search, or exhaustion of the attempt budget carrying the last
/// attempt's reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    /// Error category.
    pub kind: GenerationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of generation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// Invalid input: short subject pools, missing or ambiguous
    /// subject→faculty mapping, wrong open-slot distribution. Retrying
    /// cannot help.
    Configuration,
    /// Every attempt failed; the message is the last attempt's specific
    /// violation.
    Exhausted,
}

impl GenerationError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: GenerationErrorKind::Configuration,
            message: message.into(),
        }
    }

    /// Creates an attempts-exhausted error.
    pub fn exhausted(message: impl Into<String>) -> Self {
        Self {
            kind: GenerationErrorKind::Exhausted,
            message: message.into(),
        }
    }

    /// Whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.kind == GenerationErrorKind::Configuration
    }

    /// Whether the attempt budget was exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.kind == GenerationErrorKind::Exhausted
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            GenerationErrorKind::Configuration => {
                write!(f, "configuration error: {}", self.message)
            }
            GenerationErrorKind::Exhausted => {
                write!(f, "generation attempts exhausted: {}", self.message)
            }
        }
    }
}

impl std::error::Error for GenerationError {}
