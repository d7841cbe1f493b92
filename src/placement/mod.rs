//! Placement phases.
//!
//! Four strategies fill a fresh per-attempt board in a fixed order:
//! practicals (contiguous lab blocks), mentoring (one period), CRT (two
//! non-adjacent periods), then theory over every remaining open slot. Each
//! phase mutates an [`AttemptState`] and reports whether it completed; the
//! orchestrator discards the whole attempt on any failure and restarts
//! from an empty board.

mod crt;
mod mentoring;
mod practical;
mod theory;

pub use crt::place_crt;
pub use mentoring::place_mentoring;
pub use practical::place_practicals;
pub use theory::{place_theory, theory_failure_reason};

use crate::models::Board;
use crate::occupancy::FacultyOccupancy;

/// Mutable per-attempt scheduling state.
///
/// Built fresh for every attempt: an empty board plus a working copy of
/// the external occupancy baseline. Never shared across attempts, so a
/// failed attempt leaves no residue in the next one.
#[derive(Debug, Clone)]
pub struct AttemptState {
    /// The in-progress board.
    pub board: Board,
    /// Working occupancy: external baseline plus this board's assignments.
    pub occupancy: FacultyOccupancy,
}

impl AttemptState {
    /// Starts an attempt from the external baseline.
    pub fn new(baseline: &FacultyOccupancy) -> Self {
        Self {
            board: Board::new(),
            occupancy: baseline.clone(),
        }
    }
}
