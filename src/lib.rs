//! Weekly class-timetable generation.
//!
//! Builds a conflict-free weekly timetable for one class: given its
//! subjects partitioned by type, a one-to-one subject→faculty mapping, and
//! the commitments already fixed by other classes, the generator fills the
//! 6-day × 7-period grid through four placement phases (practicals, then
//! mentoring, CRT, and theory) and re-validates the whole board before
//! persisting it.
//!
//! # Modules
//!
//! - **`models`**: domain types: `Subject`, `ClassContext`, `Board`,
//!   `TimeSlot`, `TimetableRow`, `TimetableView`
//! - **`occupancy`**: per-faculty busy-slot and workload tracking with
//!   daily/weekly caps
//! - **`external`**: the read-only port over other classes' commitments
//!   and the baseline loader
//! - **`placement`**: the four slot-placement strategies
//! - **`validation`**: full-schedule hard-constraint checks
//! - **`generator`**: bounded multi-attempt orchestration and the
//!   persistence port
//! - **`error`**: the caller-facing error surface
//!
//! # Architecture
//!
//! The search is a synchronous, in-memory feasibility search: no cost
//! function, no optimization. The first board satisfying every hard
//! constraint wins, and a bounded attempt budget with varied search
//! orderings stands in for restarts. Data access and persistence sit
//! behind small traits so the core never depends on a storage technology;
//! the embedding application is expected to run generate-and-persist for
//! one class as a single transaction on its side.

pub mod error;
pub mod external;
pub mod generator;
pub mod models;
pub mod occupancy;
pub mod placement;
pub mod validation;
