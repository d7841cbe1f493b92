//! Timetabling domain models.
//!
//! Core data types for one class's weekly schedule: the fixed 6×7 grid,
//! subjects with their type classification, the scheduling context that
//! scopes a timetable, the in-progress board, and the persisted/rendered
//! solution shapes.

mod board;
mod context;
mod slot;
mod subject;
mod timetable;

pub use board::Board;
pub use context::ClassContext;
pub use slot::{
    all_slots, is_morning_block, is_valid_practical_block, Block, Day, Period, TimeSlot, DAYS,
    PERIODS, PERIOD_TIMES, PRACTICAL_BLOCKS,
};
pub use subject::{Subject, SubjectType};
pub use timetable::{DayView, TimetableEntry, TimetableRow, TimetableView};
