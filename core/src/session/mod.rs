//! Repetition recording
//!
//! A repetition is one timed attempt at placing the needle in a target
//! foramen. Its timings, punctures, target checks and needle poses are
//! exported next to the user's activity log.

mod activity;
mod export;
mod repetition;

pub use activity::{now_stamp, ActivityLog, STAMP_FORMAT};
pub use export::RepetitionExport;
pub use repetition::{estimated_surgical_time, Repetition, RepetitionSummary, TargetCheck};
