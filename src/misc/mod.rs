//! Miscellaneous support, at present only [log] targets.

pub mod log;
