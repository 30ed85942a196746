//! Daily habit checklist for the terminal. Each day is stored as a row of finished and
//! unfinished habits inside of a single csv file in the working directory, and the current
//! streak is the number of consecutive saved days ending today.
//!

pub mod cli;
pub mod fs;
pub mod habits;
pub mod storage;
pub mod streak;
pub mod utils;
