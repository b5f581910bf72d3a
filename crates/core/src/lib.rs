//! # TimetableGen Core
//!
//! The weekly timetable assignment engine. Given subjects with their
//! faculty, student sections, fixed breaks and a day/time grid, it produces
//! one schedule per section that honours the breaks and the soft
//! preferences.
//!
//! ## Components
//!
//! - [`grid`]: enumerates the slot start times of a day
//! - [`breaks`]: validated, immovable break windows
//! - [`pool`]: random subject draws
//! - [`preferences`]: boolean toggles applied to each draw
//! - [`scheduler`]: fills one section's week
//! - [`assembler`]: validates the request and schedules every section
//! - [`external`]: prompt and reply handling for the language-model path
//!
//! Everything here is synchronous and free of I/O. Randomness is always
//! passed in by the caller.

pub mod assembler;
pub mod breaks;
pub mod errors;
pub mod external;
pub mod grid;
pub mod models;
pub mod pool;
pub mod preferences;
pub mod scheduler;
pub mod validation;

pub use assembler::generate;
pub use errors::{TimetableError, TimetableResult};
