//! Process exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Usage errors, engine errors and replay mismatches.
pub const ERROR: i32 = 2;

/// The user quit a hot-seat session with `q` or closed stdin.
pub const INTERRUPTED: i32 = 130;
