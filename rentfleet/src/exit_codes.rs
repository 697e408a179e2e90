//! Stable exit codes for rentfleet CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid arguments, unreadable config, or a store I/O failure.
pub const INVALID: i32 = 1;
/// A business rule rejected the operation (duplicate key, car in use, no
/// matching rental, ...).
pub const REJECTED: i32 = 2;
