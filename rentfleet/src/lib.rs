//! Embedded, file-persisted rental-fleet registry.
//!
//! This crate tracks vehicle models, cars, drivers, and rental transactions,
//! and enforces the rules governing renting, returning, and decommissioning a
//! vehicle. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (the registry engine, outcome
//!   codes, cost computation, consistency checks). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (snapshot persistence, TOML
//!   config). Absent or unreadable inputs degrade to documented defaults.
//!
//! Entity types live in [`fleet`]; the CLI binary coordinates core logic with
//! I/O to implement fleet-management commands.

pub mod core;
pub mod exit_codes;
pub mod fleet;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
