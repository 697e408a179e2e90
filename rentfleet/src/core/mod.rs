//! Deterministic, pure logic for the fleet registry.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod config;
pub mod cost;
pub mod invariants;
pub mod registry;
pub mod types;
