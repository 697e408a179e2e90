//! I/O helpers for the fleet registry.

pub mod config;
pub mod store;
