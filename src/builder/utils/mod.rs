//! Shared helpers for the build drivers.

pub mod fs;
