//! CLI command implementations

pub mod patch;
