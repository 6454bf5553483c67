//! cuemark CLI library
//!
//! Command implementations shared by the `cuemark` binary and the integration
//! test crate.

pub mod commands;
pub mod label;
