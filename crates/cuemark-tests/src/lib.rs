//! cuemark End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the load, patch and save flows:
//!
//! - Byte layout: hand-built WAVE files survive a load/save untouched
//! - Patching: cue points and labels land where readers expect them
//! - CLI: the `cuemark` binary and its exit status conventions
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cuemark-tests
//! ```
//!
//! Fixtures are written with `byteorder` rather than through `cuemark-riff`,
//! so the encoder under test never produces its own expected bytes.

pub mod fixtures;
pub mod harness;
pub mod layout;
