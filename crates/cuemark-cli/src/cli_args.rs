//! CLI argument definitions for the cuemark command-line interface.
//!
//! The `#[derive(Parser)]` type lives here, keeping `main.rs` focused on
//! dispatch logic.

use clap::Parser;
use cuemark_cli::commands::patch::PatchOptions;

/// cuemark - write a labeled cue point into a WAVE file
#[derive(Parser)]
#[command(name = "cuemark")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// WAVE file to read
    pub source: String,

    /// Path to write the patched WAVE file to
    pub target: String,

    /// Print each chunk id and size while loading
    #[arg(short = 't', long)]
    pub trace: bool,

    /// Label text (default: source file name without directory and extension)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Sample frame the cue point marks
    #[arg(short, long, default_value_t = 0)]
    pub offset: u32,

    /// Exit with status 1 on failure instead of always exiting 0
    #[arg(long)]
    pub strict_exit: bool,
}

impl Cli {
    pub(crate) fn into_options(self) -> PatchOptions {
        PatchOptions {
            source: self.source,
            target: self.target,
            label: self.label,
            frame_offset: self.offset,
            trace: self.trace,
            strict_exit: self.strict_exit,
        }
    }
}
