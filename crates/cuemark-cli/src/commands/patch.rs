//! Patch command implementation
//!
//! Loads a WAVE file, replaces its cue points and labels with a single labeled
//! cue point, and writes the result to a new path.

use anyhow::{Context, Result};
use colored::Colorize;
use cuemark_riff::{Chunk, WaveFile};

use crate::label::label_from_path;

/// Inputs for one patch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOptions {
    /// WAVE file to read.
    pub source: String,
    /// Path the patched file is written to.
    pub target: String,
    /// Label text; derived from the source file name when `None`.
    pub label: Option<String>,
    /// Sample frame the cue point marks.
    pub frame_offset: u32,
    /// Print chunk ids and sizes while loading.
    pub trace: bool,
    /// Report failures through the exit status instead of always exiting 0.
    pub strict_exit: bool,
}

impl PatchOptions {
    /// Options for the default invocation: derived label at frame 0.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
            frame_offset: 0,
            trace: false,
            strict_exit: false,
        }
    }

    /// The label that will be written.
    pub fn resolved_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| label_from_path(&self.source))
    }
}

/// Outcome of a successful patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSummary {
    /// Label written.
    pub label: String,
    /// Cue point the label is bound to.
    pub cue_point_id: u32,
    /// Top-level chunks in the written file.
    pub chunk_count: usize,
    /// RIFF size written to the header.
    pub declared_size: u32,
}

/// Run the patch command.
///
/// The target is only created after the source has loaded completely, so a
/// failed load never leaves a partial output file behind.
pub fn run(options: &PatchOptions) -> Result<PatchSummary> {
    let trace = options.trace;
    if trace {
        println!("{} {}", "Loading:".cyan().bold(), options.source);
    }

    let mut wave = WaveFile::open_with(&options.source, |chunk| {
        if trace {
            print_chunk(chunk);
        }
    })
    .with_context(|| format!("Failed to load WAVE file: {}", options.source))?;

    let label = options.resolved_label();
    wave.clear_markers_and_labels();
    let cue_point_id = wave.add_label(&label, options.frame_offset);

    if trace {
        println!("{}", "Patched layout:".cyan().bold());
        for line in wave.describe() {
            println!("  {}", line.dimmed());
        }
    }

    wave.save(&options.target)
        .with_context(|| format!("Failed to write WAVE file: {}", options.target))?;

    println!(
        "{} Labeled '{}' at frame {} (cue {}) -> {}",
        "SUCCESS".green().bold(),
        label,
        options.frame_offset,
        cue_point_id,
        options.target
    );

    Ok(PatchSummary {
        label,
        cue_point_id,
        chunk_count: wave.chunks().len(),
        declared_size: wave.declared_size(),
    })
}

/// Exit status for a failed run: legacy behavior always reports success.
pub fn failure_exit_code(strict_exit: bool) -> u8 {
    if strict_exit {
        1
    } else {
        0
    }
}

fn print_chunk(chunk: &Chunk) {
    println!(
        "  {} '{}', size {} bytes",
        "Found chunk".dimmed(),
        chunk.id(),
        chunk.disk_size()
    );
}
