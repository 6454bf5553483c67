//! Error types for RIFF/WAVE decoding and encoding.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fourcc::FourCc;

/// Result type for RIFF operations.
pub type RiffResult<T> = Result<T, RiffError>;

/// Errors that can occur while loading, patching or saving a WAVE file.
#[derive(Debug, Error)]
pub enum RiffError {
    /// Source could not be opened for reading, or target for writing.
    #[error("can't open '{}': {source}", .path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Top-level RIFF magic or WAVE form tag mismatch.
    #[error("not a {expected} file (found '{found}')")]
    Format {
        /// Tag the container must carry.
        expected: FourCc,
        /// Tag actually read.
        found: FourCc,
    },

    /// Declared size leaves no room for any chunk.
    #[error("WAVE file is empty (declared size {declared})")]
    EmptyFile {
        /// Declared RIFF size.
        declared: u32,
    },

    /// Declared sizes do not account for the bytes actually present.
    #[error("truncated {context}: {remaining} byte(s) unaccounted for")]
    Truncation {
        /// Where the mismatch was detected.
        context: String,
        /// Bytes left on the counter when decoding stopped (negative on overrun).
        remaining: i64,
    },

    /// A payload's length does not fit its layout.
    #[error("malformed '{id}' chunk: {message}")]
    MalformedChunk {
        /// Chunk id.
        id: FourCc,
        /// What is wrong with it.
        message: String,
    },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RiffError {
    /// Creates a truncation error.
    pub fn truncation(context: impl Into<String>, remaining: i64) -> Self {
        Self::Truncation {
            context: context.into(),
            remaining,
        }
    }

    /// Creates a malformed-chunk error.
    pub fn malformed(id: FourCc, message: impl Into<String>) -> Self {
        Self::MalformedChunk {
            id,
            message: message.into(),
        }
    }

    /// Maps an early end-of-stream onto [`RiffError::Truncation`]; other I/O
    /// errors pass through unchanged.
    pub fn from_read(err: io::Error, context: impl Into<String>) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::truncation(format!("{} (unexpected end of stream)", context.into()), 0)
        } else {
            Self::Io(err)
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RiffError::Open { .. } => "RIFF_001",
            RiffError::Format { .. } => "RIFF_002",
            RiffError::EmptyFile { .. } => "RIFF_003",
            RiffError::Truncation { .. } => "RIFF_004",
            RiffError::MalformedChunk { .. } => "RIFF_005",
            RiffError::Io(_) => "RIFF_006",
        }
    }
}
