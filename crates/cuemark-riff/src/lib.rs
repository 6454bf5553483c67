//! cuemark RIFF - chunk model for RIFF/WAVE files
//!
//! This crate loads a WAVE file into a tree of owned chunks, lets callers add
//! cue points and labels, and writes the file back with every untouched chunk
//! byte-identical.
//!
//! # Example
//!
//! ```no_run
//! use cuemark_riff::WaveFile;
//!
//! let mut wave = WaveFile::open("take1.wav")?;
//! wave.clear_markers_and_labels();
//! let id = wave.add_label("take1", 0);
//! assert_eq!(wave.declared_size(), wave.computed_size());
//! wave.save("take1-marked.wav")?;
//! # let _ = id;
//! # Ok::<(), cuemark_riff::RiffError>(())
//! ```
//!
//! # Module Structure
//!
//! - [`endian`]: little-endian integer codec
//! - [`header`]: chunk and RIFF headers
//! - [`registry`]: chunk id to payload variant mapping
//! - [`payload`]: payload variants (general, format, cue, label, list)
//! - [`chunk`]: chunk objects and their on-disk framing
//! - [`wave`]: the file container and the label patch

pub mod chunk;
pub mod endian;
pub mod error;
pub mod fourcc;
pub mod header;
pub mod payload;
pub mod registry;
pub mod wave;

pub use chunk::Chunk;
pub use error::{RiffError, RiffResult};
pub use fourcc::FourCc;
pub use header::{ChunkHeader, RiffHeader};
pub use payload::{
    ChunkPayload, CueChunk, CuePoint, FormatChunk, GeneralChunk, LabelChunk, ListChunk,
};
pub use wave::WaveFile;
