//! Four-character chunk identifiers.

use std::fmt;

/// A 4-byte chunk identifier ("FourCC"), compared byte-for-byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// Top-level container magic.
    pub const RIFF: FourCc = FourCc(*b"RIFF");
    /// Top-level form type for audio files.
    pub const WAVE: FourCc = FourCc(*b"WAVE");
    /// Format descriptor chunk.
    pub const FMT: FourCc = FourCc(*b"fmt ");
    /// Sample data chunk.
    pub const DATA: FourCc = FourCc(*b"data");
    /// Cue point chunk.
    pub const CUE: FourCc = FourCc(*b"cue ");
    /// List container chunk.
    pub const LIST: FourCc = FourCc(*b"LIST");
    /// Label entry inside an associated data list.
    pub const LABL: FourCc = FourCc(*b"labl");
    /// Associated data list type.
    pub const ADTL: FourCc = FourCc(*b"adtl");

    /// Creates an identifier from raw bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for FourCc {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc(\"{}\")", self)
    }
}
