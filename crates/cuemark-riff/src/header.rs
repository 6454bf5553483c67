//! Chunk and file header structures.

use std::io::{self, Read, Write};

use crate::endian::{read_le, write_le};
use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;

/// Size of a chunk header on disk (id + length).
pub const CHUNK_HEADER_SIZE: u32 = 8;

/// Size of the top-level RIFF header on disk (magic + size + form type).
pub const RIFF_HEADER_SIZE: u32 = 12;

/// Size of the form type counted inside the declared RIFF size.
pub const FORM_TYPE_SIZE: u32 = 4;

/// The 8-byte header preceding every chunk payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Chunk identifier.
    pub id: FourCc,
    /// Payload length, excluding this header and any pad byte.
    pub size: u32,
}

impl ChunkHeader {
    /// Create a header.
    pub fn new(id: FourCc, size: u32) -> Self {
        Self { id, size }
    }

    /// Read a header, returning `None` if the stream ends cleanly before its
    /// first byte.
    pub fn read_opt<R: Read + ?Sized>(reader: &mut R) -> RiffResult<Option<Self>> {
        let mut id = [0u8; 4];
        let mut filled = 0;
        while filled < id.len() {
            match reader.read(&mut id[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(RiffError::truncation(
                        "chunk header (unexpected end of stream)",
                        0,
                    ))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        let id = FourCc(id);
        let size = read_le::<u32, _>(reader)
            .map_err(|e| RiffError::from_read(e, format!("'{}' chunk header", id)))?;
        Ok(Some(Self { id, size }))
    }

    /// Read a header; end of stream is a truncation error.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> RiffResult<Self> {
        Self::read_opt(reader)?
            .ok_or_else(|| RiffError::truncation("chunk header (unexpected end of stream)", 0))
    }

    /// Write the header.
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.id.as_bytes())?;
        write_le(writer, self.size)
    }
}

/// The 12-byte header at the start of a RIFF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffHeader {
    /// Container magic ("RIFF").
    pub magic: FourCc,
    /// Total file bytes minus 8.
    pub size: u32,
    /// Form type ("WAVE").
    pub form_type: FourCc,
}

impl Default for RiffHeader {
    fn default() -> Self {
        Self {
            magic: FourCc::RIFF,
            size: FORM_TYPE_SIZE,
            form_type: FourCc::WAVE,
        }
    }
}

impl RiffHeader {
    /// Read the header without validating it.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> RiffResult<Self> {
        let mut magic = [0u8; 4];
        let mut form_type = [0u8; 4];
        reader
            .read_exact(&mut magic)
            .map_err(|e| RiffError::from_read(e, "RIFF header"))?;
        let size =
            read_le::<u32, _>(reader).map_err(|e| RiffError::from_read(e, "RIFF header"))?;
        reader
            .read_exact(&mut form_type)
            .map_err(|e| RiffError::from_read(e, "RIFF header"))?;
        Ok(Self {
            magic: FourCc(magic),
            size,
            form_type: FourCc(form_type),
        })
    }

    /// Check the magic and form type.
    pub fn validate(&self) -> RiffResult<()> {
        if self.magic != FourCc::RIFF {
            return Err(RiffError::Format {
                expected: FourCc::RIFF,
                found: self.magic,
            });
        }
        if self.form_type != FourCc::WAVE {
            return Err(RiffError::Format {
                expected: FourCc::WAVE,
                found: self.form_type,
            });
        }
        Ok(())
    }

    /// Write the header.
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.magic.as_bytes())?;
        write_le(writer, self.size)?;
        writer.write_all(self.form_type.as_bytes())
    }
}
