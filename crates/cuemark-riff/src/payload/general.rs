//! Opaque chunk payloads.

use std::io::{self, Read, Write};

use super::read_bytes;
use crate::error::RiffResult;
use crate::fourcc::FourCc;

/// Any chunk without a dedicated layout, kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralChunk {
    /// Chunk id as read from the file.
    pub id: FourCc,
    /// Payload bytes, excluding any pad byte.
    pub data: Vec<u8>,
}

impl GeneralChunk {
    /// Create an empty payload for `id`.
    pub fn new(id: FourCc) -> Self {
        Self {
            id,
            data: Vec::new(),
        }
    }

    /// Create a payload carrying `data`.
    pub fn with_data(id: FourCc, data: Vec<u8>) -> Self {
        Self { id, data }
    }

    /// Payload length.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    pub(crate) fn read_body<R: Read + ?Sized>(&mut self, reader: &mut R, size: u32) -> RiffResult<()> {
        self.data = read_bytes(reader, size, self.id)?;
        Ok(())
    }

    pub(crate) fn write_body<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)
    }
}
