//! `LIST` chunk payload.

use std::io::{self, Read, Write};

use super::{ChunkPayload, LabelChunk};
use crate::chunk::Chunk;
use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;

/// Size of the list type tag.
const LIST_TYPE_SIZE: u32 = 4;

/// Deepest list nesting accepted when decoding.
pub const MAX_LIST_DEPTH: usize = 32;

/// A typed container of nested chunks.
#[derive(Debug, PartialEq, Eq)]
pub struct ListChunk {
    /// List type, e.g. `adtl` or `INFO`.
    pub list_type: FourCc,
    chunks: Vec<Chunk>,
}

impl Default for ListChunk {
    fn default() -> Self {
        Self::new(FourCc::ADTL)
    }
}

impl ListChunk {
    /// Create an empty list of the given type.
    pub fn new(list_type: FourCc) -> Self {
        Self {
            list_type,
            chunks: Vec::new(),
        }
    }

    /// Whether this is an associated data list (the one carrying labels).
    pub fn is_associated_data(&self) -> bool {
        self.list_type == FourCc::ADTL
    }

    /// Nested chunks in file order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Append a nested payload.
    pub fn push(&mut self, payload: impl Into<ChunkPayload>) {
        self.chunks.push(Chunk::new(payload.into()));
    }

    /// Labels held directly in this list.
    pub fn labels(&self) -> impl Iterator<Item = &LabelChunk> {
        self.chunks.iter().filter_map(|c| c.payload().as_label())
    }

    /// Payload length: type tag plus every nested chunk with header and pad.
    pub fn size(&self) -> u32 {
        LIST_TYPE_SIZE + self.chunks.iter().map(Chunk::disk_size).sum::<u32>()
    }

    #[cfg(test)]
    fn read_body<R: Read + ?Sized>(&mut self, reader: &mut R, size: u32) -> RiffResult<()> {
        self.read_body_nested(reader, size, 0)
    }

    pub(crate) fn read_body_nested<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        size: u32,
        depth: usize,
    ) -> RiffResult<()> {
        if depth >= MAX_LIST_DEPTH {
            return Err(RiffError::malformed(
                FourCc::LIST,
                format!("lists nested deeper than {}", MAX_LIST_DEPTH),
            ));
        }
        if size < LIST_TYPE_SIZE {
            return Err(RiffError::malformed(
                FourCc::LIST,
                format!("payload is {} bytes, too short for a list type", size),
            ));
        }

        let mut list_type = [0u8; 4];
        reader
            .read_exact(&mut list_type)
            .map_err(|e| RiffError::from_read(e, "'LIST' chunk"))?;
        self.list_type = FourCc(list_type);
        self.chunks.clear();

        let mut remaining = i64::from(size - LIST_TYPE_SIZE);
        while remaining > 0 {
            let chunk = Chunk::read_nested(reader, depth + 1)?;
            remaining -= i64::from(chunk.disk_size());
            self.chunks.push(chunk);
        }

        if remaining != 0 {
            return Err(RiffError::truncation(
                format!("'LIST' ({}) chunk", self.list_type),
                remaining,
            ));
        }
        Ok(())
    }

    pub(crate) fn write_body<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.list_type.as_bytes())?;
        for chunk in &self.chunks {
            chunk.write(writer)?;
        }
        Ok(())
    }
}
