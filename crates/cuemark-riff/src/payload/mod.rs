//! Chunk payload variants.
//!
//! Every chunk body decodes into one variant of [`ChunkPayload`]. Known ids get
//! a typed layout; everything else is carried as opaque bytes so it can be
//! written back unchanged.

mod cue;
mod format;
mod general;
mod label;
mod list;

pub use cue::*;
pub use format::*;
pub use general::*;
pub use label::*;
pub use list::*;

use std::io::{self, Read, Write};

use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;
use crate::header::ChunkHeader;

/// Decoded chunk body.
#[derive(Debug, PartialEq, Eq)]
pub enum ChunkPayload {
    /// Opaque bytes under an unrecognized id.
    General(GeneralChunk),
    /// `fmt ` descriptor.
    Format(FormatChunk),
    /// `cue ` points.
    Cue(CueChunk),
    /// `labl` entry of an associated data list.
    SubList(LabelChunk),
    /// `LIST` container.
    List(ListChunk),
}

impl ChunkPayload {
    /// Chunk id this payload is written under.
    pub fn id(&self) -> FourCc {
        match self {
            ChunkPayload::General(c) => c.id,
            ChunkPayload::Format(_) => FourCc::FMT,
            ChunkPayload::Cue(_) => FourCc::CUE,
            ChunkPayload::SubList(_) => FourCc::LABL,
            ChunkPayload::List(_) => FourCc::LIST,
        }
    }

    /// Payload length as declared in the chunk header.
    pub fn size(&self) -> u32 {
        match self {
            ChunkPayload::General(c) => c.size(),
            ChunkPayload::Format(c) => c.size(),
            ChunkPayload::Cue(c) => c.size(),
            ChunkPayload::SubList(c) => c.size(),
            ChunkPayload::List(c) => c.size(),
        }
    }

    /// Header describing this payload.
    pub fn header(&self) -> ChunkHeader {
        ChunkHeader::new(self.id(), self.size())
    }

    /// Returns the cue payload, if this is one.
    pub fn as_cue(&self) -> Option<&CueChunk> {
        match self {
            ChunkPayload::Cue(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable access to the cue payload, if this is one.
    pub fn as_cue_mut(&mut self) -> Option<&mut CueChunk> {
        match self {
            ChunkPayload::Cue(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the list payload, if this is one.
    pub fn as_list(&self) -> Option<&ListChunk> {
        match self {
            ChunkPayload::List(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable access to the list payload, if this is one.
    pub fn as_list_mut(&mut self) -> Option<&mut ListChunk> {
        match self {
            ChunkPayload::List(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the label payload, if this is one.
    pub fn as_label(&self) -> Option<&LabelChunk> {
        match self {
            ChunkPayload::SubList(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the format payload, if this is one.
    pub fn as_format(&self) -> Option<&FormatChunk> {
        match self {
            ChunkPayload::Format(c) => Some(c),
            _ => None,
        }
    }

    /// Decode `size` payload bytes into this (freshly constructed) variant.
    pub fn read_body<R: Read + ?Sized>(&mut self, reader: &mut R, size: u32) -> RiffResult<()> {
        self.read_body_nested(reader, size, 0)
    }

    /// As [`ChunkPayload::read_body`], for a chunk `depth` lists deep.
    pub(crate) fn read_body_nested<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        size: u32,
        depth: usize,
    ) -> RiffResult<()> {
        match self {
            ChunkPayload::General(c) => c.read_body(reader, size),
            ChunkPayload::Format(c) => c.read_body(reader, size),
            ChunkPayload::Cue(c) => c.read_body(reader, size),
            ChunkPayload::SubList(c) => c.read_body(reader, size),
            ChunkPayload::List(c) => c.read_body_nested(reader, size, depth),
        }
    }

    /// Encode the payload bytes, without header or pad byte.
    pub fn write_body<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            ChunkPayload::General(c) => c.write_body(writer),
            ChunkPayload::Format(c) => c.write_body(writer),
            ChunkPayload::Cue(c) => c.write_body(writer),
            ChunkPayload::SubList(c) => c.write_body(writer),
            ChunkPayload::List(c) => c.write_body(writer),
        }
    }
}

impl From<GeneralChunk> for ChunkPayload {
    fn from(c: GeneralChunk) -> Self {
        ChunkPayload::General(c)
    }
}

impl From<FormatChunk> for ChunkPayload {
    fn from(c: FormatChunk) -> Self {
        ChunkPayload::Format(c)
    }
}

impl From<CueChunk> for ChunkPayload {
    fn from(c: CueChunk) -> Self {
        ChunkPayload::Cue(c)
    }
}

impl From<LabelChunk> for ChunkPayload {
    fn from(c: LabelChunk) -> Self {
        ChunkPayload::SubList(c)
    }
}

impl From<ListChunk> for ChunkPayload {
    fn from(c: ListChunk) -> Self {
        ChunkPayload::List(c)
    }
}

/// Read exactly `len` bytes of a chunk body without trusting `len` for the
/// allocation.
pub(crate) fn read_bytes<R: Read + ?Sized>(reader: &mut R, len: u32, id: FourCc) -> RiffResult<Vec<u8>> {
    let mut data = Vec::new();
    reader.take(u64::from(len)).read_to_end(&mut data)?;
    if data.len() as u64 != u64::from(len) {
        return Err(RiffError::truncation(
            format!("'{}' chunk (unexpected end of stream)", id),
            i64::from(len) - data.len() as i64,
        ));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids() {
        assert_eq!(ChunkPayload::from(FormatChunk::default()).id(), FourCc::FMT);
        assert_eq!(ChunkPayload::from(CueChunk::new()).id(), FourCc::CUE);
        assert_eq!(ChunkPayload::from(LabelChunk::default()).id(), FourCc::LABL);
        assert_eq!(ChunkPayload::from(ListChunk::default()).id(), FourCc::LIST);
        let junk = FourCc::new(*b"JUNK");
        assert_eq!(ChunkPayload::from(GeneralChunk::new(junk)).id(), junk);
    }

    #[test]
    fn test_header_tracks_size() {
        let mut cue = CueChunk::new();
        cue.add_point_if_absent(0);
        let payload = ChunkPayload::Cue(cue);
        assert_eq!(payload.header(), ChunkHeader::new(FourCc::CUE, 28));
    }

    #[test]
    fn test_accessors() {
        let mut payload = ChunkPayload::from(ListChunk::default());
        assert!(payload.as_list().is_some());
        assert!(payload.as_cue().is_none());
        payload
            .as_list_mut()
            .unwrap()
            .push(LabelChunk::new(1, "a"));
        assert_eq!(payload.size(), 4 + 8 + 6);
    }
}
