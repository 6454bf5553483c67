//! Chunk objects: a payload plus its on-disk framing.

use std::io::{self, Read, Write};

use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;
use crate::header::{ChunkHeader, CHUNK_HEADER_SIZE};
use crate::payload::ChunkPayload;
use crate::registry::payload_for;

/// One chunk in a RIFF tree. Owns its payload exclusively; not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct Chunk {
    payload: ChunkPayload,
}

impl Chunk {
    /// Wrap a payload.
    pub fn new(payload: ChunkPayload) -> Self {
        Self { payload }
    }

    /// Chunk id.
    pub fn id(&self) -> FourCc {
        self.payload.id()
    }

    /// The decoded payload.
    pub fn payload(&self) -> &ChunkPayload {
        &self.payload
    }

    /// Mutable access to the payload.
    pub fn payload_mut(&mut self) -> &mut ChunkPayload {
        &mut self.payload
    }

    /// Consume the chunk, returning its payload.
    pub fn into_payload(self) -> ChunkPayload {
        self.payload
    }

    /// Declared payload length.
    pub fn size(&self) -> u32 {
        self.payload.size()
    }

    /// Bytes the chunk occupies on disk: header, payload and pad byte.
    pub fn disk_size(&self) -> u32 {
        let size = CHUNK_HEADER_SIZE + self.payload.size();
        size + (size % 2)
    }

    /// Decode one chunk, recursing into lists.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> RiffResult<Self> {
        Self::read_nested(reader, 0)
    }

    pub(crate) fn read_nested<R: Read + ?Sized>(reader: &mut R, depth: usize) -> RiffResult<Self> {
        let header = ChunkHeader::read(reader)?;
        Self::read_after_header(reader, &header, depth)
    }

    /// Decode one chunk, or return `None` if the stream ends cleanly first.
    pub fn read_opt<R: Read + ?Sized>(reader: &mut R) -> RiffResult<Option<Self>> {
        match ChunkHeader::read_opt(reader)? {
            Some(header) => Self::read_after_header(reader, &header, 0).map(Some),
            None => Ok(None),
        }
    }

    fn read_after_header<R: Read + ?Sized>(
        reader: &mut R,
        header: &ChunkHeader,
        depth: usize,
    ) -> RiffResult<Self> {
        let mut payload = payload_for(header);
        payload.read_body_nested(reader, header.size, depth)?;

        if header.size % 2 != 0 {
            let mut pad = [0u8; 1];
            reader
                .read_exact(&mut pad)
                .map_err(|e| RiffError::from_read(e, format!("'{}' chunk pad byte", header.id)))?;
        }

        Ok(Self { payload })
    }

    /// Encode header, payload and pad byte.
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let header = self.payload.header();
        header.write(writer)?;
        self.payload.write_body(writer)?;
        if header.size % 2 != 0 {
            writer.write_all(&[0])?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.disk_size() as usize);
        self.write(&mut buf)?;
        Ok(buf)
    }
}

impl From<ChunkPayload> for Chunk {
    fn from(payload: ChunkPayload) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{CueChunk, FormatChunk, GeneralChunk, LabelChunk};
    use std::io::Cursor;

    fn general(id: &[u8; 4], data: &[u8]) -> Chunk {
        Chunk::new(GeneralChunk::with_data(FourCc::new(*id), data.to_vec()).into())
    }

    #[test]
    fn test_odd_payload_is_padded() {
        let chunk = general(b"data", &[1, 2, 3, 4, 5]);
        let bytes = chunk.to_bytes().unwrap();
        assert_eq!(chunk.size(), 5);
        assert_eq!(chunk.disk_size(), 14);
        assert_eq!(bytes.len(), 14);
        assert_eq!(&bytes[4..8], &[5, 0, 0, 0]);
        assert_eq!(bytes[13], 0);
    }

    #[test]
    fn test_even_payload_not_padded() {
        let chunk = general(b"data", &[1, 2, 3, 4]);
        assert_eq!(chunk.disk_size(), 12);
        assert_eq!(chunk.to_bytes().unwrap().len(), 12);
    }

    #[test]
    fn test_read_consumes_pad_byte() {
        let mut bytes = general(b"JUNK", b"abc").to_bytes().unwrap();
        bytes.extend_from_slice(&general(b"next", b"").to_bytes().unwrap());

        let mut cursor = Cursor::new(&bytes);
        let first = Chunk::read(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 12);
        let second = Chunk::read(&mut cursor).unwrap();
        assert_eq!(first, general(b"JUNK", b"abc"));
        assert_eq!(second.id(), FourCc::new(*b"next"));
    }

    #[test]
    fn test_missing_pad_byte_is_truncation() {
        let bytes = b"JUNK\x03\x00\x00\x00abc".to_vec();
        let err = Chunk::read(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, RiffError::Truncation { .. }));
    }

    #[test]
    fn test_dispatches_by_id() {
        let fmt = Chunk::new(FormatChunk::pcm(1, 8000, 8).into());
        let decoded = Chunk::read(&mut Cursor::new(fmt.to_bytes().unwrap())).unwrap();
        assert!(decoded.payload().as_format().is_some());
        assert_eq!(decoded, fmt);

        let mut cue = CueChunk::new();
        cue.add_point_if_absent(5);
        let cue = Chunk::new(cue.into());
        let decoded = Chunk::read(&mut Cursor::new(cue.to_bytes().unwrap())).unwrap();
        assert_eq!(decoded.payload().as_cue().map(CueChunk::len), Some(1));
    }

    #[test]
    fn test_label_chunk_padding() {
        // "ab" -> 4 + 2 + 1 = 7 bytes, odd
        let chunk = Chunk::new(LabelChunk::new(1, "ab").into());
        assert_eq!(chunk.size(), 7);
        assert_eq!(chunk.disk_size(), 16);
        assert_eq!(chunk.to_bytes().unwrap().len(), 16);
    }

    #[test]
    fn test_read_opt_at_end() {
        let mut cursor = Cursor::new(Vec::new());
        assert!(Chunk::read_opt(&mut cursor).unwrap().is_none());
    }
}
