//! `cue ` chunk payload.

use std::io::{self, Read, Write};

use crate::endian::{read_le, write_le};
use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;

/// Size of one cue point on disk.
pub const CUE_POINT_SIZE: u32 = 24;

/// Size of the point-count field preceding the points.
const CUE_COUNT_SIZE: u32 = 4;

/// A marker referencing a sample frame in the `data` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuePoint {
    /// Identifier, unique within its cue chunk.
    pub id: u32,
    /// Play order position.
    pub position: u32,
    /// Chunk the marker points into.
    pub data_chunk_id: FourCc,
    /// Offset of that chunk (0 for a plain `data` chunk).
    pub chunk_start: u32,
    /// Offset of the block containing the marker.
    pub block_start: u32,
    /// Sample frame the marker refers to.
    pub frame_offset: u32,
}

impl CuePoint {
    /// Create a point into the `data` chunk.
    pub fn new(id: u32, frame_offset: u32) -> Self {
        Self {
            id,
            position: 0,
            data_chunk_id: FourCc::DATA,
            chunk_start: 0,
            block_start: 0,
            frame_offset,
        }
    }

    fn read<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let id = read_le(reader)?;
        let position = read_le(reader)?;
        let mut data_chunk_id = [0u8; 4];
        reader.read_exact(&mut data_chunk_id)?;
        Ok(Self {
            id,
            position,
            data_chunk_id: FourCc(data_chunk_id),
            chunk_start: read_le(reader)?,
            block_start: read_le(reader)?,
            frame_offset: read_le(reader)?,
        })
    }

    fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write_le(writer, self.id)?;
        write_le(writer, self.position)?;
        writer.write_all(self.data_chunk_id.as_bytes())?;
        write_le(writer, self.chunk_start)?;
        write_le(writer, self.block_start)?;
        write_le(writer, self.frame_offset)
    }
}

/// Ordered list of cue points. No two points share a frame offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueChunk {
    points: Vec<CuePoint>,
}

impl CueChunk {
    /// Create an empty cue chunk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cue points in file order.
    pub fn points(&self) -> &[CuePoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the chunk holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Look up a point by id.
    pub fn point(&self, id: u32) -> Option<&CuePoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Returns the id of the point at `frame_offset`, appending a new point
    /// if there is none.
    ///
    /// New points get `len() + 1`. If a decoded file already uses that id the
    /// next id above the current maximum is taken instead, or the lowest free
    /// id when the maximum is `u32::MAX`.
    pub fn add_point_if_absent(&mut self, frame_offset: u32) -> u32 {
        if let Some(existing) = self.points.iter().find(|p| p.frame_offset == frame_offset) {
            return existing.id;
        }

        let mut id = self.points.len() as u32 + 1;
        if self.point(id).is_some() {
            let max = self.points.iter().map(|p| p.id).max().unwrap_or(0);
            id = match max.checked_add(1) {
                Some(next) => next,
                None => (1..=u32::MAX)
                    .find(|&candidate| self.point(candidate).is_none())
                    .unwrap_or(0),
            };
        }
        self.points.push(CuePoint::new(id, frame_offset));
        id
    }

    /// Payload length.
    pub fn size(&self) -> u32 {
        CUE_COUNT_SIZE + CUE_POINT_SIZE * self.points.len() as u32
    }

    pub(crate) fn read_body<R: Read + ?Sized>(&mut self, reader: &mut R, size: u32) -> RiffResult<()> {
        if size < CUE_COUNT_SIZE {
            return Err(RiffError::malformed(
                FourCc::CUE,
                format!("payload is {} bytes, too short for the point count", size),
            ));
        }

        let count: u32 =
            read_le(reader).map_err(|e| RiffError::from_read(e, "'cue ' chunk"))?;
        let expected = u64::from(CUE_COUNT_SIZE) + u64::from(CUE_POINT_SIZE) * u64::from(count);
        if expected != u64::from(size) {
            return Err(RiffError::malformed(
                FourCc::CUE,
                format!(
                    "{} point(s) need {} bytes, chunk declares {}",
                    count, expected, size
                ),
            ));
        }

        self.points.clear();
        for _ in 0..count {
            let point =
                CuePoint::read(reader).map_err(|e| RiffError::from_read(e, "'cue ' chunk"))?;
            self.points.push(point);
        }
        Ok(())
    }

    pub(crate) fn write_body<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write_le(writer, self.points.len() as u32)?;
        for point in &self.points {
            point.write(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ids_are_sequential() {
        let mut cue = CueChunk::new();
        assert_eq!(cue.add_point_if_absent(0), 1);
        assert_eq!(cue.add_point_if_absent(4410), 2);
        assert_eq!(cue.add_point_if_absent(8820), 3);
        assert_eq!(cue.len(), 3);
        assert_eq!(cue.size(), 4 + 3 * 24);
    }

    #[test]
    fn test_duplicate_offset_reuses_id() {
        let mut cue = CueChunk::new();
        let first = cue.add_point_if_absent(1000);
        let second = cue.add_point_if_absent(1000);
        assert_eq!(first, second);
        assert_eq!(cue.len(), 1);
    }

    #[test]
    fn test_new_point_defaults() {
        let mut cue = CueChunk::new();
        cue.add_point_if_absent(77);
        let p = cue.points()[0];
        assert_eq!(p, CuePoint::new(1, 77));
        assert_eq!(p.data_chunk_id, FourCc::DATA);
        assert_eq!((p.position, p.chunk_start, p.block_start), (0, 0, 0));
    }

    #[test]
    fn test_id_collision_after_decode() {
        let mut cue = CueChunk {
            points: vec![CuePoint::new(2, 10)],
        };
        assert_eq!(cue.add_point_if_absent(20), 3);
    }

    #[test]
    fn test_id_collision_at_max_takes_lowest_free() {
        let mut cue = CueChunk {
            points: vec![CuePoint::new(3, 10), CuePoint::new(u32::MAX, 11)],
        };
        assert_eq!(cue.add_point_if_absent(20), 1);
        assert_eq!(cue.add_point_if_absent(30), 4);
    }

    #[test]
    fn test_point_layout() {
        let mut cue = CueChunk::new();
        cue.add_point_if_absent(0x0102_0304);
        let mut buf = Vec::new();
        cue.write_body(&mut buf).unwrap();
        assert_eq!(buf.len() as u32, cue.size());
        assert_eq!(&buf[0..4], &[1, 0, 0, 0]);
        assert_eq!(&buf[4..8], &[1, 0, 0, 0]);
        assert_eq!(&buf[12..16], b"data");
        assert_eq!(&buf[24..28], &[0x04, 0x03, 0x02, 0x01]);

        let mut decoded = CueChunk::new();
        decoded
            .read_body(&mut Cursor::new(&buf), buf.len() as u32)
            .unwrap();
        assert_eq!(decoded, cue);
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let mut buf = Vec::new();
        write_le(&mut buf, 2u32).unwrap();
        buf.extend_from_slice(&[0u8; 24]);
        let mut cue = CueChunk::new();
        let err = cue.read_body(&mut Cursor::new(&buf), 28).unwrap_err();
        assert!(matches!(err, RiffError::MalformedChunk { .. }));
    }
}
