//! `labl` sub-chunk payload.

use std::io::{self, Read, Write};

use super::read_bytes;
use crate::endian::{read_le, write_le};
use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;

/// A text label bound to a cue point, stored inside an `adtl` list.
///
/// Labels written by other tools may carry extra NULs or non-UTF-8 bytes after
/// the id. Those bytes are kept and written back verbatim as long as `text`
/// still matches them.
#[derive(Debug, Clone, Default)]
pub struct LabelChunk {
    /// Id of the cue point this label names.
    pub cue_point_id: u32,
    /// Label text, written null-terminated.
    pub text: String,
    raw: Option<Vec<u8>>,
}

impl LabelChunk {
    /// Create a label for `cue_point_id`.
    pub fn new(cue_point_id: u32, text: impl Into<String>) -> Self {
        Self {
            cue_point_id,
            text: text.into(),
            raw: None,
        }
    }

    /// Payload length: id, text and terminator.
    pub fn size(&self) -> u32 {
        match self.original_bytes() {
            Some(raw) => raw.len() as u32 + 4,
            None => self.text.len() as u32 + 5,
        }
    }

    /// The decoded bytes after the id, if `text` has not changed since.
    fn original_bytes(&self) -> Option<&[u8]> {
        self.raw
            .as_deref()
            .filter(|raw| decode_text(raw) == self.text)
    }

    pub(crate) fn read_body<R: Read + ?Sized>(&mut self, reader: &mut R, size: u32) -> RiffResult<()> {
        if size < 4 {
            return Err(RiffError::malformed(
                FourCc::LABL,
                format!("payload is {} bytes, too short for a cue point id", size),
            ));
        }

        self.cue_point_id =
            read_le(reader).map_err(|e| RiffError::from_read(e, "'labl' chunk"))?;
        let raw = read_bytes(reader, size - 4, FourCc::LABL)?;
        self.text = decode_text(&raw);
        let canonical = raw.len() == self.text.len() + 1
            && raw.ends_with(&[0])
            && raw[..self.text.len()] == *self.text.as_bytes();
        self.raw = (!canonical).then_some(raw);
        Ok(())
    }

    pub(crate) fn write_body<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write_le(writer, self.cue_point_id)?;
        match self.original_bytes() {
            Some(raw) => writer.write_all(raw),
            None => {
                writer.write_all(self.text.as_bytes())?;
                writer.write_all(&[0])
            }
        }
    }
}

/// Labels compare by id and text only.
impl PartialEq for LabelChunk {
    fn eq(&self, other: &Self) -> bool {
        self.cue_point_id == other.cue_point_id && self.text == other.text
    }
}

impl Eq for LabelChunk {}

/// Text before the first NUL.
fn decode_text(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_size_counts_terminator() {
        assert_eq!(LabelChunk::new(1, "track1").size(), 11);
        assert_eq!(LabelChunk::new(1, "").size(), 5);
    }

    #[test]
    fn test_write_layout() {
        let mut buf = Vec::new();
        LabelChunk::new(3, "x").write_body(&mut buf).unwrap();
        assert_eq!(buf, vec![3, 0, 0, 0, b'x', 0]);
    }

    #[test]
    fn test_read_stops_at_first_nul() {
        // Some writers pad the text with extra NULs inside the declared length.
        let bytes = vec![7, 0, 0, 0, b'i', b'n', b't', b'r', b'o', 0, 0, 0];
        let mut label = LabelChunk::default();
        let mut cursor = Cursor::new(&bytes);
        label.read_body(&mut cursor, bytes.len() as u32).unwrap();
        assert_eq!(label, LabelChunk::new(7, "intro"));
        assert_eq!(cursor.position(), bytes.len() as u64);
    }

    #[test]
    fn test_padded_text_written_back_verbatim() {
        let bytes = vec![7, 0, 0, 0, b'i', b'n', 0, 0, 0, 0];
        let mut label = LabelChunk::default();
        label.read_body(&mut Cursor::new(&bytes), bytes.len() as u32).unwrap();
        assert_eq!(label.size(), bytes.len() as u32);

        let mut buf = Vec::new();
        label.write_body(&mut buf).unwrap();
        assert_eq!(buf, bytes);

        label.text = "out".to_string();
        assert_eq!(label.size(), 8);
        buf.clear();
        label.write_body(&mut buf).unwrap();
        assert_eq!(buf, vec![7, 0, 0, 0, b'o', b'u', b't', 0]);
    }

    #[test]
    fn test_missing_terminator_written_back_verbatim() {
        let bytes = vec![2, 0, 0, 0, b'a', b'b'];
        let mut label = LabelChunk::default();
        label.read_body(&mut Cursor::new(&bytes), bytes.len() as u32).unwrap();
        assert_eq!(label.text, "ab");

        let mut buf = Vec::new();
        label.write_body(&mut buf).unwrap();
        assert_eq!(buf, bytes);
    }

    #[test]
    fn test_too_short_rejected() {
        let mut label = LabelChunk::default();
        let err = label.read_body(&mut Cursor::new(vec![0u8; 2]), 2).unwrap_err();
        assert!(matches!(err, RiffError::MalformedChunk { .. }));
    }
}
