//! Chunk id to payload variant mapping.

use crate::header::ChunkHeader;
use crate::payload::{ChunkPayload, CueChunk, FormatChunk, GeneralChunk, LabelChunk, ListChunk};

/// Returns an empty payload of the variant registered for `header.id`.
///
/// Unknown ids map to [`ChunkPayload::General`] carrying that id.
pub fn payload_for(header: &ChunkHeader) -> ChunkPayload {
    match header.id.as_bytes() {
        b"cue " => ChunkPayload::Cue(CueChunk::new()),
        b"labl" => ChunkPayload::SubList(LabelChunk::default()),
        b"LIST" => ChunkPayload::List(ListChunk::default()),
        b"fmt " => ChunkPayload::Format(FormatChunk::default()),
        _ => ChunkPayload::General(GeneralChunk::new(header.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourcc::FourCc;

    fn variant(id: &[u8; 4]) -> ChunkPayload {
        payload_for(&ChunkHeader::new(FourCc::new(*id), 0))
    }

    #[test]
    fn test_known_ids() {
        assert!(matches!(variant(b"cue "), ChunkPayload::Cue(_)));
        assert!(matches!(variant(b"labl"), ChunkPayload::SubList(_)));
        assert!(matches!(variant(b"LIST"), ChunkPayload::List(_)));
        assert!(matches!(variant(b"fmt "), ChunkPayload::Format(_)));
    }

    #[test]
    fn test_unknown_ids_fall_back_to_general() {
        for id in [b"data", b"JUNK", b"cue\0", b"list", b"FMT "] {
            match variant(id) {
                ChunkPayload::General(g) => {
                    assert_eq!(g.id, FourCc::new(*id));
                    assert!(g.data.is_empty());
                }
                other => panic!("expected general payload for {:?}, got {:?}", id, other),
            }
        }
    }

    #[test]
    fn test_payloads_start_empty() {
        assert_eq!(variant(b"cue ").size(), 4);
        assert_eq!(variant(b"LIST").size(), 4);
        assert_eq!(variant(b"labl").size(), 5);
    }
}
