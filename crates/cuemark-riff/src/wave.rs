//! WAVE container: load, patch and save.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::chunk::Chunk;
use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;
use crate::header::{RiffHeader, FORM_TYPE_SIZE, RIFF_HEADER_SIZE};
use crate::payload::{ChunkPayload, CueChunk, CuePoint, LabelChunk, ListChunk};

/// An in-memory RIFF/WAVE file: the top-level header and its chunks in file
/// order.
#[derive(Debug, PartialEq, Eq)]
pub struct WaveFile {
    header: RiffHeader,
    chunks: Vec<Chunk>,
}

impl Default for WaveFile {
    fn default() -> Self {
        Self::new()
    }
}

fn is_cue(chunk: &Chunk) -> bool {
    chunk.payload().as_cue().is_some()
}

fn is_label_list(chunk: &Chunk) -> bool {
    chunk
        .payload()
        .as_list()
        .is_some_and(ListChunk::is_associated_data)
}

impl WaveFile {
    /// Create a WAVE file with no chunks.
    pub fn new() -> Self {
        Self {
            header: RiffHeader::default(),
            chunks: Vec::new(),
        }
    }

    /// Load a file from disk.
    pub fn open(path: impl AsRef<Path>) -> RiffResult<Self> {
        Self::open_with(path, |_| {})
    }

    /// Load a file from disk, calling `on_chunk` for every top-level chunk as
    /// it is decoded.
    pub fn open_with<F>(path: impl AsRef<Path>, on_chunk: F) -> RiffResult<Self>
    where
        F: FnMut(&Chunk),
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RiffError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_from_with(&mut BufReader::new(file), on_chunk)
    }

    /// Decode a file from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> RiffResult<Self> {
        Self::read_from(&mut io::Cursor::new(bytes))
    }

    /// Decode a file from a reader.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> RiffResult<Self> {
        Self::read_from_with(reader, |_| {})
    }

    /// Decode a file from a reader, calling `on_chunk` for every top-level
    /// chunk.
    ///
    /// Decoding stops once the declared RIFF size is used up. Running out of
    /// stream first, or a chunk that extends past the declared size, is a
    /// [`RiffError::Truncation`].
    pub fn read_from_with<R, F>(reader: &mut R, mut on_chunk: F) -> RiffResult<Self>
    where
        R: Read + ?Sized,
        F: FnMut(&Chunk),
    {
        let header = RiffHeader::read(reader)?;
        header.validate()?;

        let mut remaining = i64::from(header.size) - i64::from(FORM_TYPE_SIZE);
        if remaining <= 0 {
            return Err(RiffError::EmptyFile {
                declared: header.size,
            });
        }

        let mut chunks = Vec::new();
        while remaining > 0 {
            let Some(chunk) = Chunk::read_opt(reader)? else {
                return Err(RiffError::truncation(
                    "WAVE file (stream ended before the declared size)",
                    remaining,
                ));
            };
            remaining -= i64::from(chunk.disk_size());
            on_chunk(&chunk);
            chunks.push(chunk);
        }

        if remaining != 0 {
            return Err(RiffError::truncation(
                "WAVE file (last chunk extends past the declared size)",
                remaining,
            ));
        }

        Ok(Self { header, chunks })
    }

    /// Write the file to disk. The target is created only here.
    pub fn save(&self, path: impl AsRef<Path>) -> RiffResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| RiffError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode header and chunks in order. The declared size is written as is.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        self.header.write(writer)?;
        for chunk in &self.chunks {
            chunk.write(writer)?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let capacity = (RIFF_HEADER_SIZE + self.computed_size() - FORM_TYPE_SIZE) as usize;
        let mut buf = Vec::with_capacity(capacity);
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// The top-level header.
    pub fn header(&self) -> &RiffHeader {
        &self.header
    }

    /// RIFF size carried in the header.
    pub fn declared_size(&self) -> u32 {
        self.header.size
    }

    /// RIFF size implied by the chunks: form type plus every chunk on disk.
    pub fn computed_size(&self) -> u32 {
        FORM_TYPE_SIZE + self.chunks.iter().map(Chunk::disk_size).sum::<u32>()
    }

    /// Top-level chunks in file order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// First top-level chunk with the given id.
    pub fn find_chunk(&self, id: FourCc) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.id() == id)
    }

    /// Append a chunk, growing the declared size by its on-disk size.
    pub fn push_chunk(&mut self, chunk: Chunk) {
        self.header.size = self.header.size.wrapping_add(chunk.disk_size());
        self.chunks.push(chunk);
    }

    /// Remove the first chunk with `id`, shrinking the declared size.
    pub fn remove_chunk(&mut self, id: FourCc) -> Option<Chunk> {
        let index = self.chunks.iter().position(|c| c.id() == id)?;
        Some(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> Chunk {
        let chunk = self.chunks.remove(index);
        self.header.size = self.header.size.wrapping_sub(chunk.disk_size());
        chunk
    }

    /// Drop the cue chunk and the associated data list, if present.
    ///
    /// Other lists (`INFO` metadata and the like) are kept.
    pub fn clear_markers_and_labels(&mut self) {
        while let Some(index) = self.chunks.iter().position(is_cue) {
            self.remove_at(index);
        }
        while let Some(index) = self.chunks.iter().position(is_label_list) {
            self.remove_at(index);
        }
    }

    /// Label the sample frame `frame_offset` with `label` and return the cue
    /// point id used.
    ///
    /// An existing cue point at the same offset is reused. Missing cue or
    /// `adtl` list chunks are appended at the end of the file.
    pub fn add_label(&mut self, label: &str, frame_offset: u32) -> u32 {
        let old_size = self.marker_chunks_size();

        let point_id = self.cue_chunk_or_insert().add_point_if_absent(frame_offset);
        self.label_list_or_insert()
            .push(LabelChunk::new(point_id, label));

        let new_size = self.marker_chunks_size();
        self.header.size = self
            .header
            .size
            .wrapping_sub(old_size)
            .wrapping_add(new_size);
        point_id
    }

    /// Cue points of the cue chunk, empty if there is none.
    pub fn cue_points(&self) -> &[CuePoint] {
        self.chunks
            .iter()
            .find_map(|c| c.payload().as_cue())
            .map(CueChunk::points)
            .unwrap_or(&[])
    }

    /// Labels of the associated data list.
    pub fn labels(&self) -> Vec<&LabelChunk> {
        self.chunks
            .iter()
            .find(|c| is_label_list(c))
            .and_then(|c| c.payload().as_list())
            .map(|list| list.labels().collect())
            .unwrap_or_default()
    }

    /// One line for the header and one per chunk with its id and on-disk size.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.chunks.len() + 1);
        lines.push(format!(
            "data size: {}, chunks: {}",
            self.header.size,
            self.chunks.len()
        ));
        for chunk in &self.chunks {
            lines.push(format!("id: '{}', size: {}", chunk.id(), chunk.disk_size()));
        }
        lines
    }

    fn marker_chunks_size(&self) -> u32 {
        let cue = self.chunks.iter().find(|c| is_cue(c)).map_or(0, Chunk::disk_size);
        let list = self
            .chunks
            .iter()
            .find(|c| is_label_list(c))
            .map_or(0, Chunk::disk_size);
        cue + list
    }

    fn cue_chunk_or_insert(&mut self) -> &mut CueChunk {
        if !self.chunks.iter().any(is_cue) {
            self.chunks.push(Chunk::new(ChunkPayload::Cue(CueChunk::new())));
        }
        self.chunks
            .iter_mut()
            .find_map(|c| c.payload_mut().as_cue_mut())
            .expect("cue chunk was just ensured")
    }

    fn label_list_or_insert(&mut self) -> &mut ListChunk {
        if !self.chunks.iter().any(is_label_list) {
            self.chunks
                .push(Chunk::new(ChunkPayload::List(ListChunk::new(FourCc::ADTL))));
        }
        self.chunks
            .iter_mut()
            .filter_map(|c| c.payload_mut().as_list_mut())
            .find(|list| list.is_associated_data())
            .expect("adtl list was just ensured")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{FormatChunk, GeneralChunk};

    fn data_chunk(bytes: &[u8]) -> Chunk {
        Chunk::new(GeneralChunk::with_data(FourCc::DATA, bytes.to_vec()).into())
    }

    fn minimal_wave() -> WaveFile {
        let mut wave = WaveFile::new();
        wave.push_chunk(Chunk::new(FormatChunk::pcm(1, 8000, 8).into()));
        wave.push_chunk(data_chunk(&[1, 2, 3, 4, 5]));
        wave
    }

    #[test]
    fn test_new_is_empty_wave() {
        let wave = WaveFile::new();
        assert_eq!(wave.declared_size(), 4);
        assert_eq!(wave.computed_size(), 4);
        assert!(wave.chunks().is_empty());
    }

    #[test]
    fn test_push_tracks_size() {
        let wave = minimal_wave();
        // 4 + (8 + 16) + (8 + 5 + 1)
        assert_eq!(wave.declared_size(), 42);
        assert_eq!(wave.computed_size(), 42);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let wave = minimal_wave();
        let bytes = wave.to_bytes().unwrap();
        assert_eq!(bytes.len(), 50);
        let decoded = WaveFile::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, wave);
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_add_label_creates_chunks() {
        let mut wave = minimal_wave();
        let before = wave.declared_size();
        let id = wave.add_label("track1", 0);
        assert_eq!(id, 1);
        assert_eq!(wave.cue_points(), &[CuePoint::new(1, 0)]);
        assert_eq!(wave.labels(), vec![&LabelChunk::new(1, "track1")]);

        // cue: 8 + 28, list: 8 + 4 + (8 + 11 + 1)
        assert_eq!(wave.declared_size(), before + 36 + 32);
        assert_eq!(wave.declared_size(), wave.computed_size());

        let ids: Vec<_> = wave.chunks().iter().map(Chunk::id).collect();
        assert_eq!(ids, vec![FourCc::FMT, FourCc::DATA, FourCc::CUE, FourCc::LIST]);
    }

    #[test]
    fn test_add_label_reuses_point() {
        let mut wave = minimal_wave();
        let first = wave.add_label("a", 1000);
        let second = wave.add_label("b", 1000);
        assert_eq!(first, second);
        assert_eq!(wave.cue_points().len(), 1);
        assert_eq!(wave.labels().len(), 2);
        assert_eq!(wave.declared_size(), wave.computed_size());
    }

    #[test]
    fn test_clear_restores_size() {
        let mut wave = minimal_wave();
        let original = wave.declared_size();
        wave.add_label("x", 10);
        wave.add_label("y", 20);
        wave.clear_markers_and_labels();
        assert_eq!(wave.declared_size(), original);
        assert_eq!(wave.chunks().len(), 2);
        assert!(wave.cue_points().is_empty());
        assert!(wave.labels().is_empty());
    }

    #[test]
    fn test_clear_keeps_info_list() {
        let mut wave = minimal_wave();
        let mut info = ListChunk::new(FourCc::new(*b"INFO"));
        info.push(GeneralChunk::with_data(FourCc::new(*b"INAM"), b"Song\0".to_vec()));
        wave.push_chunk(Chunk::new(info.into()));
        wave.add_label("x", 0);

        wave.clear_markers_and_labels();
        let ids: Vec<_> = wave.chunks().iter().map(Chunk::id).collect();
        assert_eq!(ids, vec![FourCc::FMT, FourCc::DATA, FourCc::LIST]);
        assert_eq!(wave.declared_size(), wave.computed_size());

        // New labels go to a fresh adtl list, not into INFO.
        wave.add_label("y", 0);
        assert_eq!(wave.chunks().len(), 5);
        assert_eq!(wave.labels(), vec![&LabelChunk::new(1, "y")]);
    }

    #[test]
    fn test_remove_chunk() {
        let mut wave = minimal_wave();
        let removed = wave.remove_chunk(FourCc::DATA).unwrap();
        assert_eq!(removed.disk_size(), 14);
        assert_eq!(wave.declared_size(), 28);
        assert!(wave.remove_chunk(FourCc::DATA).is_none());
    }

    #[test]
    fn test_describe() {
        let lines = minimal_wave().describe();
        assert_eq!(
            lines,
            vec![
                "data size: 42, chunks: 2".to_string(),
                "id: 'fmt ', size: 24".to_string(),
                "id: 'data', size: 14".to_string(),
            ]
        );
    }

    #[test]
    fn test_open_missing_file() {
        let err = WaveFile::open("/nonexistent/dir/input.wav").unwrap_err();
        assert!(matches!(err, RiffError::Open { .. }));
        assert_eq!(err.code(), "RIFF_001");
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = WaveFile::from_bytes(b"RIFF\x04\x00\x00\x00WAVE").unwrap_err();
        assert!(matches!(err, RiffError::EmptyFile { declared: 4 }));
        let err = WaveFile::from_bytes(b"RIFF\x00\x00\x00\x00WAVE").unwrap_err();
        assert!(matches!(err, RiffError::EmptyFile { declared: 0 }));
    }

    #[test]
    fn test_short_stream_is_truncation() {
        let mut bytes = minimal_wave().to_bytes().unwrap();
        // Claim 100 more bytes than present.
        bytes[4..8].copy_from_slice(&142u32.to_le_bytes());
        let err = WaveFile::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, RiffError::Truncation { remaining: 100, .. }));
    }

    #[test]
    fn test_trace_observer_sees_every_chunk() {
        let bytes = minimal_wave().to_bytes().unwrap();
        let mut seen = Vec::new();
        WaveFile::read_from_with(&mut io::Cursor::new(&bytes), |c| {
            seen.push((c.id(), c.disk_size()))
        })
        .unwrap();
        assert_eq!(seen, vec![(FourCc::FMT, 24), (FourCc::DATA, 14)]);
    }
}
