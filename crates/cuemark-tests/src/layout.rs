//! Independent RIFF layout validator.
//!
//! Walks the top-level chunks of a WAVE byte stream without going through
//! `cuemark-riff`, so tests can check what was actually written.

use std::fmt;

/// Error type for layout validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    /// Description of what went wrong.
    pub message: String,
    /// Byte offset where the error occurred.
    pub offset: usize,
}

impl LayoutError {
    fn at(offset: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RIFF error at offset {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for LayoutError {}

/// One top-level chunk as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    pub id: [u8; 4],
    /// Declared payload size, without the pad byte.
    pub size: u32,
    /// Offset of the chunk header.
    pub offset: usize,
}

impl ChunkSpan {
    pub fn id_str(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }

    /// Payload bytes of this chunk within `data`.
    pub fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        let start = self.offset + 8;
        &data[start..start + self.size as usize]
    }
}

/// Parsed layout of a WAVE file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavLayout {
    pub declared_size: u32,
    pub chunks: Vec<ChunkSpan>,
}

impl WavLayout {
    pub fn ids(&self) -> Vec<String> {
        self.chunks.iter().map(ChunkSpan::id_str).collect()
    }

    pub fn find(&self, id: &[u8; 4]) -> Option<&ChunkSpan> {
        self.chunks.iter().find(|c| &c.id == id)
    }
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Validate the RIFF/WAVE framing of `data` and list its chunks.
///
/// Checks the magic, the form type, that every chunk (with its pad byte) fits,
/// and that the chunks exactly fill the declared size.
pub fn validate_layout(data: &[u8]) -> Result<WavLayout, LayoutError> {
    if data.len() < 12 {
        return Err(LayoutError::at(0, format!("file too short: {} bytes", data.len())));
    }
    if &data[0..4] != b"RIFF" {
        return Err(LayoutError::at(0, "missing 'RIFF' magic"));
    }
    if &data[8..12] != b"WAVE" {
        return Err(LayoutError::at(8, "missing 'WAVE' form type"));
    }

    let declared_size = u32_at(data, 4);
    let end = 8 + declared_size as usize;
    if end != data.len() {
        return Err(LayoutError::at(
            4,
            format!("declared size {} but file holds {} bytes", declared_size, data.len() - 8),
        ));
    }

    let mut chunks = Vec::new();
    let mut offset = 12;
    while offset < end {
        if offset + 8 > end {
            return Err(LayoutError::at(offset, "partial chunk header"));
        }
        let mut id = [0u8; 4];
        id.copy_from_slice(&data[offset..offset + 4]);
        let size = u32_at(data, offset + 4);
        let padded = size as usize + (size as usize & 1);
        if offset + 8 + padded > end {
            return Err(LayoutError::at(offset, "chunk extends past the declared size"));
        }
        chunks.push(ChunkSpan { id, size, offset });
        offset += 8 + padded;
    }

    Ok(WavLayout {
        declared_size,
        chunks,
    })
}

/// `(id, frame_offset)` pairs of a "cue " payload.
pub fn cue_points(payload: &[u8]) -> Vec<(u32, u32)> {
    let count = u32_at(payload, 0) as usize;
    (0..count)
        .map(|i| {
            let base = 4 + i * 24;
            (u32_at(payload, base), u32_at(payload, base + 20))
        })
        .collect()
}

/// `(cue_point_id, text)` pairs of the "labl" entries in an "adtl" payload.
pub fn labels(payload: &[u8]) -> Vec<(u32, String)> {
    assert_eq!(&payload[0..4], b"adtl", "not an associated data list");
    let mut out = Vec::new();
    let mut offset = 4;
    while offset + 8 <= payload.len() {
        let size = u32_at(payload, offset + 4) as usize;
        let body = &payload[offset + 8..offset + 8 + size];
        if &payload[offset..offset + 4] == b"labl" {
            let text = body[4..].split(|&b| b == 0).next().unwrap_or_default();
            out.push((u32_at(body, 0), String::from_utf8_lossy(text).into_owned()));
        }
        offset += 8 + size + (size & 1);
    }
    out
}
