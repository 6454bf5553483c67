//! Test fixture utilities for building WAVE files byte by byte.

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A raw chunk: id plus payload bytes, padded on output when odd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    pub id: [u8; 4],
    pub data: Vec<u8>,
}

impl RawChunk {
    pub fn new(id: &[u8; 4], data: impl Into<Vec<u8>>) -> Self {
        Self {
            id: *id,
            data: data.into(),
        }
    }

    /// Header, payload and pad byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 9);
        out.extend_from_slice(&self.id);
        out.write_u32::<LittleEndian>(self.data.len() as u32).unwrap();
        out.extend_from_slice(&self.data);
        if self.data.len() % 2 == 1 {
            out.push(0);
        }
        out
    }
}

/// 16-byte PCM format chunk.
pub fn fmt_pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> RawChunk {
    let block_align = channels * bits_per_sample.div_ceil(8);
    let mut data = Vec::with_capacity(16);
    data.write_u16::<LittleEndian>(1).unwrap();
    data.write_u16::<LittleEndian>(channels).unwrap();
    data.write_u32::<LittleEndian>(sample_rate).unwrap();
    data.write_u32::<LittleEndian>(sample_rate * u32::from(block_align))
        .unwrap();
    data.write_u16::<LittleEndian>(block_align).unwrap();
    data.write_u16::<LittleEndian>(bits_per_sample).unwrap();
    RawChunk::new(b"fmt ", data)
}

/// "cue " chunk with `(id, frame_offset)` points, each bound to the data chunk.
pub fn cue(points: &[(u32, u32)]) -> RawChunk {
    let mut data = Vec::with_capacity(4 + 24 * points.len());
    data.write_u32::<LittleEndian>(points.len() as u32).unwrap();
    for &(id, frame_offset) in points {
        data.write_u32::<LittleEndian>(id).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap();
        data.extend_from_slice(b"data");
        data.write_u32::<LittleEndian>(0).unwrap();
        data.write_u32::<LittleEndian>(0).unwrap();
        data.write_u32::<LittleEndian>(frame_offset).unwrap();
    }
    RawChunk::new(b"cue ", data)
}

/// "labl" chunk: cue point id followed by NUL-terminated text.
pub fn labl(cue_point_id: u32, text: &str) -> RawChunk {
    let mut data = Vec::with_capacity(text.len() + 5);
    data.write_u32::<LittleEndian>(cue_point_id).unwrap();
    data.extend_from_slice(text.as_bytes());
    data.push(0);
    RawChunk::new(b"labl", data)
}

/// "LIST" chunk of `list_type` holding `children`.
pub fn list(list_type: &[u8; 4], children: &[RawChunk]) -> RawChunk {
    let mut data = list_type.to_vec();
    for child in children {
        data.extend_from_slice(&child.to_bytes());
    }
    RawChunk::new(b"LIST", data)
}

/// Builder for a complete RIFF/WAVE byte stream.
#[derive(Debug, Clone, Default)]
pub struct WavBuilder {
    chunks: Vec<RawChunk>,
    declared_size: Option<u32>,
    magic: Option<[u8; 4]>,
    form_type: Option<[u8; 4]>,
}

impl WavBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mono 8-bit PCM with the given sample bytes.
    pub fn pcm8(samples: &[u8]) -> Self {
        Self::new()
            .chunk(fmt_pcm(1, 8000, 8))
            .chunk(RawChunk::new(b"data", samples))
    }

    pub fn chunk(mut self, chunk: RawChunk) -> Self {
        self.chunks.push(chunk);
        self
    }

    /// Override the RIFF size field instead of computing it.
    pub fn declared_size(mut self, size: u32) -> Self {
        self.declared_size = Some(size);
        self
    }

    pub fn magic(mut self, magic: &[u8; 4]) -> Self {
        self.magic = Some(*magic);
        self
    }

    pub fn form_type(mut self, form_type: &[u8; 4]) -> Self {
        self.form_type = Some(*form_type);
        self
    }

    /// Size the header would carry: form type plus every padded chunk.
    pub fn computed_size(&self) -> u32 {
        4 + self
            .chunks
            .iter()
            .map(|c| c.to_bytes().len() as u32)
            .sum::<u32>()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.magic.unwrap_or(*b"RIFF"));
        out.write_u32::<LittleEndian>(self.declared_size.unwrap_or_else(|| self.computed_size()))
            .unwrap();
        out.extend_from_slice(&self.form_type.unwrap_or(*b"WAVE"));
        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.to_bytes());
        }
        out
    }
}

/// A scratch directory for WAVE files used by one test.
pub struct WavFixture {
    pub root: TempDir,
}

impl WavFixture {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write `bytes` to `name` inside the fixture directory.
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, bytes).expect("Failed to write fixture file");
        path
    }

    /// Write a 16-bit mono sine sweep through `hound`.
    pub fn write_hound_pcm16(&self, name: &str, sample_rate: u32, samples: usize) -> PathBuf {
        let path = self.path().join(name);
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("Failed to create WAV");
        for i in 0..samples {
            let t = i as f32 / sample_rate as f32;
            let value = (t * 440.0 * std::f32::consts::TAU).sin() * 0.5;
            writer
                .write_sample((value * i16::MAX as f32) as i16)
                .expect("Failed to write sample");
        }
        writer.finalize().expect("Failed to finalize WAV");
        path
    }
}

impl Default for WavFixture {
    fn default() -> Self {
        Self::new()
    }
}
