//! `fmt ` chunk payload.

use std::io::{self, Read, Write};

use super::read_bytes;
use crate::endian::{read_le, write_le};
use crate::error::{RiffError, RiffResult};
use crate::fourcc::FourCc;

/// Length of the fixed part of a format descriptor.
pub const FORMAT_BASE_SIZE: u32 = 16;

/// PCM compression code.
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Audio format descriptor. Field values are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatChunk {
    /// Compression code (1 = PCM).
    pub compression_code: u16,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample frames per second.
    pub sample_rate: u32,
    /// Average bytes per second.
    pub average_bytes_per_second: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Significant bits per sample.
    pub bits_per_sample: u16,
    /// Trailing format-specific bytes (extension size field included).
    pub extra: Vec<u8>,
}

impl FormatChunk {
    /// Create a PCM descriptor with derived byte rate and block alignment.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        let block_align = channels * bits_per_sample.div_ceil(8);
        Self {
            compression_code: WAVE_FORMAT_PCM,
            channels,
            sample_rate,
            average_bytes_per_second: sample_rate * u32::from(block_align),
            block_align,
            bits_per_sample,
            extra: Vec::new(),
        }
    }

    /// Payload length.
    pub fn size(&self) -> u32 {
        FORMAT_BASE_SIZE + self.extra.len() as u32
    }

    pub(crate) fn read_body<R: Read + ?Sized>(&mut self, reader: &mut R, size: u32) -> RiffResult<()> {
        if size < FORMAT_BASE_SIZE {
            return Err(RiffError::malformed(
                FourCc::FMT,
                format!("payload is {} bytes, need at least {}", size, FORMAT_BASE_SIZE),
            ));
        }

        let eof = |e| RiffError::from_read(e, "'fmt ' chunk");
        self.compression_code = read_le(reader).map_err(eof)?;
        self.channels = read_le(reader).map_err(eof)?;
        self.sample_rate = read_le(reader).map_err(eof)?;
        self.average_bytes_per_second = read_le(reader).map_err(eof)?;
        self.block_align = read_le(reader).map_err(eof)?;
        self.bits_per_sample = read_le(reader).map_err(eof)?;
        self.extra = read_bytes(reader, size - FORMAT_BASE_SIZE, FourCc::FMT)?;
        Ok(())
    }

    pub(crate) fn write_body<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write_le(writer, self.compression_code)?;
        write_le(writer, self.channels)?;
        write_le(writer, self.sample_rate)?;
        write_le(writer, self.average_bytes_per_second)?;
        write_le(writer, self.block_align)?;
        write_le(writer, self.bits_per_sample)?;
        writer.write_all(&self.extra)
    }
}
