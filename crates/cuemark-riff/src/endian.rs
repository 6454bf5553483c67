//! Little-endian integer codec.
//!
//! RIFF stores every multi-byte integer little-endian. The conversions here
//! branch on the host byte order, which is detected once per process.

use std::io::{self, Read, Write};
use std::sync::OnceLock;

static HOST_LITTLE_ENDIAN: OnceLock<bool> = OnceLock::new();

/// Returns `true` when the host stores integers least-significant byte first.
pub fn host_is_little_endian() -> bool {
    *HOST_LITTLE_ENDIAN.get_or_init(|| 1u16.to_ne_bytes()[0] == 1)
}

/// A fixed-width unsigned integer with a little-endian on-disk form.
pub trait LittleEndian: Copy + Sized {
    /// On-disk byte array (`[u8; 2]` or `[u8; 4]`).
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Encodes the value as little-endian bytes.
    fn encode_le(self) -> Self::Bytes;

    /// Decodes a value from little-endian bytes.
    fn decode_le(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_little_endian {
    ($ty:ty, $width:expr) => {
        impl LittleEndian for $ty {
            type Bytes = [u8; $width];

            fn encode_le(self) -> Self::Bytes {
                let mut bytes = self.to_ne_bytes();
                if !host_is_little_endian() {
                    bytes.reverse();
                }
                bytes
            }

            fn decode_le(mut bytes: Self::Bytes) -> Self {
                if !host_is_little_endian() {
                    bytes.reverse();
                }
                <$ty>::from_ne_bytes(bytes)
            }
        }
    };
}

impl_little_endian!(u16, 2);
impl_little_endian!(u32, 4);

/// Reads one little-endian integer from `reader`.
pub fn read_le<T: LittleEndian, R: Read + ?Sized>(reader: &mut R) -> io::Result<T> {
    let mut bytes = T::Bytes::default();
    reader.read_exact(bytes.as_mut())?;
    Ok(T::decode_le(bytes))
}

/// Writes one integer to `writer` in little-endian order.
pub fn write_le<T: LittleEndian, W: Write + ?Sized>(writer: &mut W, value: T) -> io::Result<()> {
    writer.write_all(value.encode_le().as_ref())
}
