//! Part record: one payload chunk inside a key.

use super::{decode_u16, decode_u24, decode_u32, encode_u16, encode_u24, encode_u32, take, Record};
use std::fmt;

/// A single payload chunk.
///
/// Layout (9 bytes):
/// - `size`: 24-bit, bytes 0..3
/// - `duration`: 16-bit, bytes 3..5
/// - `offset`: 32-bit, bytes 5..9
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Part([u8; 9]);

impl Record for Part {
    const SIZE: usize = 9;
}

impl Part {
    /// Create a part with all fields set.
    pub fn new(size: u64, duration: u64, offset: u64) -> Self {
        let mut part = Self::default();
        part.set_size(size);
        part.set_duration(duration);
        part.set_offset(offset);
        part
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u32 {
        decode_u24(take(&self.0, 0))
    }

    pub fn set_size(&mut self, size: u64) {
        self.0[0..3].copy_from_slice(&encode_u24(size));
    }

    /// Time until the next part, in milliseconds. Zero until backfilled.
    pub fn duration(&self) -> u16 {
        decode_u16(take(&self.0, 3))
    }

    pub fn set_duration(&mut self, duration: u64) {
        self.0[3..5].copy_from_slice(&encode_u16(duration));
    }

    /// Presentation offset carried by the packet.
    pub fn offset(&self) -> u32 {
        decode_u32(take(&self.0, 5))
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.0[5..9].copy_from_slice(&encode_u32(offset));
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("size", &self.size())
            .field("duration", &self.duration())
            .field("offset", &self.offset())
            .finish()
    }
}
