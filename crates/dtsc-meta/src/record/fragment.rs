//! Fragment record: a downloadable group of consecutive keys.

use super::{decode_u16, decode_u32, encode_u16, encode_u32, take, Record};
use std::fmt;

/// A group of consecutive keys served as one unit (e.g. one HLS segment).
///
/// Layout (11 bytes):
/// - `duration`: 32-bit, bytes 0..4
/// - `length`: 8-bit, byte 4
/// - `number`: 16-bit, bytes 5..7
/// - `size`: 32-bit, bytes 7..11
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Fragment([u8; 11]);

impl Record for Fragment {
    const SIZE: usize = 11;
}

impl Fragment {
    /// Create a fragment starting at key `number`, holding that one key.
    pub fn new(number: u64) -> Self {
        let mut fragment = Self::default();
        fragment.set_number(number);
        fragment.set_length(1);
        fragment
    }

    /// Duration in milliseconds. Zero until the next fragment opens.
    pub fn duration(&self) -> u32 {
        decode_u32(take(&self.0, 0))
    }

    pub fn set_duration(&mut self, duration: u64) {
        self.0[0..4].copy_from_slice(&encode_u32(duration));
    }

    /// Number of keys in this fragment.
    pub fn length(&self) -> u8 {
        self.0[4]
    }

    pub fn set_length(&mut self, length: u64) {
        self.0[4] = length as u8;
    }

    /// Number of the first key in this fragment.
    pub fn number(&self) -> u16 {
        decode_u16(take(&self.0, 5))
    }

    pub fn set_number(&mut self, number: u64) {
        self.0[5..7].copy_from_slice(&encode_u16(number));
    }

    /// Accumulated payload bytes.
    pub fn size(&self) -> u32 {
        decode_u32(take(&self.0, 7))
    }

    pub fn set_size(&mut self, size: u64) {
        self.0[7..11].copy_from_slice(&encode_u32(size));
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("duration", &self.duration())
            .field("length", &self.length())
            .field("number", &self.number())
            .field("size", &self.size())
            .finish()
    }
}
