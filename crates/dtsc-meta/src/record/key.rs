//! Key record: a keyframe-aligned seek point.

use super::{
    decode_u16, decode_u24, decode_u32, decode_u40, encode_u16, encode_u24, encode_u32, encode_u40,
    take, Record,
};
use std::fmt;

/// A keyframe-aligned seek point grouping consecutive parts.
///
/// Layout (16 bytes):
/// - `bpos`: 40-bit, bytes 0..5
/// - `length`: 24-bit, bytes 5..8
/// - `number`: 16-bit, bytes 8..10
/// - `parts`: 16-bit, bytes 10..12
/// - `time`: 32-bit, bytes 12..16
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Key([u8; 16]);

impl Record for Key {
    const SIZE: usize = 16;
}

impl Key {
    /// Create a key at `time` with no parts and no length yet.
    pub fn new(time: u64, number: u64, bpos: u64) -> Self {
        let mut key = Self::default();
        key.set_time(time);
        key.set_number(number);
        key.set_bpos(bpos);
        key
    }

    /// Byte position in the storage container; 0 when unknown (live).
    pub fn bpos(&self) -> u64 {
        decode_u40(take(&self.0, 0))
    }

    pub fn set_bpos(&mut self, bpos: u64) {
        self.0[0..5].copy_from_slice(&encode_u40(bpos));
    }

    /// Duration covered by this key, in milliseconds.
    pub fn length(&self) -> u32 {
        decode_u24(take(&self.0, 5))
    }

    pub fn set_length(&mut self, length: u64) {
        self.0[5..8].copy_from_slice(&encode_u24(length));
    }

    pub fn number(&self) -> u16 {
        decode_u16(take(&self.0, 8))
    }

    pub fn set_number(&mut self, number: u64) {
        self.0[8..10].copy_from_slice(&encode_u16(number));
    }

    /// Number of parts belonging to this key.
    pub fn parts(&self) -> u16 {
        decode_u16(take(&self.0, 10))
    }

    pub fn set_parts(&mut self, parts: u64) {
        self.0[10..12].copy_from_slice(&encode_u16(parts));
    }

    /// Timestamp in milliseconds.
    pub fn time(&self) -> u32 {
        decode_u32(take(&self.0, 12))
    }

    pub fn set_time(&mut self, time: u64) {
        self.0[12..16].copy_from_slice(&encode_u32(time));
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("bpos", &self.bpos())
            .field("length", &self.length())
            .field("number", &self.number())
            .field("parts", &self.parts())
            .field("time", &self.time())
            .finish()
    }
}
