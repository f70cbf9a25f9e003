//! Fixed-width binary records.
//!
//! Every record is a `#[repr(transparent)]` wrapper around a byte array, so a
//! packed byte string can be viewed as a record slice without copying and a
//! record slice can be written out as-is.
//!
//! Fields are big-endian and may be narrower than a standard integer:
//! - writes mask the value to the field width (no overflow signalling)
//! - reads zero-extend

mod fragment;
mod key;
mod part;

pub use fragment::Fragment;
pub use key::Key;
pub use part::Part;

/// A fixed-size record that can be reinterpreted from packed bytes.
pub trait Record: bytemuck::Pod {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Raw record bytes, exactly as they appear on the wire.
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// View packed bytes as a record slice.
///
/// Trailing bytes that do not form a whole record are ignored.
pub fn cast_records<R: Record>(bytes: &[u8]) -> &[R] {
    let whole = bytes.len() - bytes.len() % R::SIZE;
    bytemuck::try_cast_slice(&bytes[..whole]).unwrap_or(&[])
}

/// View a record slice as packed bytes.
pub fn pack_records<R: Record>(records: &[R]) -> &[u8] {
    bytemuck::cast_slice(records)
}

/// Copy `N` bytes starting at `at` into a fixed array.
#[inline]
fn take<const N: usize>(data: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&data[at..at + N]);
    out
}

#[inline]
pub(crate) fn decode_u16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

#[inline]
pub(crate) fn encode_u16(value: u64) -> [u8; 2] {
    (value as u16).to_be_bytes()
}

#[inline]
pub(crate) fn decode_u24([a, b, c]: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, a, b, c])
}

#[inline]
pub(crate) fn encode_u24(value: u64) -> [u8; 3] {
    let [_, a, b, c] = (value as u32).to_be_bytes();
    [a, b, c]
}

#[inline]
pub(crate) fn decode_u32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

#[inline]
pub(crate) fn encode_u32(value: u64) -> [u8; 4] {
    (value as u32).to_be_bytes()
}

#[inline]
pub(crate) fn decode_u40([a, b, c, d, e]: [u8; 5]) -> u64 {
    u64::from_be_bytes([0, 0, 0, a, b, c, d, e])
}

#[inline]
pub(crate) fn encode_u40(value: u64) -> [u8; 5] {
    let [_, _, _, a, b, c, d, e] = value.to_be_bytes();
    [a, b, c, d, e]
}
