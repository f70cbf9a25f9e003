//! DTSC binary tree wire format.
//!
//! ```text
//! document := "DTSC" u32(payload_len) object
//! object   := 0xE0 field* 0x00 0x00 0xEE
//! field    := u16(name_len) name tag value
//! tag      := 0x01 -> i64                (8 bytes)
//!           | 0x02 -> u32(len) bytes     (text and packed records)
//!           | 0xE0 -> field* 0x00 0x00 0xEE
//! ```
//!
//! All integers are big-endian. The payload length is known before any
//! bytes are written (see [`track_len`] and [`meta_len`]), because sinks
//! cannot seek back to patch it in.

mod decode;
mod encode;
mod writer;

pub use decode::decode;
pub use encode::{meta_len, track_len, write_meta, write_track};
pub use writer::WireWriter;

/// Magic bytes opening every wire document.
pub const MAGIC_HEADER: &[u8; 4] = b"DTSC";

/// Size of the magic plus the payload length prefix.
pub const HEADER_LEN: usize = 8;

/// Tag for an 8-byte signed integer value.
pub const TAG_INT: u8 = 0x01;

/// Tag for a length-prefixed byte string value.
pub const TAG_BYTES: u8 = 0x02;

/// Tag that opens an object.
pub const TAG_OBJECT: u8 = 0xE0;

/// Marker closing an object: an empty field name followed by `0xEE`.
pub const OBJECT_END: [u8; 3] = [0x00, 0x00, 0xEE];

/// Encoded size of an integer field.
pub const fn int_field_len(name: &str) -> usize {
    2 + name.len() + 1 + 8
}

/// Encoded size of a byte string field holding `len` bytes.
pub const fn bytes_field_len(name: &str, len: usize) -> usize {
    2 + name.len() + 1 + 4 + len
}

/// Encoded size of a nested object's name and opening tag.
pub const fn object_field_len(name: &str) -> usize {
    2 + name.len() + 1
}
