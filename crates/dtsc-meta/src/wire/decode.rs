//! Wire decoding into generic tree documents.

use super::{HEADER_LEN, MAGIC_HEADER, TAG_BYTES, TAG_INT, TAG_OBJECT};
use bytes::Buf;
use ciborium::value::{Integer, Value};
use dtsc_common::{Error, Result};

/// Objects nested deeper than this are rejected.
const MAX_DEPTH: usize = 16;

/// Decode a wire document into a generic tree.
///
/// Integers become [`Value::Integer`] and every byte string (text included)
/// becomes [`Value::Bytes`]; the document readers accept both for strings.
pub fn decode(data: &[u8]) -> Result<Value> {
    let mut buf = data;
    if buf.remaining() < HEADER_LEN {
        return Err(Error::invalid_wire(format!(
            "need {HEADER_LEN} header bytes, have {}",
            buf.remaining()
        )));
    }
    if &buf[..4] != MAGIC_HEADER {
        return Err(Error::invalid_wire("bad magic"));
    }
    buf.advance(4);
    let payload_len = buf.get_u32() as usize;
    if buf.remaining() < payload_len {
        return Err(Error::invalid_wire(format!(
            "payload truncated: need {payload_len} bytes, have {}",
            buf.remaining()
        )));
    }

    let mut payload = &buf[..payload_len];
    if payload.get_u8_checked()? != TAG_OBJECT {
        return Err(Error::invalid_wire("document does not start with an object"));
    }
    let root = read_object(&mut payload, 1)?;
    if payload.has_remaining() {
        return Err(Error::invalid_wire(format!(
            "{} trailing bytes after root object",
            payload.remaining()
        )));
    }
    tracing::debug!(payload_len, "Decoded wire document");
    Ok(root)
}

fn read_object(buf: &mut &[u8], depth: usize) -> Result<Value> {
    if depth > MAX_DEPTH {
        return Err(Error::invalid_wire("objects nested too deeply"));
    }
    let mut entries = Vec::new();
    loop {
        let name_len = usize::from(buf.get_u16_checked()?);
        if name_len == 0 {
            return match buf.get_u8_checked()? {
                0xEE => Ok(Value::Map(entries)),
                other => Err(Error::invalid_wire(format!(
                    "expected object end, found 0x{other:02X}"
                ))),
            };
        }
        let name = String::from_utf8_lossy(buf.take_checked(name_len)?).into_owned();
        let value = match buf.get_u8_checked()? {
            TAG_INT => Value::Integer(Integer::from(buf.get_i64_checked()?)),
            TAG_BYTES => {
                let len = buf.get_u32_checked()? as usize;
                Value::Bytes(buf.take_checked(len)?.to_vec())
            }
            TAG_OBJECT => read_object(buf, depth + 1)?,
            other => {
                return Err(Error::invalid_wire(format!(
                    "unknown type tag 0x{other:02X} for field {name}"
                )))
            }
        };
        entries.push((Value::Text(name), value));
    }
}

/// Bounds-checked reads over a byte slice.
trait CheckedBuf<'a> {
    fn take_checked(&mut self, len: usize) -> Result<&'a [u8]>;
    fn get_u8_checked(&mut self) -> Result<u8>;
    fn get_u16_checked(&mut self) -> Result<u16>;
    fn get_u32_checked(&mut self) -> Result<u32>;
    fn get_i64_checked(&mut self) -> Result<i64>;
}

impl<'a> CheckedBuf<'a> for &'a [u8] {
    fn take_checked(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.len() < len {
            return Err(Error::invalid_wire(format!(
                "truncated: need {len} bytes, have {}",
                self.len()
            )));
        }
        let (head, tail) = self.split_at(len);
        *self = tail;
        Ok(head)
    }

    fn get_u8_checked(&mut self) -> Result<u8> {
        let bytes = self.take_checked(1)?;
        Ok(bytes[0])
    }

    fn get_u16_checked(&mut self) -> Result<u16> {
        let mut bytes = self.take_checked(2)?;
        Ok(bytes.get_u16())
    }

    fn get_u32_checked(&mut self) -> Result<u32> {
        let mut bytes = self.take_checked(4)?;
        Ok(bytes.get_u32())
    }

    fn get_i64_checked(&mut self) -> Result<i64> {
        let mut bytes = self.take_checked(8)?;
        Ok(bytes.get_i64())
    }
}
