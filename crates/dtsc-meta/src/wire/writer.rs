//! Streaming writer for the wire grammar.

use super::{MAGIC_HEADER, OBJECT_END, TAG_BYTES, TAG_INT, TAG_OBJECT};
use dtsc_common::{Error, Result};
use std::io::Write;

/// Writes wire tokens straight to a sink, tracking how much was written.
pub struct WireWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> WireWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    /// Write the magic and the payload length that follows it.
    pub fn header(&mut self, payload_len: usize) -> Result<()> {
        let len = u32::try_from(payload_len)
            .map_err(|_| Error::encode(format!("payload of {payload_len} bytes is too large")))?;
        self.put(MAGIC_HEADER)?;
        self.put(&len.to_be_bytes())
    }

    /// Open an anonymous object (the document root).
    pub fn begin_object(&mut self) -> Result<()> {
        self.put(&[TAG_OBJECT])
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.put(&OBJECT_END)
    }

    fn name(&mut self, name: &str, tag: u8) -> Result<()> {
        let len = u16::try_from(name.len())
            .map_err(|_| Error::encode(format!("field name of {} bytes is too long", name.len())))?;
        self.put(&len.to_be_bytes())?;
        self.put(name.as_bytes())?;
        self.put(&[tag])
    }

    /// Open a named nested object. Close it with [`end_object`](Self::end_object).
    pub fn object(&mut self, name: &str) -> Result<()> {
        self.name(name, TAG_OBJECT)
    }

    pub fn int(&mut self, name: &str, value: i64) -> Result<()> {
        self.name(name, TAG_INT)?;
        self.put(&value.to_be_bytes())
    }

    /// Integer field from an unsigned value; values past `i64::MAX` wrap.
    pub fn uint(&mut self, name: &str, value: u64) -> Result<()> {
        self.int(name, value as i64)
    }

    pub fn bytes(&mut self, name: &str, value: &[u8]) -> Result<()> {
        let len = u32::try_from(value.len())
            .map_err(|_| Error::encode(format!("field {name} of {} bytes is too large", value.len())))?;
        self.name(name, TAG_BYTES)?;
        self.put(&len.to_be_bytes())?;
        self.put(value)
    }
}
