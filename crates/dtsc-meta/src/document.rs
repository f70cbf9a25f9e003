//! Generic tree documents.
//!
//! Tracks and metas are stored and passed between processes as
//! [`ciborium::Value`] maps with text keys. Record sequences are kept as
//! byte strings of packed records, which lets [`TrackView`](crate::TrackView)
//! borrow them in place.
//!
//! Readers are lenient: a missing field reads as zero or empty, and string
//! fields accept either text or byte strings so that trees decoded from the
//! wire (which has no text type) load the same way.

use ciborium::value::{Integer, Value};
use dtsc_common::{Error, Result};

/// Borrow the entries of a map value.
pub(crate) fn entries(value: &Value) -> Result<&[(Value, Value)]> {
    value
        .as_map()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::invalid_document("expected a map"))
}

/// Look up a field by name.
pub(crate) fn field<'a>(map: &'a [(Value, Value)], name: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.as_text() == Some(name))
        .map(|(_, v)| v)
}

fn as_i128(value: &Value) -> Option<i128> {
    match value {
        Value::Integer(i) => Some(i128::from(*i)),
        Value::Bool(b) => Some(i128::from(*b)),
        Value::Float(f) => Some(*f as i128),
        _ => None,
    }
}

/// Read an unsigned integer field. Missing, negative, or oversized values read as 0.
pub(crate) fn uint<T: TryFrom<i128> + Default>(map: &[(Value, Value)], name: &str) -> T {
    field(map, name)
        .and_then(as_i128)
        .and_then(|v| T::try_from(v).ok())
        .unwrap_or_default()
}

/// Whether a field is present and truthy.
pub(crate) fn flag(map: &[(Value, Value)], name: &str) -> bool {
    match field(map, name) {
        Some(Value::Text(s)) => !s.is_empty(),
        Some(Value::Bytes(b)) => !b.is_empty(),
        Some(Value::Null) | None => false,
        Some(v) => as_i128(v).is_some_and(|i| i != 0),
    }
}

/// Borrow a byte string field, accepting text as well.
pub(crate) fn bytes<'a>(map: &'a [(Value, Value)], name: &str) -> &'a [u8] {
    match field(map, name) {
        Some(Value::Bytes(b)) => b,
        Some(Value::Text(s)) => s.as_bytes(),
        _ => &[],
    }
}

/// Read a text field, accepting byte strings as well.
pub(crate) fn text(map: &[(Value, Value)], name: &str) -> String {
    String::from_utf8_lossy(bytes(map, name)).into_owned()
}

/// Map entry helpers used by the writers.
pub(crate) fn int_entry(name: &str, value: u64) -> (Value, Value) {
    (Value::Text(name.into()), Value::Integer(Integer::from(value)))
}

pub(crate) fn bytes_entry(name: &str, value: &[u8]) -> (Value, Value) {
    (Value::Text(name.into()), Value::Bytes(value.to_vec()))
}

pub(crate) fn text_entry(name: &str, value: &str) -> (Value, Value) {
    (Value::Text(name.into()), Value::Text(value.into()))
}

/// Encode a document as CBOR.
pub fn to_cbor(value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(value, &mut out).map_err(|e| Error::encode(e.to_string()))?;
    Ok(out)
}

/// Decode a CBOR document.
pub fn from_cbor(data: &[u8]) -> Result<Value> {
    ciborium::de::from_reader(data).map_err(|e| Error::invalid_document(e.to_string()))
}
