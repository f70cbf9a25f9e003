//! Read-only track index borrowing a document's record bytes.

use super::{TrackIndex, TrackInfo};
use crate::document;
use crate::record::{cast_records, Fragment, Key, Part};
use ciborium::value::Value;
use dtsc_common::Result;

/// A track index whose record sequences alias byte strings owned by a
/// document. The view cannot outlive the document it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackView<'a> {
    /// Scalar metadata (copied; it is small).
    pub info: TrackInfo,
    fragments: &'a [Fragment],
    keys: &'a [Key],
    parts: &'a [Part],
}

impl<'a> TrackView<'a> {
    /// Borrow a track document.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        let map = document::entries(value)?;
        Ok(Self {
            info: TrackInfo::from_entries(map),
            fragments: cast_records(document::bytes(map, "fragments")),
            keys: cast_records(document::bytes(map, "keys")),
            parts: cast_records(document::bytes(map, "parts")),
        })
    }
}

impl TrackIndex for TrackView<'_> {
    fn info(&self) -> &TrackInfo {
        &self.info
    }

    fn fragments(&self) -> &[Fragment] {
        self.fragments
    }

    fn keys(&self) -> &[Key] {
        self.keys
    }

    fn parts(&self) -> &[Part] {
        self.parts
    }
}
