//! Read-only meta borrowing a document.

use super::{track_entries, MetaIndex, StreamFlags};
use crate::document;
use crate::track::TrackView;
use ciborium::value::Value;
use dtsc_common::Result;
use std::collections::BTreeMap;

/// A meta whose tracks borrow their records from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaView<'a> {
    pub flags: StreamFlags,
    tracks: BTreeMap<u32, TrackView<'a>>,
}

impl<'a> MetaView<'a> {
    /// Borrow a meta document.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        let map = document::entries(value)?;
        let mut tracks = BTreeMap::new();
        for (id, track) in track_entries(map) {
            tracks.insert(id, TrackView::from_value(track)?);
        }
        Ok(Self {
            flags: StreamFlags::from_entries(map),
            tracks,
        })
    }
}

impl<'a> MetaIndex for MetaView<'a> {
    type Track = TrackView<'a>;

    fn flags(&self) -> &StreamFlags {
        &self.flags
    }

    fn tracks(&self) -> &BTreeMap<u32, TrackView<'a>> {
        &self.tracks
    }
}
