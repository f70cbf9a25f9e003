//! Stream-level aggregate of track indexes.

mod view;

pub use view::MetaView;

use crate::document;
use crate::packet::{Packet, Update};
use crate::track::{Track, TrackIndex};
use crate::wire::{self, WireWriter};
use bytes::{BufMut, Bytes, BytesMut};
use ciborium::value::Value;
use dtsc_common::{IndexConfig, Result};
use std::collections::BTreeMap;
use std::io::Write;

/// Stream-level flags carried next to the tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamFlags {
    /// The most recent packet carried a byte position (on-demand).
    pub vod: bool,
    /// The most recent packet had no byte position.
    pub live: bool,
    /// Tracks were merged from several sources.
    pub merged: bool,
    /// Milliseconds of live history kept; 0 when unset.
    pub buffer_window: u64,
    /// Bytes of additional header material stored elsewhere.
    pub moreheader: u64,
}

impl StreamFlags {
    fn from_entries(map: &[(Value, Value)]) -> Self {
        Self {
            vod: document::flag(map, "vod"),
            live: document::flag(map, "live"),
            merged: document::flag(map, "merged"),
            buffer_window: document::uint(map, "buffer_window"),
            moreheader: document::uint(map, "moreheader"),
        }
    }
}

/// Read access shared by owning and borrowed metas.
pub trait MetaIndex {
    type Track: TrackIndex;

    fn flags(&self) -> &StreamFlags;

    /// Tracks keyed by track id.
    fn tracks(&self) -> &BTreeMap<u32, Self::Track>;

    /// Whether this is a complete, seekable recording.
    ///
    /// Every media track (anything but `meta` or untyped) needs at least
    /// one key, and its last key must have a byte position.
    fn is_fixed(&self) -> bool {
        self.tracks()
            .values()
            .filter(|t| t.info().kind.is_media())
            .all(|t| t.keys().last().is_some_and(|k| k.bpos() != 0))
    }

    /// Payload length of the wire document, excluding its 8-byte header.
    fn send_len(&self) -> usize {
        wire::meta_len(self)
    }

    /// Stream the wire document into `sink`.
    fn write_wire<W: Write>(&self, sink: W) -> Result<()> {
        let mut w = WireWriter::new(sink);
        wire::write_meta(&mut w, self)
    }

    /// Encode the wire document into a buffer.
    fn to_wire(&self) -> Result<Bytes> {
        let mut out = BytesMut::with_capacity(wire::HEADER_LEN + self.send_len()).writer();
        self.write_wire(&mut out)?;
        Ok(out.into_inner().freeze())
    }

    /// Build the generic tree document.
    fn to_value(&self) -> Value {
        let flags = self.flags();
        let tracks = self
            .tracks()
            .values()
            .map(|t| (Value::Text(t.writable_identifier()), t.to_value()))
            .collect();
        let mut map = vec![(Value::Text("tracks".into()), Value::Map(tracks))];
        if flags.vod {
            map.push(document::int_entry("vod", 1));
        }
        if flags.live {
            map.push(document::int_entry("live", 1));
        }
        if flags.merged {
            map.push(document::int_entry("merged", 1));
        }
        if flags.buffer_window != 0 {
            map.push(document::int_entry("buffer_window", flags.buffer_window));
        }
        map.push(document::int_entry("moreheader", flags.moreheader));
        Value::Map(map)
    }

    /// Encode the generic tree document as CBOR.
    fn to_cbor(&self) -> Result<Vec<u8>> {
        document::to_cbor(&self.to_value())
    }
}

/// Track documents in a meta document that carry a non-zero track id.
fn track_entries(map: &[(Value, Value)]) -> impl Iterator<Item = (u32, &Value)> {
    document::field(map, "tracks")
        .and_then(Value::as_map)
        .into_iter()
        .flatten()
        .filter_map(|(_, track)| {
            let id: u32 = document::uint(track.as_map()?, "trackid");
            (id != 0).then_some((id, track))
        })
}

/// An owning meta that indexes incoming packets per track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub flags: StreamFlags,
    tracks: BTreeMap<u32, Track>,
    config: IndexConfig,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `config` to every current track and to tracks inserted later
    /// without a config of their own.
    pub fn with_config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        for track in self.tracks.values_mut() {
            track.set_config(config);
        }
        self
    }

    /// Build a meta by copying everything out of a meta document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = document::entries(value)?;
        let mut tracks = BTreeMap::new();
        for (id, track) in track_entries(map) {
            tracks.insert(id, Track::from_value(track)?);
        }
        Ok(Self {
            flags: StreamFlags::from_entries(map),
            tracks,
            config: IndexConfig::default(),
        })
    }

    /// Decode a meta from a CBOR document.
    pub fn from_cbor(data: &[u8]) -> Result<Self> {
        Self::from_value(&document::from_cbor(data)?)
    }

    /// Decode a meta from a wire document.
    pub fn from_wire(data: &[u8]) -> Result<Self> {
        Self::from_value(&wire::decode(data)?)
    }

    /// Add a track, replacing any track with the same id.
    ///
    /// Tracks with id 0 cannot receive packets and are ignored. A track still
    /// on the default config picks up this meta's config; one given its own
    /// config through [`Track::with_config`] keeps it.
    pub fn insert_track(&mut self, track: Track) -> Option<Track> {
        let id = track.info.track_id;
        if id == 0 {
            return None;
        }
        tracing::debug!(track_id = id, kind = %track.info.kind, "Added track");
        let track = if *track.config() == IndexConfig::default() {
            track.with_config(self.config)
        } else {
            track
        };
        self.tracks.insert(id, track)
    }

    pub fn remove_track(&mut self, track_id: u32) -> Option<Track> {
        self.tracks.remove(&track_id)
    }

    pub fn track(&self, track_id: u32) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    pub fn track_mut(&mut self, track_id: u32) -> Option<&mut Track> {
        self.tracks.get_mut(&track_id)
    }

    /// Route a packet to its track.
    ///
    /// `vod`/`live` always follow the latest packet, whether or not it is
    /// routed. Packets for unknown tracks (or track 0) return `None`.
    pub fn update(&mut self, packet: &Packet) -> Option<Update> {
        self.flags.vod = packet.bpos.is_some();
        self.flags.live = !self.flags.vod;
        if packet.track_id == 0 {
            return None;
        }
        self.tracks
            .get_mut(&packet.track_id)
            .map(|track| track.update(packet))
    }

    /// Reset every track, keeping their identity.
    pub fn reset(&mut self) {
        for track in self.tracks.values_mut() {
            track.reset();
        }
    }
}

impl MetaIndex for Meta {
    type Track = Track;

    fn flags(&self) -> &StreamFlags {
        &self.flags
    }

    fn tracks(&self) -> &BTreeMap<u32, Track> {
        &self.tracks
    }
}

impl From<&MetaView<'_>> for Meta {
    fn from(view: &MetaView<'_>) -> Self {
        Self {
            flags: view.flags,
            tracks: view
                .tracks()
                .iter()
                .map(|(id, t)| (*id, Track::from(t)))
                .collect(),
            config: IndexConfig::default(),
        }
    }
}
