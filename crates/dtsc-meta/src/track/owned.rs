//! Owning track index and the incremental indexing algorithm.

use super::{TrackIndex, TrackInfo, TrackView};
use crate::document;
use crate::packet::{Packet, Update};
use crate::record::{cast_records, Fragment, Key, Part};
use ciborium::value::Value;
use dtsc_common::{IndexConfig, Result, TrackKind};

/// A track index that owns its records and grows as packets arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Scalar metadata.
    pub info: TrackInfo,
    fragments: Vec<Fragment>,
    keys: Vec<Key>,
    parts: Vec<Part>,
    config: IndexConfig,
}

impl Track {
    /// Create an empty track.
    pub fn new(track_id: u32, kind: impl Into<TrackKind>, codec: impl Into<String>) -> Self {
        Self::from_info(TrackInfo::new(track_id, kind, codec))
    }

    /// Create an empty track from existing metadata.
    pub fn from_info(info: TrackInfo) -> Self {
        Self {
            info,
            ..Default::default()
        }
    }

    /// Use `config` for all further updates.
    pub fn with_config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: IndexConfig) {
        self.config = config;
    }

    /// Build a track by copying everything out of a track document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = document::entries(value)?;
        Ok(Self {
            info: TrackInfo::from_entries(map),
            fragments: cast_records(document::bytes(map, "fragments")).to_vec(),
            keys: cast_records(document::bytes(map, "keys")).to_vec(),
            parts: cast_records(document::bytes(map, "parts")).to_vec(),
            config: IndexConfig::default(),
        })
    }

    /// Index one packet.
    ///
    /// Packets must arrive in non-decreasing time order; an earlier packet is
    /// logged and dropped without touching the track.
    pub fn update(&mut self, packet: &Packet) -> Update {
        let time = packet.time;
        if time < self.info.lastms {
            tracing::warn!(
                track_id = self.info.track_id,
                time,
                lastms = self.info.lastms,
                "Received packet in wrong order; ignoring"
            );
            return Update::Rejected;
        }

        // The previous part lasted until this packet.
        if let Some(prev) = self.parts.last_mut() {
            prev.set_duration(time - self.info.lastms);
        }
        self.parts.push(Part::new(packet.size, 0, packet.offset));
        self.info.lastms = time;

        let opens_key = match self.keys.last() {
            None => true,
            Some(last) => {
                packet.keyframe
                    || (!self.info.kind.is_video()
                        && time
                            .checked_sub(self.config.key_interval_ms)
                            .is_some_and(|t| t > u64::from(last.time())))
            }
        };

        let outcome = if opens_key {
            self.open_key(packet)
        } else {
            Update::Part
        };

        if let Some(key) = self.keys.last_mut() {
            key.set_parts(u64::from(key.parts()) + 1);
        }
        if let Some(fragment) = self.fragments.last_mut() {
            fragment.set_size(u64::from(fragment.size()).saturating_add(packet.size));
        }
        outcome
    }

    fn open_key(&mut self, packet: &Packet) -> Update {
        let time = packet.time;
        let number = match self.keys.last_mut() {
            Some(prev) => {
                prev.set_length(time.saturating_sub(u64::from(prev.time())));
                u64::from(prev.number()) + 1
            }
            None => 1,
        };
        let key = Key::new(time, number, packet.bpos.unwrap_or(0));
        self.keys.push(key);
        self.info.firstms = self.keys.first().map_or(0, |k| u64::from(k.time()));
        tracing::trace!(
            track_id = self.info.track_id,
            number = key.number(),
            time,
            "Opened key"
        );

        let opens_fragment = match self.fragment_start() {
            None => true,
            Some(start) => time
                .checked_sub(self.config.fragment_min_ms)
                .is_some_and(|t| t >= start),
        };

        if !opens_fragment {
            if let Some(fragment) = self.fragments.last_mut() {
                fragment.set_length(u64::from(fragment.length()) + 1);
            }
            return Update::Key;
        }

        if let Some(start) = self.fragment_start() {
            let duration = time.saturating_sub(start);
            let min_duration = self.config.bps_min_duration_ms;
            if let Some(prev) = self.fragments.last_mut() {
                prev.set_duration(duration);
                let duration = u64::from(prev.duration());
                if self.info.bps == 0 && duration > min_duration {
                    self.info.bps = u64::from(prev.size()) * 1000 / duration;
                    tracing::debug!(
                        track_id = self.info.track_id,
                        bps = self.info.bps,
                        "Estimated track bitrate"
                    );
                }
            }
        }

        self.fragments.push(Fragment::new(u64::from(key.number())));
        tracing::debug!(
            track_id = self.info.track_id,
            number = key.number(),
            time,
            "Opened fragment"
        );
        Update::Fragment
    }

    /// Time of the first key of the last fragment, or `None` without
    /// fragments. Only valid while the newest key is not yet counted in the
    /// fragment's length.
    ///
    /// The key is found by position so that 16-bit key numbers may wrap;
    /// the number lookup covers fragments longer than 255 keys. A key that
    /// cannot be found reads as time 0.
    fn fragment_start(&self) -> Option<u64> {
        let fragment = self.fragments.last()?;
        let by_position = self
            .keys
            .len()
            .checked_sub(1 + usize::from(fragment.length()))
            .and_then(|i| self.keys.get(i))
            .filter(|k| k.number() == fragment.number());
        let key = by_position.or_else(|| self.key(fragment.number()));
        Some(key.map_or(0, |k| u64::from(k.time())))
    }

    /// Drop all records and timing, keeping identity and codec metadata.
    pub fn reset(&mut self) {
        self.fragments.clear();
        self.keys.clear();
        self.parts.clear();
        self.info.bps = 0;
        self.info.firstms = 0;
        self.info.lastms = 0;
    }
}

impl TrackIndex for Track {
    fn info(&self) -> &TrackInfo {
        &self.info
    }

    fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    fn keys(&self) -> &[Key] {
        &self.keys
    }

    fn parts(&self) -> &[Part] {
        &self.parts
    }
}

impl From<&TrackView<'_>> for Track {
    fn from(view: &TrackView<'_>) -> Self {
        Self {
            info: view.info.clone(),
            fragments: view.fragments().to_vec(),
            keys: view.keys().to_vec(),
            parts: view.parts().to_vec(),
            config: IndexConfig::default(),
        }
    }
}
