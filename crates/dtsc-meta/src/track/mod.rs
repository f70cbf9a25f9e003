//! Per-track index.
//!
//! A track index is three record sequences (fragments, keys, parts) plus the
//! scalar metadata in [`TrackInfo`]. It comes in two storage flavours:
//!
//! - [`Track`] owns its records and grows them through [`Track::update`]
//! - [`TrackView`] borrows packed records straight out of a document
//!
//! Both implement [`TrackIndex`], so lookups, serialization, and wire
//! sizing are written once against record slices.

mod owned;
mod view;

pub use owned::Track;
pub use view::TrackView;

use crate::document;
use crate::record::{pack_records, Fragment, Key, Part};
use ciborium::value::Value;
use dtsc_common::{has_xiph_headers, TrackKind};

/// Scalar metadata describing a track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    pub track_id: u32,
    /// Time of the first key, in milliseconds.
    pub firstms: u64,
    /// Time of the most recent packet, in milliseconds.
    pub lastms: u64,
    /// Estimated bitrate in bytes per second; 0 until estimated.
    pub bps: u64,
    /// Fragments that were never received.
    pub missed_frags: u64,
    pub codec: String,
    pub kind: TrackKind,
    /// Codec initialization data.
    pub init: Vec<u8>,
    /// Audio sample rate.
    pub rate: u32,
    /// Audio sample size in bits.
    pub size: u32,
    pub channels: u32,
    pub width: u32,
    pub height: u32,
    /// Frames per kilosecond (fps * 1000).
    pub fpks: u32,
    /// Vorbis/Theora identification header.
    pub id_header: Vec<u8>,
    /// Vorbis/Theora comment header.
    pub comment_header: Vec<u8>,
}

impl TrackInfo {
    /// Create metadata for a track with the given id, kind, and codec.
    pub fn new(track_id: u32, kind: impl Into<TrackKind>, codec: impl Into<String>) -> Self {
        Self {
            track_id,
            kind: kind.into(),
            codec: codec.into(),
            ..Default::default()
        }
    }

    /// Frames per second.
    pub fn fps(&self) -> f64 {
        f64::from(self.fpks) / 1000.0
    }

    /// Human-readable identifier, e.g. `audio_aac_2ch_48000hz`.
    pub fn identifier(&self) -> String {
        match &self.kind {
            TrackKind::None => format!("metadata_{}", self.track_id),
            TrackKind::Audio => format!(
                "audio_{}_{}ch_{}hz",
                self.codec, self.channels, self.rate
            ),
            TrackKind::Video => format!(
                "video_{}_{}x{}_{}fps",
                self.codec,
                self.width,
                self.height,
                format_fps(self.fps())
            ),
            kind => format!("{}_{}_", kind, self.codec),
        }
    }

    /// Identifier made unique by the track id; used as the key in the
    /// `tracks` map of documents and wire output.
    pub fn writable_identifier(&self) -> String {
        format!("{}_{}", self.identifier(), self.track_id)
    }

    /// Load scalar fields from a track document map.
    ///
    /// Type- and codec-specific fields are only read when they apply.
    pub(crate) fn from_entries(map: &[(Value, Value)]) -> Self {
        let mut info = Self {
            track_id: document::uint(map, "trackid"),
            firstms: document::uint(map, "firstms"),
            lastms: document::uint(map, "lastms"),
            bps: document::uint(map, "bps"),
            missed_frags: document::uint(map, "missed_frags"),
            codec: document::text(map, "codec"),
            kind: TrackKind::from(document::text(map, "type")),
            init: document::bytes(map, "init").to_vec(),
            ..Default::default()
        };
        if info.kind.is_audio() {
            info.rate = document::uint(map, "rate");
            info.size = document::uint(map, "size");
            info.channels = document::uint(map, "channels");
        }
        if info.kind.is_video() {
            info.width = document::uint(map, "width");
            info.height = document::uint(map, "height");
            info.fpks = document::uint(map, "fpks");
        }
        if has_xiph_headers(&info.codec) {
            info.id_header = document::bytes(map, "idheader").to_vec();
            info.comment_header = document::bytes(map, "commentheader").to_vec();
        }
        info
    }
}

/// Format `fps` with six significant digits and no trailing zeros
/// (`%g` style), e.g. `25`, `23.976`, `1234.57` or `4.29497e+06`.
fn format_fps(fps: f64) -> String {
    fn trim(digits: &str) -> &str {
        if digits.contains('.') {
            digits.trim_end_matches('0').trim_end_matches('.')
        } else {
            digits
        }
    }

    let sci = format!("{fps:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..6).contains(&exp) {
        let precision = usize::try_from(5 - exp).unwrap_or(0);
        trim(&format!("{fps:.precision$}")).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim(mantissa), exp.abs())
    }
}

/// Read access shared by owning and borrowed track indexes.
pub trait TrackIndex {
    fn info(&self) -> &TrackInfo;
    fn fragments(&self) -> &[Fragment];
    fn keys(&self) -> &[Key];
    fn parts(&self) -> &[Part];

    /// Look up a key by its number.
    ///
    /// Returns `None` when `number` falls outside
    /// `first..first + keys().len()`. Key numbers are 16-bit, so on tracks
    /// with more than 65535 keys the numbers wrap and later keys cannot be
    /// found by number.
    fn key(&self, number: u16) -> Option<&Key> {
        let first = self.keys().first()?.number();
        let index = number.checked_sub(first)?;
        self.keys().get(usize::from(index))
    }

    /// The last key starting at or before `ms`.
    fn key_for_time(&self, ms: u64) -> Option<&Key> {
        let keys = self.keys();
        let idx = keys.partition_point(|k| u64::from(k.time()) <= ms);
        idx.checked_sub(1).and_then(|i| keys.get(i))
    }

    /// The fragment whose first key is the last one starting at or before `ms`.
    fn fragment_for_time(&self, ms: u64) -> Option<&Fragment> {
        let fragments = self.fragments();
        let idx = fragments.partition_point(|f| {
            self.key(f.number())
                .is_some_and(|k| u64::from(k.time()) <= ms)
        });
        idx.checked_sub(1).and_then(|i| fragments.get(i))
    }

    fn identifier(&self) -> String {
        self.info().identifier()
    }

    fn writable_identifier(&self) -> String {
        self.info().writable_identifier()
    }

    /// Number of bytes this track contributes to a wire document.
    fn send_len(&self) -> usize {
        crate::wire::track_len(self)
    }

    /// Build the generic tree document for this track.
    fn to_value(&self) -> Value {
        let info = self.info();
        let mut map = vec![
            document::bytes_entry("fragments", pack_records(self.fragments())),
            document::bytes_entry("keys", pack_records(self.keys())),
            document::bytes_entry("parts", pack_records(self.parts())),
            document::int_entry("trackid", u64::from(info.track_id)),
            document::int_entry("firstms", info.firstms),
            document::int_entry("lastms", info.lastms),
            document::int_entry("bps", info.bps),
        ];
        if info.missed_frags != 0 {
            map.push(document::int_entry("missed_frags", info.missed_frags));
        }
        map.push(document::text_entry("codec", &info.codec));
        map.push(document::text_entry("type", info.kind.as_str()));
        map.push(document::bytes_entry("init", &info.init));
        if info.kind.is_audio() {
            map.push(document::int_entry("rate", u64::from(info.rate)));
            map.push(document::int_entry("size", u64::from(info.size)));
            map.push(document::int_entry("channels", u64::from(info.channels)));
        } else if info.kind.is_video() {
            map.push(document::int_entry("width", u64::from(info.width)));
            map.push(document::int_entry("height", u64::from(info.height)));
            map.push(document::int_entry("fpks", u64::from(info.fpks)));
        }
        if has_xiph_headers(&info.codec) {
            map.push(document::bytes_entry("idheader", &info.id_header));
            map.push(document::bytes_entry("commentheader", &info.comment_header));
        }
        Value::Map(map)
    }
}
