//! Track classification.
//!
//! A track's `type` is a free-form string on the wire. Indexing only cares
//! whether it is audio, video, metadata, or empty, so [`TrackKind`] keeps
//! those apart while preserving any other string verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a media track, as carried in its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackKind {
    /// Audio track (`"audio"`).
    Audio,
    /// Video track (`"video"`).
    Video,
    /// Timed metadata track (`"meta"`).
    Meta,
    /// No type set (`""`).
    #[default]
    None,
    /// Any other type string.
    Other(String),
}

impl TrackKind {
    /// The exact string written to documents and the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Meta => "meta",
            Self::None => "",
            Self::Other(s) => s,
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio)
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video)
    }

    /// Whether this track carries media that must be seekable for a
    /// recording to count as complete.
    pub fn is_media(&self) -> bool {
        !matches!(self, Self::Meta | Self::None)
    }
}

impl From<&str> for TrackKind {
    fn from(s: &str) -> Self {
        match s {
            "audio" => Self::Audio,
            "video" => Self::Video,
            "meta" => Self::Meta,
            "" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TrackKind {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<TrackKind> for String {
    fn from(kind: TrackKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a codec stores Xiph-style identification and comment headers
/// next to its init data.
pub fn has_xiph_headers(codec: &str) -> bool {
    matches!(codec, "vorbis" | "theora")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_kind_round_trip() {
        for s in ["audio", "video", "meta", "", "subtitle"] {
            assert_eq!(TrackKind::from(s).as_str(), s);
        }
        assert_eq!(
            TrackKind::from("subtitle"),
            TrackKind::Other("subtitle".to_string())
        );
    }

    #[test]
    fn test_track_kind_is_media() {
        assert!(TrackKind::Audio.is_media());
        assert!(TrackKind::Video.is_media());
        assert!(TrackKind::Other("text".into()).is_media());
        assert!(!TrackKind::Meta.is_media());
        assert!(!TrackKind::None.is_media());
    }

    #[test]
    fn test_track_kind_serialization() {
        let json = serde_json::to_string(&TrackKind::Video).unwrap();
        assert_eq!(json, r#""video""#);

        let kind: TrackKind = serde_json::from_str(r#""meta""#).unwrap();
        assert_eq!(kind, TrackKind::Meta);
    }

    #[test]
    fn test_xiph_headers() {
        assert!(has_xiph_headers("vorbis"));
        assert!(has_xiph_headers("theora"));
        assert!(!has_xiph_headers("aac"));
        assert!(!has_xiph_headers("H264"));
    }
}
