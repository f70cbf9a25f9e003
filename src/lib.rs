//! Dtsc - track indexes for DTSC media streams
//!
//! This crate re-exports the workspace libraries:
//!
//! - [`common`]: errors, track kinds and indexing configuration
//! - [`meta`]: records, tracks, the stream meta and its serialized forms
//!
//! The most used types are also available at the crate root and through
//! [`prelude`].

pub use dtsc_common as common;
pub use dtsc_meta as meta;

pub use dtsc_common::{Error, IndexConfig, Result, TrackKind};
pub use dtsc_meta::{
    Fragment, Key, Meta, MetaIndex, MetaView, Packet, Part, Record, StreamFlags, Track,
    TrackIndex, TrackInfo, TrackView, Update,
};

/// Glob-importable set of the types and traits needed to index and
/// serialize a stream.
pub mod prelude {
    pub use dtsc_common::{IndexConfig, TrackKind};
    pub use dtsc_meta::{Meta, MetaIndex, MetaView, Packet, Track, TrackIndex, TrackView, Update};
}
