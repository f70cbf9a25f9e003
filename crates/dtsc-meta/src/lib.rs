//! Dtsc-Meta: track indexes for DTSC media streams
//!
//! This crate keeps a compact, seekable index of every track in a stream and
//! serializes it for storage or transmission.
//!
//! # Modules
//!
//! - `record` - Packed big-endian Part, Key and Fragment records
//! - `track` - Per-track metadata and the incremental indexer
//! - `meta` - The stream-level aggregate of tracks and flags
//! - `wire` - Length-prefixed binary tree encoding (`DTSC` header)
//! - `document` - Generic tree documents and their CBOR form
//!
//! # Architecture
//!
//! Packets arrive in timestamp order per track. Each packet becomes a Part;
//! keyframes (or, on audio, time gaps) open Keys; Keys are grouped into
//! Fragments once enough time has passed. The records are plain byte arrays,
//! so a track read back from a document can borrow its record tables
//! directly from the document's byte strings.
//!
//! ```
//! use dtsc_meta::{Meta, MetaIndex, Packet, Track, TrackIndex};
//!
//! let mut meta = Meta::new();
//! meta.insert_track(Track::new(1, "video", "H264"));
//! meta.update(&Packet::new(1, 0, 4000).keyframe().bpos(0));
//! meta.update(&Packet::new(1, 40, 900).bpos(4000));
//!
//! let track = meta.track(1).unwrap();
//! assert_eq!(track.keys().len(), 1);
//! assert_eq!(track.parts().len(), 2);
//!
//! let wire = meta.to_wire().unwrap();
//! assert_eq!(&wire[..4], b"DTSC");
//! assert_eq!(Meta::from_wire(&wire).unwrap(), meta);
//! ```

pub mod document;
pub mod meta;
pub mod packet;
pub mod record;
pub mod track;
pub mod wire;

pub use dtsc_common::{Error, IndexConfig, Result, TrackKind};
pub use meta::{Meta, MetaIndex, MetaView, StreamFlags};
pub use packet::{Packet, Update};
pub use record::{Fragment, Key, Part, Record};
pub use track::{Track, TrackIndex, TrackInfo, TrackView};
