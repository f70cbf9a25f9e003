//! Wire encoding of tracks and metas.
//!
//! Field order and the conditional fields must stay in step between the
//! `*_len` functions and the writers: the length prefix is emitted first and
//! never corrected afterwards.

use super::{
    bytes_field_len, int_field_len, object_field_len, WireWriter, HEADER_LEN, OBJECT_END,
};
use crate::meta::MetaIndex;
use crate::record::{pack_records, Fragment, Key, Part, Record};
use crate::track::TrackIndex;
use dtsc_common::{has_xiph_headers, Result};
use std::io::Write;

/// Bytes a track object occupies inside the root `tracks` object, including
/// its name.
pub fn track_len<T: TrackIndex + ?Sized>(track: &T) -> usize {
    let info = track.info();
    let mut len = object_field_len(&track.writable_identifier())
        + bytes_field_len("fragments", track.fragments().len() * Fragment::SIZE)
        + bytes_field_len("keys", track.keys().len() * Key::SIZE)
        + bytes_field_len("parts", track.parts().len() * Part::SIZE)
        + int_field_len("trackid")
        + int_field_len("firstms")
        + int_field_len("lastms")
        + int_field_len("bps")
        + bytes_field_len("init", info.init.len())
        + bytes_field_len("codec", info.codec.len())
        + bytes_field_len("type", info.kind.as_str().len())
        + OBJECT_END.len();
    if info.missed_frags != 0 {
        len += int_field_len("missed_frags");
    }
    if info.kind.is_audio() {
        len += int_field_len("rate") + int_field_len("size") + int_field_len("channels");
    } else if info.kind.is_video() {
        len += int_field_len("width") + int_field_len("height") + int_field_len("fpks");
    }
    if has_xiph_headers(&info.codec) {
        len += bytes_field_len("idheader", info.id_header.len())
            + bytes_field_len("commentheader", info.comment_header.len());
    }
    len
}

/// Write one named track object.
pub fn write_track<T, W>(w: &mut WireWriter<W>, track: &T) -> Result<()>
where
    T: TrackIndex + ?Sized,
    W: Write,
{
    let info = track.info();
    w.object(&track.writable_identifier())?;
    w.bytes("fragments", pack_records(track.fragments()))?;
    w.bytes("keys", pack_records(track.keys()))?;
    w.bytes("parts", pack_records(track.parts()))?;
    w.uint("trackid", u64::from(info.track_id))?;
    if info.missed_frags != 0 {
        w.uint("missed_frags", info.missed_frags)?;
    }
    w.uint("firstms", info.firstms)?;
    w.uint("lastms", info.lastms)?;
    w.uint("bps", info.bps)?;
    w.bytes("init", &info.init)?;
    w.bytes("codec", info.codec.as_bytes())?;
    w.bytes("type", info.kind.as_str().as_bytes())?;
    if info.kind.is_audio() {
        w.uint("rate", u64::from(info.rate))?;
        w.uint("size", u64::from(info.size))?;
        w.uint("channels", u64::from(info.channels))?;
    } else if info.kind.is_video() {
        w.uint("width", u64::from(info.width))?;
        w.uint("height", u64::from(info.height))?;
        w.uint("fpks", u64::from(info.fpks))?;
    }
    if has_xiph_headers(&info.codec) {
        w.bytes("idheader", &info.id_header)?;
        w.bytes("commentheader", &info.comment_header)?;
    }
    w.end_object()
}

/// Payload length of a meta document, excluding the 8-byte header.
pub fn meta_len<M: MetaIndex + ?Sized>(meta: &M) -> usize {
    let flags = meta.flags();
    // Root open, `tracks` name, tracks close, `moreheader`, root close.
    let mut len = 1
        + object_field_len("tracks")
        + OBJECT_END.len()
        + int_field_len("moreheader")
        + OBJECT_END.len();
    len += meta.tracks().values().map(|t| t.send_len()).sum::<usize>();
    if flags.vod {
        len += int_field_len("vod");
    }
    if flags.live {
        len += int_field_len("live");
    }
    if flags.merged {
        len += int_field_len("merged");
    }
    if flags.buffer_window != 0 {
        len += int_field_len("buffer_window");
    }
    len
}

/// Write a complete wire document: header, then the root object.
pub fn write_meta<M, W>(w: &mut WireWriter<W>, meta: &M) -> Result<()>
where
    M: MetaIndex + ?Sized,
    W: Write,
{
    let payload_len = meta_len(meta);
    let start = w.written();
    let flags = meta.flags();

    w.header(payload_len)?;
    w.begin_object()?;
    w.object("tracks")?;
    for track in meta.tracks().values() {
        write_track(w, track)?;
    }
    w.end_object()?;
    if flags.vod {
        w.uint("vod", 1)?;
    }
    if flags.live {
        w.uint("live", 1)?;
    }
    if flags.merged {
        w.uint("merged", 1)?;
    }
    if flags.buffer_window != 0 {
        w.uint("buffer_window", flags.buffer_window)?;
    }
    w.uint("moreheader", flags.moreheader)?;
    w.end_object()?;

    debug_assert_eq!(w.written() - start, HEADER_LEN + payload_len);
    tracing::debug!(payload_len, tracks = meta.tracks().len(), "Encoded wire document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Meta, Packet, Track};

    #[test]
    fn test_empty_audio_track_len() {
        let mut track = Track::new(1, "audio", "aac");
        track.info.rate = 48000;
        track.info.channels = 2;
        let id_len = "audio_aac_2ch_48000hz_1".len();
        assert_eq!(track_len(&track), 146 + 3 + 5 + id_len + 49);
    }

    #[test]
    fn test_track_len_conditionals() {
        let mut track = Track::new(3, "video", "theora");
        track.info.id_header = vec![0; 30];
        track.info.comment_header = vec![0; 12];
        track.info.missed_frags = 2;
        track.update(&Packet::new(3, 0, 10).keyframe());

        let id_len = track.writable_identifier().len();
        let expected = 146 + 6 + 5 + id_len + 11 + 16 + 9 + 48 + (15 + 30) + (20 + 12) + 23;
        assert_eq!(track_len(&track), expected);

        let mut out = WireWriter::new(Vec::new());
        write_track(&mut out, &track).unwrap();
        assert_eq!(out.written(), expected);
    }

    #[test]
    fn test_empty_meta_len() {
        let meta = Meta::new();
        assert_eq!(meta_len(&meta), 37);

        let mut w = WireWriter::new(Vec::new());
        write_meta(&mut w, &meta).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), HEADER_LEN + 37);
        assert_eq!(&bytes[..8], b"DTSC\x00\x00\x00\x25");
        assert_eq!(&bytes[8..18], b"\xE0\x00\x06tracks\xE0");
    }

    #[test]
    fn test_flag_lengths() {
        let mut meta = Meta::new();
        meta.flags.vod = true;
        meta.flags.live = true;
        meta.flags.merged = true;
        meta.flags.buffer_window = 30_000;
        assert_eq!(meta_len(&meta), 37 + 14 + 15 + 17 + 24);

        let mut w = WireWriter::new(Vec::new());
        write_meta(&mut w, &meta).unwrap();
        assert_eq!(w.written(), HEADER_LEN + meta_len(&meta));
    }

    fn field(out: &mut Vec<u8>, name: &str, tag: u8) {
        out.extend_from_slice(&(name.len() as u16).to_be_bytes());
        out.extend_from_slice(name.as_bytes());
        out.push(tag);
    }

    fn int(out: &mut Vec<u8>, name: &str, value: i64) {
        field(out, name, 0x01);
        out.extend_from_slice(&value.to_be_bytes());
    }

    fn bytes(out: &mut Vec<u8>, name: &str, value: &[u8]) {
        field(out, name, 0x02);
        out.extend_from_slice(&(value.len() as u32).to_be_bytes());
        out.extend_from_slice(value);
    }

    #[test]
    fn test_track_object_bytes() {
        let mut track = Track::new(3, "audio", "vorbis");
        track.info.rate = 44100;
        track.info.size = 16;
        track.info.channels = 2;
        track.info.init = vec![0x01, 0x02];
        track.info.id_header = b"ID".to_vec();
        track.info.comment_header = b"CMT".to_vec();
        track.info.missed_frags = 5;
        track.update(&Packet::new(3, 1000, 300).offset(7).bpos(0x0102));

        let mut expected = Vec::new();
        field(&mut expected, "audio_vorbis_2ch_44100hz_3", 0xE0);
        // duration 0, length 1, number 1, size 300
        bytes(&mut expected, "fragments", b"\x00\x00\x00\x00\x01\x00\x01\x00\x00\x01\x2C");
        // bpos 0x0102, length 0, number 1, parts 1, time 1000
        bytes(
            &mut expected,
            "keys",
            b"\x00\x00\x00\x01\x02\x00\x00\x00\x00\x01\x00\x01\x00\x00\x03\xE8",
        );
        // size 300, duration 0, offset 7
        bytes(&mut expected, "parts", b"\x00\x01\x2C\x00\x00\x00\x00\x00\x07");
        int(&mut expected, "trackid", 3);
        int(&mut expected, "missed_frags", 5);
        int(&mut expected, "firstms", 1000);
        int(&mut expected, "lastms", 1000);
        int(&mut expected, "bps", 0);
        bytes(&mut expected, "init", b"\x01\x02");
        bytes(&mut expected, "codec", b"vorbis");
        bytes(&mut expected, "type", b"audio");
        int(&mut expected, "rate", 44100);
        int(&mut expected, "size", 16);
        int(&mut expected, "channels", 2);
        bytes(&mut expected, "idheader", b"ID");
        bytes(&mut expected, "commentheader", b"CMT");
        expected.extend_from_slice(b"\x00\x00\xEE");

        let mut out = WireWriter::new(Vec::new());
        write_track(&mut out, &track).unwrap();
        assert_eq!(out.into_inner(), expected);
        assert_eq!(track_len(&track), expected.len());
    }

    #[test]
    fn test_video_track_fields() {
        let mut track = Track::new(9, "video", "H264");
        track.info.width = 1280;
        track.info.height = 720;
        track.info.fpks = 50000;

        let mut expected = Vec::new();
        field(&mut expected, "video_H264_1280x720_50fps_9", 0xE0);
        bytes(&mut expected, "fragments", b"");
        bytes(&mut expected, "keys", b"");
        bytes(&mut expected, "parts", b"");
        int(&mut expected, "trackid", 9);
        int(&mut expected, "firstms", 0);
        int(&mut expected, "lastms", 0);
        int(&mut expected, "bps", 0);
        bytes(&mut expected, "init", b"");
        bytes(&mut expected, "codec", b"H264");
        bytes(&mut expected, "type", b"video");
        int(&mut expected, "width", 1280);
        int(&mut expected, "height", 720);
        int(&mut expected, "fpks", 50000);
        expected.extend_from_slice(b"\x00\x00\xEE");

        let mut out = WireWriter::new(Vec::new());
        write_track(&mut out, &track).unwrap();
        assert_eq!(out.into_inner(), expected);
    }
}
