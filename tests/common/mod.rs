//! Shared helpers for integration tests.
//!
//! Provides log capture and a few recorded streams built from synthetic
//! packets.

#![allow(dead_code)]

use dtsc::prelude::*;

/// Route `tracing` output through the test harness. Safe to call from
/// every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dtsc_meta=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A 1080p25 H264 track.
pub fn video_track(id: u32) -> Track {
    let mut track = Track::new(id, "video", "H264");
    track.info.width = 1920;
    track.info.height = 1080;
    track.info.fpks = 25000;
    track.info.init = vec![0x01, 0x64, 0x00, 0x28];
    track
}

/// A 48 kHz stereo AAC track.
pub fn audio_track(id: u32) -> Track {
    let mut track = Track::new(id, "audio", "aac");
    track.info.rate = 48000;
    track.info.size = 16;
    track.info.channels = 2;
    track.info.init = vec![0x11, 0x90];
    track
}

/// Packets for `seconds` of video with a keyframe every `gop_ms`.
pub fn video_packets(id: u32, seconds: u64, gop_ms: u64) -> Vec<Packet> {
    (0..seconds * 25)
        .map(|frame| {
            let time = frame * 40;
            let packet = Packet::new(id, time, if time % gop_ms == 0 { 20_000 } else { 3_000 })
                .bpos(frame * 10_000 + 1);
            if time % gop_ms == 0 {
                packet.keyframe()
            } else {
                packet
            }
        })
        .collect()
}

/// Packets for `seconds` of AAC audio (1024 samples at 48 kHz, rounded).
pub fn audio_packets(id: u32, seconds: u64) -> Vec<Packet> {
    (0..seconds * 1000 / 21)
        .map(|n| Packet::new(id, n * 21, 370).bpos(n * 10_000 + 2))
        .collect()
}

/// A two-track on-demand recording with interleaved packets.
pub fn recorded_meta(seconds: u64) -> Meta {
    let mut meta = Meta::new();
    meta.insert_track(video_track(1));
    meta.insert_track(audio_track(2));

    let mut packets = video_packets(1, seconds, 2000);
    packets.extend(audio_packets(2, seconds));
    packets.sort_by_key(|p| (p.time, p.track_id));
    for packet in &packets {
        meta.update(packet);
    }
    meta
}
