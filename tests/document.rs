//! Generic tree documents, CBOR files, and configuration files.

mod common;

use assert_matches::assert_matches;
use ciborium::value::Value;
use common::{init_logging, recorded_meta};
use dtsc::meta::document;
use dtsc::prelude::*;
use dtsc::Error;

#[test]
fn test_meta_document_round_trip() {
    init_logging();
    let mut meta = recorded_meta(8);
    meta.flags.merged = true;
    meta.flags.moreheader = 77;

    let doc = meta.to_value();
    assert_eq!(Meta::from_value(&doc).unwrap(), meta);
}

#[test]
fn test_document_keys_use_writable_identifiers() {
    let meta = recorded_meta(2);
    let doc = meta.to_value();
    let tracks = doc
        .as_map()
        .unwrap()
        .iter()
        .find(|(k, _)| k.as_text() == Some("tracks"))
        .and_then(|(_, v)| v.as_map())
        .unwrap();
    let names: Vec<&str> = tracks.iter().filter_map(|(k, _)| k.as_text()).collect();
    assert_eq!(
        names,
        vec!["video_H264_1920x1080_25fps_1", "audio_aac_2ch_48000hz_2"]
    );
}

#[test]
fn test_view_borrows_document_records() {
    let meta = recorded_meta(6);
    let doc = meta.to_value();
    let view = MetaView::from_value(&doc).unwrap();

    let video = &view.tracks()[&1];
    assert_eq!(video.keys(), meta.track(1).unwrap().keys());
    assert_eq!(video.fragments(), meta.track(1).unwrap().fragments());

    // The view's records point into the document's byte strings.
    let stored = doc.as_map().unwrap()[0].1.as_map().unwrap()[0].1.as_map().unwrap();
    let keys = stored
        .iter()
        .find(|(k, _)| k.as_text() == Some("keys"))
        .and_then(|(_, v)| v.as_bytes())
        .unwrap();
    assert_eq!(video.keys().as_ptr().cast::<u8>(), keys.as_ptr());

    let owned = Meta::from(&view);
    assert_eq!(owned, meta);
}

#[test]
fn test_cbor_file_round_trip() {
    let meta = recorded_meta(8);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.dtsh");

    std::fs::write(&path, meta.to_cbor().unwrap()).unwrap();
    let loaded = Meta::from_cbor(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(loaded, meta);
    assert_eq!(loaded.to_wire().unwrap(), meta.to_wire().unwrap());
}

#[test]
fn test_cbor_and_document_helpers_agree() {
    let meta = recorded_meta(2);
    let encoded = document::to_cbor(&meta.to_value()).unwrap();
    assert_eq!(encoded, meta.to_cbor().unwrap());
    assert_eq!(document::from_cbor(&encoded).unwrap(), meta.to_value());
}

#[test]
fn test_invalid_documents() {
    assert_matches!(
        Meta::from_cbor(&[0xFF, 0x00, 0x13]),
        Err(Error::InvalidDocument(_))
    );

    let not_a_map = Value::Array(vec![]);
    assert_matches!(Meta::from_value(&not_a_map), Err(Error::InvalidDocument(_)));
    assert_matches!(
        MetaView::from_value(&not_a_map),
        Err(Error::InvalidDocument(_))
    );
    assert_matches!(Track::from_value(&not_a_map), Err(Error::InvalidDocument(_)));
}

#[test]
fn test_track_document_tolerates_missing_fields() {
    let doc = Value::Map(vec![(
        Value::Text("trackid".into()),
        Value::Integer(4.into()),
    )]);
    let sparse = Track::from_value(&doc).unwrap();
    assert_eq!(sparse.info.track_id, 4);
    assert_eq!(sparse.info.kind, TrackKind::None);
    assert!(sparse.keys().is_empty());
    assert_eq!(sparse.writable_identifier(), "metadata_4_4");
}

#[test]
fn test_config_file_loading() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");

    let config = IndexConfig {
        key_interval_ms: 2000,
        fragment_min_ms: 10_000,
        bps_min_duration_ms: 500,
    };
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(IndexConfig::load_or_default(Some(path.as_path())), config);

    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(IndexConfig::load_or_default(Some(path.as_path())), IndexConfig::default());

    let missing = dir.path().join("missing.json");
    assert_eq!(
        IndexConfig::load_or_default(Some(missing.as_path())),
        IndexConfig::default()
    );
    assert_eq!(IndexConfig::load_or_default(None), IndexConfig::default());

    assert_matches!(
        IndexConfig::from_json(r#"{ "key_interval_ms": "soon" }"#),
        Err(Error::Config(_))
    );
}
