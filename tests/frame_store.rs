//! FrameStore and cleanup tests.

use std::{fs, path::PathBuf};

use image::{Rgb, RgbImage};
use orbitgif::{FrameStore, OrbitGifError};

fn write_png(directory: &std::path::Path, name: &str, color: [u8; 3]) -> PathBuf {
    let path = directory.join(name);
    RgbImage::from_pixel(8, 8, Rgb(color))
        .save(&path)
        .expect("Failed to write PNG");
    path
}

#[test]
fn frames_keep_capture_order() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();

    let names = ["c.png", "a.png", "b.png"];
    for name in names {
        let path = write_png(directory.path(), name, [10, 20, 30]);
        store.add_frame(&path).expect("Failed to add frame");
    }

    assert_eq!(store.len(), 3);
    let recorded: Vec<_> = store
        .frames()
        .iter()
        .map(|frame| {
            (
                frame.index(),
                frame.path().file_name().unwrap().to_string_lossy().into_owned(),
            )
        })
        .collect();
    assert_eq!(
        recorded,
        vec![
            (1, "c.png".to_string()),
            (2, "a.png".to_string()),
            (3, "b.png".to_string()),
        ]
    );
}

#[test]
fn handle_refers_to_added_frame() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let first = write_png(directory.path(), "1.png", [0, 0, 0]);
    let second = write_png(directory.path(), "2.png", [0, 0, 0]);

    store.add_frame(&first).expect("Failed to add frame");
    let handle = store.add_frame(&second).expect("Failed to add frame");

    assert_eq!(handle.index(), 2);
    assert_eq!(
        store.get(handle).map(|frame| frame.path()),
        Some(second.as_path())
    );
}

#[test]
fn missing_file_is_a_frame_open_error() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let path = directory.path().join("never_written.png");

    let result = store.add_frame(&path);

    match result {
        Err(OrbitGifError::FrameOpen { index, path: failed, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(failed, path);
        }
        other => panic!("Expected FrameOpen, got: {other:?}"),
    }
    assert!(store.is_empty());
    assert_eq!(store.tracked_paths(), &[path]);
}

#[test]
fn duplicate_path_is_rejected() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let path = write_png(directory.path(), "frame.png", [1, 2, 3]);

    store.add_frame(&path).expect("Failed to add frame");
    let result = store.add_frame(&path);

    assert!(matches!(result, Err(OrbitGifError::DuplicateFrame(_))));
    assert_eq!(store.len(), 1);
}

#[test]
fn release_all_deletes_frames_and_tracked_paths() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let frame = write_png(directory.path(), "frame.png", [1, 2, 3]);
    let partial = directory.path().join("partial.png");
    fs::write(&partial, b"\x89PNG").expect("Failed to write partial file");
    let never_written = directory.path().join("ghost.png");

    store.add_frame(&frame).expect("Failed to add frame");
    store.track(&partial);
    store.track(&never_written);

    let report = store.release_all();

    assert!(report.is_clean());
    assert_eq!(report.removed, vec![frame.clone(), partial.clone()]);
    assert!(!frame.exists());
    assert!(!partial.exists());
    assert!(store.is_empty());
    assert!(store.tracked_paths().is_empty());
}

#[test]
fn cleanup_is_idempotent() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let frame = write_png(directory.path(), "frame.png", [1, 2, 3]);
    store.add_frame(&frame).expect("Failed to add frame");

    let first = orbitgif::cleanup(&mut store);
    let second = orbitgif::cleanup(&mut store);

    assert_eq!(first.removed.len(), 1);
    assert!(second.removed.is_empty());
    assert!(second.warnings.is_empty());
}

#[test]
fn cleanup_of_empty_store_is_a_no_op() {
    let mut store = FrameStore::new();
    let report = orbitgif::cleanup(&mut store);
    assert!(report.removed.is_empty());
    assert!(report.is_clean());
}

#[test]
fn undeletable_path_becomes_a_warning() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let frame = write_png(directory.path(), "frame.png", [1, 2, 3]);
    // `remove_file` refuses directories, which stands in for a locked file.
    let stubborn = directory.path().join("stubborn");
    fs::create_dir(&stubborn).expect("Failed to create dir");

    store.add_frame(&frame).expect("Failed to add frame");
    store.track(&stubborn);
    let report = orbitgif::cleanup(&mut store);

    assert_eq!(report.removed, vec![frame]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].path, stubborn);
    assert!(
        report.warnings[0]
            .to_string()
            .contains("Could not clean up temp file"),
    );
}

#[test]
fn dropping_store_releases_files() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let frame = write_png(directory.path(), "frame.png", [1, 2, 3]);
    {
        let mut store = FrameStore::new();
        store.add_frame(&frame).expect("Failed to add frame");
    }
    assert!(!frame.exists());
}

#[test]
fn decode_can_be_repeated() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let frame = write_png(directory.path(), "frame.png", [40, 80, 120]);
    store.add_frame(&frame).expect("Failed to add frame");

    let frame = &mut store.frames_mut()[0];
    let first = frame.decode().expect("Failed to decode").to_rgb8();
    let second = frame.decode().expect("Failed to decode").to_rgb8();

    assert_eq!(first.dimensions(), (8, 8));
    assert_eq!(first.get_pixel(0, 0).0, [40, 80, 120]);
    assert_eq!(first, second);
}

#[test]
fn decode_reports_frame_index() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let mut store = FrameStore::new();
    let good = write_png(directory.path(), "good.png", [0, 0, 0]);
    let bad = directory.path().join("bad.png");
    fs::write(&bad, b"definitely not a png").expect("Failed to write file");
    store.add_frame(&good).expect("Failed to add frame");
    store.add_frame(&bad).expect("Failed to add frame");

    let result = store.frames_mut()[1].decode();

    assert!(matches!(
        result,
        Err(OrbitGifError::FrameDecode { index: 2, .. })
    ));
}
