//! Filesystem image source integration tests.

#![allow(clippy::unwrap_used)]

use eyebench_adapters::FsImageSource;
use eyebench_core::ImageSource;
use eyebench_test_support::textured_portrait;

#[test]
fn test_directory_scan_is_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    textured_portrait(32, 32)
        .save(dir.path().join("b.jpg"))
        .unwrap();
    textured_portrait(32, 32)
        .save(dir.path().join("a.png"))
        .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(2));

    let names: Vec<String> = source
        .images()
        .map(|r| r.unwrap().name)
        .collect();
    assert_eq!(names, vec!["a.png", "b.jpg"]);
}

#[test]
fn test_recursive_scan() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    textured_portrait(32, 32)
        .save(nested.join("deep.jpg"))
        .unwrap();

    let flat = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(flat.count_hint(), Some(0));

    let recursive = FsImageSource::new(vec![dir.path().to_path_buf()], true);
    assert_eq!(recursive.count_hint(), Some(1));
}

#[test]
fn test_corrupt_file_yields_item_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.jpg"), b"definitely not a jpeg").unwrap();

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    let items: Vec<_> = source.images().collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].is_err());
}

#[test]
fn test_missing_path_is_skipped() {
    let source = FsImageSource::new(vec!["/definitely/not/here".into()], false);
    assert_eq!(source.count_hint(), Some(0));
    assert_eq!(source.images().count(), 0);
}
