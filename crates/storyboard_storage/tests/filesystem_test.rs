//! Tests for filesystem image storage.

use storyboard_core::ImageData;
use storyboard_error::StoryboardErrorKind;
use storyboard_storage::{FileSystemStorage, ImageStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_store_uses_frame_numbered_names() {
    let dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(dir.path()).unwrap();

    let path = storage
        .store(1, &ImageData::png(vec![0x89, 0x50, 0x4e, 0x47]))
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("frame_01.png"));
    assert_eq!(
        tokio::fs::read(&path).await.unwrap(),
        vec![0x89, 0x50, 0x4e, 0x47]
    );
    // Temp file is renamed away
    assert!(!dir.path().join("frame_01.tmp").exists());
}

#[tokio::test]
async fn test_store_overwrites_same_frame() {
    let dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(dir.path()).unwrap();

    storage.store(2, &ImageData::png(vec![1])).await.unwrap();
    storage.store(2, &ImageData::png(vec![2, 2])).await.unwrap();

    assert_eq!(storage.read("frame_02.png").await.unwrap(), vec![2, 2]);
}

#[tokio::test]
async fn test_new_creates_nested_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("out").join("frames");

    let storage = FileSystemStorage::new(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(storage.base_path(), nested.as_path());
    assert_eq!(storage.backend_name(), "filesystem");
}

#[tokio::test]
async fn test_write_document() {
    let dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(dir.path()).unwrap();

    let path = storage
        .write_document("storyboard_overview.html", "<html></html>")
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("storyboard_overview.html"));
    assert_eq!(
        storage.read("storyboard_overview.html").await.unwrap(),
        b"<html></html>".to_vec()
    );
}

#[tokio::test]
async fn test_read_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(dir.path()).unwrap();

    let err = storage.read("frame_09.png").await.unwrap_err();
    assert!(matches!(err.kind(), StoryboardErrorKind::Storage(_)));
    assert!(format!("{}", err).contains("not found"));
}
