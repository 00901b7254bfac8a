use lpad_storage::{Storage, StorageError};
use std::time::Duration;
use tempfile::TempDir;

async fn open(temp: &TempDir) -> Storage {
    Storage::builder().root(temp.path().join("data")).connect().await.unwrap()
}

#[tokio::test]
async fn traversal_is_rejected() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;

    assert!(matches!(storage.resolve("../outside"), Err(StorageError::PathTraversal { .. })));
    assert!(matches!(storage.resolve("a/../../b"), Err(StorageError::PathTraversal { .. })));
    assert!(matches!(storage.read("/etc/hostname").await, Err(StorageError::PathTraversal { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn symlinks_out_of_the_root_are_rejected() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;
    let outside = temp.path().join("outside");
    std::fs::create_dir_all(&outside).unwrap();
    std::os::unix::fs::symlink(&outside, storage.root().join("link")).unwrap();

    let err = storage.write("link/evil.json", b"{}").await.unwrap_err();

    assert!(matches!(err, StorageError::PathTraversal { .. }));
    assert!(!outside.join("evil.json").exists());
}

#[tokio::test]
async fn write_replaces_and_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;

    storage.write("projects/p1.json", b"first").await.unwrap();
    storage.write("projects/p1.json", b"second").await.unwrap();

    assert_eq!(storage.read("projects/p1.json").await.unwrap(), b"second");
    let names: Vec<_> = std::fs::read_dir(storage.root().join("projects"))
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["p1.json".to_owned()]);
}

#[tokio::test]
async fn concurrent_writes_end_with_one_complete_document() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;

    let writers = (0..8u8).map(|n| {
        let storage = storage.clone();
        tokio::spawn(async move { storage.write("race.json", &[n; 512]).await })
    });
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let data = storage.read("race.json").await.unwrap();
    assert_eq!(data.len(), 512);
    assert!(data.iter().all(|byte| *byte == data[0]));
}

#[tokio::test]
async fn list_returns_sorted_stems_for_the_extension() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;

    assert!(storage.list("projects", "json").await.unwrap().is_empty());

    storage.write("projects/b.json", b"{}").await.unwrap();
    storage.write("projects/a.json", b"{}").await.unwrap();
    storage.write("projects/notes.txt", b"-").await.unwrap();
    storage.write("projects/nested/c.json", b"{}").await.unwrap();

    assert_eq!(storage.list("projects", "json").await.unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn delete_and_exists() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;

    storage.write("x.json", b"{}").await.unwrap();
    assert!(storage.exists("x.json").await.unwrap());

    storage.delete("x.json").await.unwrap();
    assert!(!storage.exists("x.json").await.unwrap());
    assert!(matches!(storage.delete("x.json").await, Err(StorageError::FileNotFound { .. })));
}

#[tokio::test]
async fn missing_read_is_file_not_found() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;

    let err = storage.read("missing.json").await.unwrap_err();
    assert!(matches!(err, StorageError::FileNotFound { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn connect_without_create_requires_existing_root() {
    let temp = TempDir::new().unwrap();

    let result = Storage::builder().root(temp.path().join("absent")).create(false).connect().await;

    assert!(matches!(result, Err(StorageError::Io { .. })));
}

#[tokio::test]
async fn connect_purges_orphaned_temp_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("data");
    std::fs::create_dir_all(root.join("projects")).unwrap();
    let orphan = root.join("projects/p1.json.lpadtmp.99.0");
    std::fs::write(&orphan, b"{\"na").unwrap();

    let _storage =
        Storage::builder().root(&root).stale_after(Duration::ZERO).connect().await.unwrap();

    assert!(!orphan.exists());
}

#[tokio::test]
async fn exists_only_reports_regular_files() {
    let temp = TempDir::new().unwrap();
    let storage = open(&temp).await;

    storage.write("projects/a.json", b"{}").await.unwrap();

    assert!(storage.exists("projects/a.json").await.unwrap());
    assert!(!storage.exists("projects").await.unwrap());
    assert!(!storage.exists("projects/missing.json").await.unwrap());
    assert!(matches!(
        storage.exists("../outside.json").await,
        Err(StorageError::PathTraversal { .. })
    ));
}
