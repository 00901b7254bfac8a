use crate::engine::TMP_MARKER;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

pub(crate) async fn purge_stale_tmp(root: &Path, age: Duration) {
    let root = root.to_path_buf();
    let now = SystemTime::now();

    match tokio::task::spawn_blocking(move || remove_stale(&root, now, age)).await {
        Ok((0, 0)) => {},
        Ok((removed, failed)) => info!(removed, failed, "Purged stale temp files"),
        Err(err) => warn!(error = %err, "Temp file purge did not complete"),
    }
}

fn remove_stale(root: &Path, now: SystemTime, age: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    let candidates = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| is_tmp(entry) && is_older_than(entry, now, age));

    for entry in candidates {
        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Could not remove temp file");
                failed += 1;
            },
        }
    }

    (removed, failed)
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

/// Files with unreadable timestamps count as stale.
fn is_older_than(entry: &DirEntry, now: SystemTime, age: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|meta| meta.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|elapsed| elapsed >= age)
}
