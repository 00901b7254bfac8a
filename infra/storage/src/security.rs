use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Lexically folds `.` and `..`; `..` may never climb above the (empty) base.
fn fold_components(path: &Path) -> Result<PathBuf, StorageError> {
    let mut folded = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::Normal(segment) => folded.push(segment),
            Component::ParentDir if folded.pop() => {},
            Component::ParentDir => return Err(traversal(path, "'..' climbs above the root")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(traversal(path, "absolute paths are not allowed"));
            },
        }
    }

    Ok(folded)
}

/// Joins `path` onto the canonical `root`, verifying the result stays inside even
/// when existing components are symlinks.
pub(crate) fn resolve_path(root: &Path, path: &Path) -> Result<PathBuf, StorageError> {
    let joined = root.join(fold_components(path)?);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(traversal(&canonical, "symlink leads outside the root")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            check_existing_ancestor(root, &joined)?;
            Ok(joined)
        },
        Err(err) => Err(StorageError::Io {
            source: err,
            context: Some(format!("resolving {}", joined.display()).into()),
        }),
    }
}

/// For paths that do not exist yet, the nearest existing ancestor decides.
fn check_existing_ancestor(root: &Path, joined: &Path) -> Result<(), StorageError> {
    for ancestor in joined.ancestors() {
        if ancestor == root {
            return Ok(());
        }
        if !ancestor.exists() {
            continue;
        }
        let canonical = ancestor.canonicalize().map_err(|err| StorageError::Io {
            source: err,
            context: Some(format!("resolving {}", ancestor.display()).into()),
        })?;
        return if canonical.starts_with(root) {
            Ok(())
        } else {
            Err(traversal(&canonical, "parent directory leads outside the root"))
        };
    }

    Err(traversal(joined, "no ancestor inside the root"))
}

fn traversal(path: &Path, reason: &'static str) -> StorageError {
    StorageError::PathTraversal { message: path.display().to_string().into(), context: Some(reason.into()) }
}
