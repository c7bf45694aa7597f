//! Removing selected files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::DeleteError;

/// Remove every file in `files`, stopping at the first failure.
///
/// Returns the number of files removed.
pub fn delete_files<'p, I>(files: I) -> Result<usize, DeleteError>
where
    I: IntoIterator<Item = &'p Path>,
{
    let mut removed = 0;

    for path in files {
        fs::remove_file(path).map_err(|source| DeleteError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "deleted");
        removed += 1;
    }

    info!(removed, "delete finished");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_delete_files() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.txt");
        let b = temp.path().join("b.txt");
        let keep = temp.path().join("keep.txt");
        for path in [&a, &b, &keep] {
            fs::write(path, "x").unwrap();
        }

        let removed = delete_files([a.as_path(), b.as_path()]).unwrap();

        assert_eq!(removed, 2);
        assert!(!a.exists());
        assert!(!b.exists());
        assert!(keep.exists());
    }

    #[test]
    fn test_delete_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = delete_files([missing.as_path()]).unwrap_err();
        assert_eq!(err.path, missing);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }
}
