//! Root directory resolution.

use std::fs;
use std::path::{Path, PathBuf};

use filelist_core::ScanError;

/// Turn user-supplied roots into canonical directory paths.
///
/// With no paths, the current directory is the only root. Every path must
/// name an existing directory; otherwise all offending paths are reported
/// together, made absolute but otherwise as given.
pub fn resolve_roots<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, ScanError> {
    if paths.is_empty() {
        return resolve_roots(&[Path::new(".")]);
    }

    let mut roots = Vec::with_capacity(paths.len());
    let mut invalid = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match fs::canonicalize(path) {
            Ok(root) if root.is_dir() => roots.push(root),
            _ => invalid.push(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())),
        }
    }

    if invalid.is_empty() {
        Ok(roots)
    } else {
        Err(ScanError::InvalidRoots { paths: invalid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_root_is_current_dir() {
        let roots = resolve_roots::<&str>(&[]).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0], std::env::current_dir().unwrap().canonicalize().unwrap());
    }

    #[test]
    fn test_roots_are_canonical() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        let dotted = temp.path().join("a").join("..").join("a");

        let roots = resolve_roots(&[dotted]).unwrap();
        assert_eq!(roots, vec![temp.path().canonicalize().unwrap().join("a")]);
    }

    #[test]
    fn test_invalid_roots_are_all_reported() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let missing = temp.path().join("missing");

        let err = resolve_roots(&[temp.path().to_path_buf(), file.clone(), missing.clone()])
            .unwrap_err();
        match err {
            ScanError::InvalidRoots { paths } => assert_eq!(paths, vec![file, missing]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
