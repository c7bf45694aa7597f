use filelist_ops::{ArchiveError, ArchiveOptions, EntryNamer, archive_files, delete_files};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

fn same_name_files(temp: &TempDir, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let dir = temp.path().join(format!("d{i}"));
            fs::create_dir(&dir).unwrap();
            let path = dir.join("report.txt");
            fs::write(&path, format!("copy {i}")).unwrap();
            path
        })
        .collect()
}

#[test]
fn test_entry_namer_sequence() {
    let mut namer = EntryNamer::new();
    assert!(namer.is_empty());

    assert_eq!(namer.claim("a.txt"), "a.txt");
    assert_eq!(namer.claim("a.txt"), "(1) a.txt");
    assert_eq!(namer.claim("(1) a.txt"), "(1) (1) a.txt");
    assert_eq!(namer.claim("a.txt"), "(2) a.txt");
    assert_eq!(namer.len(), 4);
}

#[test]
fn test_every_same_named_file_gets_an_entry() {
    let temp = TempDir::new().unwrap();
    let sources = same_name_files(&temp, 4);
    let destination = temp.path().join("bundle.zip");

    let summary = archive_files(
        sources.iter().map(PathBuf::as_path),
        &destination,
        &ArchiveOptions::default(),
    )
    .unwrap();

    let names: Vec<&str> = summary.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        ["report.txt", "(1) report.txt", "(2) report.txt", "(3) report.txt"]
    );

    let mut zip = ZipArchive::new(File::open(&destination).unwrap()).unwrap();
    assert_eq!(zip.len(), 4);
    let mut content = String::new();
    zip.by_name("(3) report.txt")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "copy 3");
}

#[test]
fn test_empty_selection_writes_empty_archive() {
    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("empty.zip");

    let summary = archive_files(
        std::iter::empty::<&Path>(),
        &destination,
        &ArchiveOptions::default(),
    )
    .unwrap();

    assert!(summary.entries.is_empty());
    let zip = ZipArchive::new(File::open(&destination).unwrap()).unwrap();
    assert_eq!(zip.len(), 0);
}

#[test]
fn test_archive_into_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let sources = same_name_files(&temp, 1);
    let destination = temp.path().join("no/such/dir/out.zip");

    let err = archive_files(
        sources.iter().map(PathBuf::as_path),
        &destination,
        &ArchiveOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ArchiveError::Io { .. }));
}

#[test]
fn test_delete_stops_at_first_failure() {
    let temp = TempDir::new().unwrap();
    let sources = same_name_files(&temp, 2);
    let missing = temp.path().join("missing.txt");

    let err = delete_files([sources[0].as_path(), missing.as_path(), sources[1].as_path()])
        .unwrap_err();

    assert_eq!(err.path, missing);
    assert!(!sources[0].exists());
    assert!(sources[1].exists());
}
