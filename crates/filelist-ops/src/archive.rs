//! Flat zip archiving of selected files.

use std::fs::{self, File, Metadata};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};
use derive_builder::Builder;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use filelist_core::FileFacts;

use crate::error::ArchiveError;
use crate::naming::EntryNamer;

/// Entries at or above this size are written with zip64 extensions.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// How entries are written.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ArchiveOptions {
    /// Compression applied to every entry.
    #[builder(default = "CompressionMethod::Deflated")]
    pub compression: CompressionMethod,

    /// Stamp entries with the source file's local modification time.
    #[builder(default = "true")]
    pub preserve_modified: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
            preserve_modified: true,
        }
    }
}

impl ArchiveOptions {
    /// Create a new options builder.
    pub fn builder() -> ArchiveOptionsBuilder {
        ArchiveOptionsBuilder::default()
    }
}

/// One file written into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub source: PathBuf,
    /// Name inside the archive.
    pub name: String,
}

/// Result of a successful archive run.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub destination: PathBuf,
    pub entries: Vec<ArchiveEntry>,
}

/// Write every file in `files` into a new zip at `destination`.
///
/// Entries are named by base name, with `(n) ` prefixes on collisions. An
/// existing destination is never touched. If writing fails part-way, the
/// partially written archive is removed.
pub fn archive_files<'p, I>(
    files: I,
    destination: &Path,
    options: &ArchiveOptions,
) -> Result<ArchiveSummary, ArchiveError>
where
    I: IntoIterator<Item = &'p Path>,
{
    let file = File::create_new(destination).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ArchiveError::DestinationExists {
            path: destination.to_path_buf(),
        },
        _ => ArchiveError::io(destination, e),
    })?;

    match write_entries(ZipWriter::new(file), files, options) {
        Ok(entries) => {
            info!(
                destination = %destination.display(),
                entries = entries.len(),
                "archive written"
            );
            Ok(ArchiveSummary {
                destination: destination.to_path_buf(),
                entries,
            })
        }
        Err(err) => {
            match fs::remove_file(destination) {
                Ok(()) => warn!(destination = %destination.display(), "removed partial archive"),
                Err(e) => warn!(
                    destination = %destination.display(),
                    error = %e,
                    "could not remove partial archive"
                ),
            }
            Err(err)
        }
    }
}

fn write_entries<'p, I>(
    mut writer: ZipWriter<File>,
    files: I,
    options: &ArchiveOptions,
) -> Result<Vec<ArchiveEntry>, ArchiveError>
where
    I: IntoIterator<Item = &'p Path>,
{
    let mut namer = EntryNamer::new();
    let mut entries = Vec::new();

    for source in files {
        let base_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        let name = namer.claim(&base_name);

        let mut input = File::open(source).map_err(|e| ArchiveError::io(source, e))?;
        let metadata = input.metadata().map_err(|e| ArchiveError::io(source, e))?;

        writer.start_file(name.as_str(), entry_options(&metadata, options))?;
        io::copy(&mut input, &mut writer).map_err(|e| ArchiveError::io(source, e))?;

        debug!(source = %source.display(), entry = %name, "archived");
        entries.push(ArchiveEntry {
            source: source.to_path_buf(),
            name,
        });
    }

    writer.finish()?;
    Ok(entries)
}

fn entry_options(metadata: &Metadata, options: &ArchiveOptions) -> SimpleFileOptions {
    let entry = SimpleFileOptions::default()
        .compression_method(options.compression)
        .large_file(metadata.len() >= ZIP64_THRESHOLD);

    match options.preserve_modified.then(|| zip_time(metadata)).flatten() {
        Some(time) => entry.last_modified_time(time),
        None => entry,
    }
}

/// Local modification time in zip's representation, if it has one.
/// Zip timestamps cannot express years before 1980.
fn zip_time(metadata: &Metadata) -> Option<zip::DateTime> {
    let modified = FileFacts::from_metadata(metadata).ok()?.modified;
    zip::DateTime::from_date_and_time(
        u16::try_from(modified.year()).ok()?,
        modified.month() as u8,
        modified.day() as u8,
        modified.hour() as u8,
        modified.minute() as u8,
        modified.second() as u8,
    )
    .ok()
}
