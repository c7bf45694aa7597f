//! filelist - select files across directory trees and act on them.
//!
//! Usage:
//!   filelist [SELECTORS] [MODES] [OPERATION] [PATH]...
//!
//! Selected paths are printed as they are found, unless a duplicate report
//! or `-nofilelist` replaces the listing. `-zip` and `-delete` act on the
//! selected set after all reporting is done.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Report, Result};
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use filelist_analyze::DuplicateGrouper;
use filelist_core::{CommandPlan, Operation, OptionError, ScanError, SelectorError, Stats};
use filelist_ops::{ArchiveError, ArchiveOptions, archive_files, delete_files};
use filelist_scan::{WalkOutcome, resolve_roots, walk_roots};

const ERR_ILLEGAL_OPTION: &str = "Illegal or conflicting command line option(s) was specified.";
const ERR_ILLEGAL_ARGUMENT: &str = "An illegal argument was supplied to one of the options.";
const ERR_PATH_NOT_DIR: &str =
    "One of the following supplied paths is non-existent or is not a directory:";
const ERR_ZIP_FAILED: &str = "The zipping operation failed.";

const OPTIONS_HELP: &str = "\
Selectors (all must match):
  -before <TS>      modified at or before TS (YYYYMMDD or YYYYMMDDTHHMMSS)
  -after <TS>       modified at or after TS
  -match <REGEX>    file name matches REGEX in full
  -bigger <SIZE>    at least SIZE bytes (suffix k, m or g for KiB, MiB, GiB)
  -smaller <SIZE>   at most SIZE bytes

Output modes:
  -duplcont         group selected files by identical content
  -duplname         group selected files by identical name
  -nofilelist       do not print selected files
  -stats            print visited/listed counters at the end

Operations:
  -zip <PATH>       write selected files into a new zip archive
  -delete           delete selected files

Paths default to the current directory. The first argument that is not an
option starts the path list.";

#[derive(Parser)]
#[command(
    name = "filelist",
    version,
    about = "Select files by age, name and size across directory trees",
    long_about = "filelist walks directory trees breadth-first and selects the files \
                  matching every given selector. Selected files can be listed, grouped \
                  into duplicates, archived into a zip, or deleted.",
    after_help = OPTIONS_HELP
)]
struct Cli {
    /// Options followed by directory roots
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match run(&cli.args, &mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            report_error(&err, &mut stdout)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Validate, walk, report, then operate.
fn run<W: Write>(args: &[String], out: &mut W) -> Result<()> {
    let plan = CommandPlan::from_args(args.iter().cloned())?;
    let selectors = plan.selectors.resolve()?;
    let roots = resolve_roots(plan.paths.as_slice())?;
    let output = plan.effective_output();

    debug!(roots = roots.len(), ?output, "starting walk");

    let WalkOutcome {
        selected,
        mut stats,
        ..
    } = walk_roots(&roots, &selectors, output.listing_enabled(), out)?;

    debug!(selected = selected.len(), "walk finished");

    if let Some(mode) = output.duplicates {
        let report = DuplicateGrouper::new(mode).group(selected.sorted())?;
        report.write_to(out, &mut stats)?;
    }

    if output.stats {
        print_stats(&stats, out)?;
    }

    match &plan.operation {
        Some(Operation::Archive { destination }) => {
            archive_files(selected.iter(), destination, &ArchiveOptions::default())?;
        }
        Some(Operation::Delete) => {
            delete_files(selected.iter())?;
        }
        None => {}
    }

    Ok(())
}

/// Print the four run counters after a blank line.
fn print_stats<W: Write>(stats: &Stats, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Total number of files visited: {}", stats.files_visited)?;
    writeln!(out, "Total size of files visited: {} bytes", stats.bytes_visited)?;
    writeln!(out, "Total number of files listed: {}", stats.files_listed)?;
    writeln!(out, "Total size of files listed: {} bytes", stats.bytes_listed)?;
    out.flush()
}

/// Turn a failure into the one line (two for bad roots) the user sees.
fn report_error<W: Write>(err: &Report, out: &mut W) -> io::Result<()> {
    debug!(error = ?err, "command failed");

    if err.downcast_ref::<OptionError>().is_some() {
        writeln!(out, "{ERR_ILLEGAL_OPTION}")?;
    } else if err.downcast_ref::<SelectorError>().is_some() {
        writeln!(out, "{ERR_ILLEGAL_ARGUMENT}")?;
    } else if let Some(ScanError::InvalidRoots { paths }) = err.downcast_ref::<ScanError>() {
        writeln!(out, "{ERR_PATH_NOT_DIR}")?;
        writeln!(
            out,
            "{}",
            paths.iter().map(|p| format!("\"{}\"", p.display())).join(", ")
        )?;
    } else if err.downcast_ref::<ArchiveError>().is_some() {
        writeln!(out, "{ERR_ZIP_FAILED}")?;
    } else {
        writeln!(out, "An unexpected error occurred: {err}")?;
    }

    out.flush()
}
