// Patch assembly: orchestrates view construction, runs the differencer, and
// materializes the output archive.
//
// The output file is only created once a difference is known to exist; a
// failure mid-write removes the partial file rather than leaving a truncated
// archive behind.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::diff;
use crate::error::Result;
use crate::filter::EntryFilter;
use crate::view::ArchiveView;

/// Name of the optional patch entry listing deleted files, one per line.
pub const DELETED_LOG_NAME: &str = "jarpatch_deleted.log";

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

// ---------------------------------------------------------------------------
// Options and outcome
// ---------------------------------------------------------------------------

/// Configuration for one `build_patch` call.
#[derive(Debug, Clone, Default)]
pub struct PatchOptions {
    /// Exclude patterns (full-match regular expressions over entry names),
    /// applied on top of the built-in metadata exclusion.
    pub excludes: Vec<String>,
    /// Patterns re-including otherwise-excluded entries.
    pub meta_includes: Vec<String>,
    /// Record entries present in the old archive but missing from the new
    /// one in a `jarpatch_deleted.log` patch entry.
    pub log_deleted: bool,
}

/// Statistics for a successfully written patch.
#[derive(Debug, Clone)]
pub struct PatchStats {
    /// Number of changed/new entries copied into the patch.
    pub changed_entries: usize,
    /// Number of names recorded in the deletion log (0 when not requested).
    pub deleted_entries: usize,
    /// Size of the finished patch file in bytes.
    pub output_size: u64,
}

/// Result of a `build_patch` call. "No difference" is a normal outcome,
/// distinct from any failure.
#[derive(Debug)]
pub enum PatchOutcome {
    /// The patch archive was written.
    Written(PatchStats),
    /// The archives do not differ under the configured filters; no output
    /// file was created.
    NoDifference,
}

// ---------------------------------------------------------------------------
// build_patch
// ---------------------------------------------------------------------------

/// Builds a patch archive at `output_path` containing every entry of
/// `new_path` that is new or changed relative to `old_path`, plus an
/// optional deletion log.
///
/// Returns [`PatchOutcome::NoDifference`] without creating the output file
/// when nothing differs. On any error the output path is left without a
/// partially written file.
pub fn build_patch(
    new_path: &Path,
    old_path: &Path,
    output_path: &Path,
    opts: &PatchOptions,
) -> Result<PatchOutcome> {
    let filter = EntryFilter::new(&opts.excludes, &opts.meta_includes)?;

    let mut new_view = ArchiveView::open(new_path, filter.clone())?;
    let mut old_view = ArchiveView::open(old_path, filter)?;
    new_view.index()?;
    old_view.index()?;

    let deleted = if opts.log_deleted {
        diff::deleted_entries(&mut old_view, &mut new_view)?
    } else {
        Vec::new()
    };
    let changed = diff::changed_entries(&mut new_view, &mut old_view)?;

    if changed.is_empty() && deleted.is_empty() {
        debug!(
            "no difference between {} and {}",
            new_path.display(),
            old_path.display()
        );
        return Ok(PatchOutcome::NoDifference);
    }

    match write_patch(&mut new_view, output_path, &changed, &deleted) {
        Ok(stats) => Ok(PatchOutcome::Written(stats)),
        Err(e) => {
            // Never leave a truncated archive at the output path.
            let _ = std::fs::remove_file(output_path);
            Err(e)
        }
    }
}

fn write_patch(
    new_view: &mut ArchiveView,
    output_path: &Path,
    changed: &[String],
    deleted: &[String],
) -> Result<PatchStats> {
    let mut writer = ZipWriter::new(File::create(output_path)?);

    for name in changed {
        if name.ends_with('/') {
            writer.add_directory(name.as_str(), SimpleFileOptions::default())?;
        } else {
            writer.start_file(name.as_str(), SimpleFileOptions::default())?;
            new_view.write_entry_to(name, &mut writer)?;
        }
    }

    if !deleted.is_empty() {
        writer.start_file(DELETED_LOG_NAME, SimpleFileOptions::default())?;
        for name in deleted {
            writer.write_all(name.as_bytes())?;
            writer.write_all(LINE_SEPARATOR.as_bytes())?;
        }
    }

    let file = writer.finish()?;
    let output_size = file.metadata()?.len();
    debug!(
        "wrote patch {} ({} changed, {} deleted, {output_size} bytes)",
        output_path.display(),
        changed.len(),
        deleted.len()
    );
    Ok(PatchStats {
        changed_entries: changed.len(),
        deleted_entries: deleted.len(),
        output_size,
    })
}
