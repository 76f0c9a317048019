// Read-only, indexed view over one zip-format archive.
//
// An `ArchiveView` is bound to a single underlying file for its lifetime.
// `index()` walks the archive once in native entry order, applies the entry
// filter, and fingerprints every surviving entry's decompressed stream.
// Filtered entries are invisible to all subsequent operations on the view;
// extraction deliberately bypasses the filter because nested-archive
// recursion needs raw bytes for any name.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::filter::EntryFilter;
use crate::fingerprint::{self, Fingerprint};

/// One opened archive plus its content index (entry name → fingerprint).
#[derive(Debug)]
pub struct ArchiveView {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    filter: EntryFilter,
    /// Entry names that passed the filter, in native archive order
    /// (first occurrence wins the position, last occurrence wins the digest).
    names: Vec<String>,
    digests: HashMap<String, Fingerprint>,
    indexed: bool,
}

impl ArchiveView {
    /// Opens the archive at `path` for read with the given filter attached.
    ///
    /// Fails with [`Error::Open`] if the file is missing, unreadable, or not
    /// a valid zip container.
    pub fn open(path: &Path, filter: EntryFilter) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            source: ZipError::from(e),
        })?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
            filter,
            names: Vec::new(),
            digests: HashMap::new(),
            indexed: false,
        })
    }

    /// Path of the underlying archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The filter this view was opened with.
    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    /// Total number of entries in the underlying archive, unfiltered.
    pub fn entry_count(&self) -> usize {
        self.archive.len()
    }

    /// Whether `index()` has completed on this view.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Builds the content index: one pass over the archive's entries in
    /// native order, fingerprinting the decompressed stream of every entry
    /// that passes the filter. Must run before any comparison.
    ///
    /// Any read failure aborts indexing and discards the partial index; a
    /// diff over a silently partial index would report spurious deletions.
    pub fn index(&mut self) -> Result<()> {
        self.names.clear();
        self.digests.clear();
        self.indexed = false;

        for i in 0..self.archive.len() {
            let mut entry = self
                .archive
                .by_index(i)
                .map_err(|e| entry_error(&self.path, &format!("#{i}"), e))?;
            let name = entry.name().to_string();
            if !self.filter.includes(&name) {
                continue;
            }
            let digest = fingerprint::fingerprint_reader(&mut entry)
                .map_err(|e| entry_error(&self.path, &name, ZipError::from(e)))?;
            drop(entry);
            if self.digests.insert(name.clone(), digest).is_none() {
                self.names.push(name);
            }
        }

        self.indexed = true;
        debug!(
            "indexed {} of {} entries from {}",
            self.names.len(),
            self.archive.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Indexed entry names in native archive order.
    pub fn indexed_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of entries in the content index (filtered).
    pub fn indexed_len(&self) -> usize {
        self.names.len()
    }

    /// Fingerprint of an indexed entry, or `None` if the name is absent
    /// from the index (not in the archive, or filtered out).
    pub fn fingerprint(&self, name: &str) -> Option<Fingerprint> {
        self.digests.get(name).copied()
    }

    /// Whether the content index holds the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.digests.contains_key(name)
    }

    /// Copies the named entry's bytes into a freshly created, process-unique
    /// temporary file and returns the owning handle (drop deletes the file).
    ///
    /// Returns `Ok(None)` when the entry does not exist in this archive;
    /// that is an expected outcome during nested-archive comparison, not an
    /// error. The filter is intentionally not consulted.
    pub fn extract_entry(&mut self, name: &str) -> Result<Option<NamedTempFile>> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(entry_error(&self.path, name, e)),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix("jarpatch-")
            .suffix(".zip")
            .tempfile()?;
        io::copy(&mut entry, tmp.as_file_mut())
            .map_err(|e| entry_error(&self.path, name, ZipError::from(e)))?;
        tmp.as_file_mut().flush()?;
        Ok(Some(tmp))
    }

    /// Streams the named entry's decompressed bytes into `sink`,
    /// byte-for-byte, returning the number of bytes copied.
    pub fn write_entry_to<W: Write>(&mut self, name: &str, sink: &mut W) -> Result<u64> {
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|e| entry_error(&self.path, name, e))?;
        io::copy(&mut entry, sink).map_err(|e| entry_error(&self.path, name, ZipError::from(e)))
    }
}

fn entry_error(archive: &Path, name: &str, source: ZipError) -> Error {
    Error::Entry {
        archive: archive.to_path_buf(),
        name: name.to_string(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
