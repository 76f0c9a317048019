// Error types for archive diffing and patch assembly.
//
// Every fallible operation in the crate returns `Result<T, Error>`. Errors
// carry enough context to name the offending file (and entry, where one is
// involved); there is no retry anywhere, a failure is terminal for the
// current call.

use std::io;
use std::path::PathBuf;

use zip::result::ZipError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all archive diff and patch operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A filter pattern failed to compile. Raised at configuration time,
    /// never lazily during matching.
    #[error("invalid filter pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// The compile failure reported by the regex engine.
        reason: String,
    },

    /// An input archive could not be opened: missing file, unreadable, or
    /// not a valid zip container.
    #[error("cannot open archive {}: {source}", .path.display())]
    Open {
        /// Path of the archive that failed to open.
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// Reading a single entry failed mid-operation (indexing, extraction,
    /// or copying into the patch).
    #[error("cannot read entry '{name}' in {}: {source}", .archive.display())]
    Entry {
        /// Path of the archive holding the entry.
        archive: PathBuf,
        /// Archive-internal entry name.
        name: String,
        #[source]
        source: ZipError,
    },

    /// An error from the `zip` crate outside any per-entry context
    /// (typically while writing the patch archive).
    #[error("zip error: {0}")]
    Zip(#[from] ZipError),

    /// An I/O error outside any per-entry context (temp files, patch
    /// output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
