//! Jarpatch: content diffing for zip-format archives (jar/war/zip).
//!
//! The crate provides:
//! - Entry-name filtering with exclude/include patterns (`filter`)
//! - Per-entry content fingerprinting (`fingerprint`)
//! - An indexed read-only view over one archive (`view`)
//! - The two-archive differencer, nested archives included (`diff`)
//! - Patch assembly into an output zip (`patch`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use jarpatch::patch::{self, PatchOptions, PatchOutcome};
//!
//! let opts = PatchOptions::default();
//! match patch::build_patch(
//!     Path::new("app-2.0.jar"),
//!     Path::new("app-1.0.jar"),
//!     Path::new("app-update.zip"),
//!     &opts,
//! )
//! .unwrap()
//! {
//!     PatchOutcome::Written(stats) => println!("patched {} entries", stats.changed_entries),
//!     PatchOutcome::NoDifference => println!("archives are identical"),
//! }
//! ```

pub mod diff;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod patch;
pub mod view;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
