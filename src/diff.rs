// The differencer: computes changed and deleted entry sets between two
// indexed archive views.
//
// Two separate passes, not one merge: "changed" is defined relative to the
// new view's entries and "deleted" relative to the old view's. Entries whose
// names carry an archive suffix are nested archives and are compared
// atomically: the parent entry name is reported, never the paths inside it.

use log::{debug, trace};

use crate::error::Result;
use crate::view::ArchiveView;

/// Name suffixes that mark an entry as a nested archive. Case-sensitive,
/// matching how the entries are produced by the packaging tools.
pub const ARCHIVE_SUFFIXES: [&str; 3] = [".jar", ".war", ".zip"];

/// Classifies an entry name as a nested archive. A pure check on the name
/// suffix; the entry's bytes are never consulted.
pub fn is_nested_archive(name: &str) -> bool {
    ARCHIVE_SUFFIXES.iter().any(|s| name.ends_with(s))
}

// ---------------------------------------------------------------------------
// Changed set
// ---------------------------------------------------------------------------

/// Returns the names of entries in `new` that are absent from `old`, have a
/// different fingerprint, or (for nested archives) differ after recursive
/// comparison. Order follows `new`'s index order.
///
/// Both views must already be indexed with identical filter configuration;
/// comparing views indexed under different filters is a caller error this
/// function does not detect.
pub fn changed_entries(new: &mut ArchiveView, old: &mut ArchiveView) -> Result<Vec<String>> {
    debug_assert!(new.is_indexed() && old.is_indexed());
    let names: Vec<String> = new.indexed_names().map(str::to_string).collect();
    let mut changed = Vec::new();

    for name in names {
        let differs = if is_nested_archive(&name) {
            nested_archive_changed(new, old, &name)?
        } else {
            // Absent from old, or content fingerprint differs.
            new.fingerprint(&name) != old.fingerprint(&name)
        };
        if differs {
            changed.push(name);
        }
    }

    debug!(
        "{} changed entries ({} vs {})",
        changed.len(),
        new.path().display(),
        old.path().display()
    );
    Ok(changed)
}

/// Compares one nested-archive entry across the two views.
///
/// The extracted temp files and the child views live only for the duration
/// of this call; the `NamedTempFile` guards delete the files on every exit
/// path, including early error returns.
fn nested_archive_changed(
    new: &mut ArchiveView,
    old: &mut ArchiveView,
    name: &str,
) -> Result<bool> {
    let Some(new_tmp) = new.extract_entry(name)? else {
        // Indexed name no longer extractable; treat as no difference, the
        // deleted pass owns disappearance reporting.
        return Ok(false);
    };
    let Some(old_tmp) = old.extract_entry(name)? else {
        trace!("nested archive '{name}' absent from old view");
        return Ok(true);
    };

    let mut child_new = ArchiveView::open(new_tmp.path(), new.filter().clone())?;
    let mut child_old = ArchiveView::open(old_tmp.path(), new.filter().clone())?;
    child_new.index()?;
    child_old.index()?;

    if child_new.entry_count() != child_old.entry_count() {
        trace!("nested archive '{name}' differs in entry count");
        return Ok(true);
    }
    let inner_changed = changed_entries(&mut child_new, &mut child_old)?;
    trace!(
        "nested archive '{name}': {} changed entries inside",
        inner_changed.len()
    );
    Ok(!inner_changed.is_empty())
}

// ---------------------------------------------------------------------------
// Deleted set
// ---------------------------------------------------------------------------

/// Returns the names of entries present in `old` (after filtering) but
/// absent from `new`. Order follows `old`'s index order.
///
/// Nested archives are treated atomically here as well: a nested archive is
/// deleted only when it disappears wholesale, never expanded into per-entry
/// deletions of its contents.
pub fn deleted_entries(old: &mut ArchiveView, new: &mut ArchiveView) -> Result<Vec<String>> {
    debug_assert!(new.is_indexed() && old.is_indexed());
    let names: Vec<String> = old.indexed_names().map(str::to_string).collect();
    let mut deleted = Vec::new();

    for name in names {
        let gone = if is_nested_archive(&name) {
            // Existence check on raw entries, bypassing the filter, so a
            // nested archive is tracked even when extraction is the only
            // way to see it.
            match new.extract_entry(&name)? {
                Some(_tmp) => false,
                None => old.extract_entry(&name)?.is_some(),
            }
        } else {
            !new.contains(&name)
        };
        if gone {
            deleted.push(name);
        }
    }

    debug!(
        "{} deleted entries ({} vs {})",
        deleted.len(),
        new.path().display(),
        old.path().display()
    );
    Ok(deleted)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
