// Entry-name filtering for archive comparison.
//
// An `EntryFilter` decides, per entry name, whether the entry takes part in
// comparison at all. Exclude patterns are regular expressions matched against
// the full entry name (full-match, not substring). Entries excluded by a
// pattern can be re-included through a separate meta-include pattern list.

use regex::Regex;

use crate::error::{Error, Result};

/// Exclude pattern applied when the caller supplies none of their own:
/// every entry under the archive metadata directory.
pub const DEFAULT_EXCLUDE: &str = "META-INF.*";

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// One compiled filter pattern. Keeps the caller's original text for error
/// messages and display.
#[derive(Debug, Clone)]
struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `raw` with full-match semantics by anchoring the pattern.
    /// `Regex::is_match` alone is a substring search, which would make
    /// `\.gif` exclude `logo.gif.txt` as well.
    fn compile(raw: &str) -> Result<Self> {
        let regex =
            Regex::new(&format!("^(?:{raw})$")).map_err(|e| Error::InvalidPattern {
                pattern: raw.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

// ---------------------------------------------------------------------------
// EntryFilter
// ---------------------------------------------------------------------------

/// Immutable filter configuration shared by the two archive views of one
/// comparison (and by any child views built for nested archives).
#[derive(Debug, Clone)]
pub struct EntryFilter {
    excludes: Vec<Pattern>,
    meta_includes: Vec<Pattern>,
}

impl EntryFilter {
    /// Builds a filter from caller-supplied pattern lists.
    ///
    /// The supplied excludes extend the built-in [`DEFAULT_EXCLUDE`]; with
    /// both lists empty the filter excludes exactly the metadata directory.
    /// Malformed patterns fail here with [`Error::InvalidPattern`], not
    /// later at match time.
    pub fn new<S: AsRef<str>>(excludes: &[S], meta_includes: &[S]) -> Result<Self> {
        let mut compiled = vec![Pattern::compile(DEFAULT_EXCLUDE)?];
        for pattern in excludes {
            compiled.push(Pattern::compile(pattern.as_ref())?);
        }
        let mut includes = Vec::with_capacity(meta_includes.len());
        for pattern in meta_includes {
            includes.push(Pattern::compile(pattern.as_ref())?);
        }
        Ok(Self {
            excludes: compiled,
            meta_includes: includes,
        })
    }

    /// Decides whether the named entry participates in comparison.
    ///
    /// A name matching no exclude pattern is included. A name matching an
    /// exclude pattern is still included when it also matches at least one
    /// meta-include pattern.
    pub fn includes(&self, name: &str) -> bool {
        if !self.excludes.iter().any(|p| p.matches(name)) {
            return true;
        }
        self.meta_includes.iter().any(|p| p.matches(name))
    }

    /// The exclude patterns, in configuration order, as supplied.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(|p| p.raw.as_str())
    }
}

impl Default for EntryFilter {
    /// The default filter: exclude metadata entries, no override list.
    fn default() -> Self {
        Self::new::<&str>(&[], &[]).expect("default exclude pattern is valid")
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Splits a comma-separated pattern list into individual patterns, trimming
/// surrounding whitespace per item and dropping empty items. An empty input
/// yields zero patterns, meaning "exclude nothing" (or "no override list"),
/// not an error.
pub fn tokenize_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_metadata_only() {
        let filter = EntryFilter::default();
        assert!(!filter.includes("META-INF/MANIFEST.MF"));
        assert!(!filter.includes("META-INF/"));
        assert!(filter.includes("com/example/App.class"));
        assert!(filter.includes("test/test1.txt"));
    }

    #[test]
    fn full_match_not_substring() {
        let filter = EntryFilter::new(&[r".+\.gif"], &[]).unwrap();
        assert!(!filter.includes("img/logo.gif"));
        // Substring semantics would exclude this one too.
        assert!(filter.includes("img/logo.gif.txt"));
    }

    #[test]
    fn custom_excludes_extend_the_default() {
        let filter = EntryFilter::new(&[r"doc/.*"], &[]).unwrap();
        assert!(!filter.includes("doc/readme.txt"));
        assert!(!filter.includes("META-INF/MANIFEST.MF"));
        assert!(filter.includes("src/main.rs"));
    }

    #[test]
    fn meta_include_overrides_exclusion() {
        let filter = EntryFilter::new(&[], &[r"META-INF/services/.*"]).unwrap();
        assert!(filter.includes("META-INF/services/java.sql.Driver"));
        assert!(!filter.includes("META-INF/MANIFEST.MF"));
    }

    #[test]
    fn meta_include_without_matching_exclude_changes_nothing() {
        let filter = EntryFilter::new(&[], &[r"other/.*"]).unwrap();
        assert!(filter.includes("other/file.txt")); // included anyway
        assert!(!filter.includes("META-INF/MANIFEST.MF"));
    }

    #[test]
    fn malformed_pattern_fails_at_configuration_time() {
        let err = EntryFilter::new(&[r"(["], &[]).unwrap_err();
        match err {
            Error::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(["),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tokenize_trims_and_drops_empty_items() {
        assert_eq!(
            tokenize_patterns(" a , b,c ,, "),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(tokenize_patterns("").is_empty());
        assert!(tokenize_patterns(" , ,").is_empty());
    }
}
