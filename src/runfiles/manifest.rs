//! Runfiles manifest parsing.
//!
//! A manifest maps logical paths to absolute paths, one entry per line:
//!
//! ```text
//! rules_flex/tests/genrule_output.c /home/u/.cache/out/rules_flex/tests/genrule_output.c
//! ```
//!
//! The entry splits at the first space. Lines whose logical path contains a
//! space, newline or backslash are written escaped: the line starts with a
//! single space, the logical path escapes those characters as `\s`, `\n` and
//! `\b`, and the target escapes `\n` and `\b`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ParseError;

/// Parsed manifest: an exact-match table from logical path to target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, PathBuf>,
}

impl Manifest {
    /// Parses manifest text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for a line without a separator, an empty
    /// logical path, or a logical path mapped to two different targets.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut entries: BTreeMap<String, PathBuf> = BTreeMap::new();
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (key, value) = if let Some(escaped) = line.strip_prefix(' ') {
                let (key, value) = split_entry(escaped, line_no)?;
                (unescape(key, true), unescape(value, false))
            } else {
                let (key, value) = split_entry(line, line_no)?;
                (key.to_string(), value.to_string())
            };

            if key.is_empty() {
                return Err(ParseError::new(line_no, "empty logical path"));
            }
            let target = PathBuf::from(value);
            if let Some(previous) = entries.get(&key) {
                if previous != &target {
                    return Err(ParseError::new(
                        line_no,
                        format!(
                            "'{key}' mapped to both {} and {}",
                            previous.display(),
                            target.display()
                        ),
                    ));
                }
                continue;
            }
            entries.insert(key, target);
        }
        Ok(Self { entries })
    }

    /// Looks up a logical path. Exact match only.
    #[must_use]
    pub fn get(&self, logical: &str) -> Option<&Path> {
        self.entries.get(logical).map(PathBuf::as_path)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the runfiles directory that sits next to a manifest, following
/// the `<dir>/MANIFEST` and `<name>.runfiles_manifest` layouts.
#[must_use]
pub fn directory_for_manifest(manifest: &Path) -> Option<PathBuf> {
    let name = manifest.file_name()?.to_str()?;
    if name == "MANIFEST" {
        let parent = manifest.parent()?;
        if parent.extension().is_some_and(|ext| ext == "runfiles") {
            return Some(parent.to_path_buf());
        }
        return None;
    }
    let stem = name.strip_suffix(".runfiles_manifest")?;
    Some(manifest.with_file_name(format!("{stem}.runfiles")))
}

fn split_entry(line: &str, line_no: usize) -> Result<(&str, &str), ParseError> {
    line.split_once(' ')
        .ok_or_else(|| ParseError::new(line_no, "missing space between logical path and target"))
}

fn unescape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') if is_key => out.push(' '),
            Some('n') => out.push('\n'),
            Some('b') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
