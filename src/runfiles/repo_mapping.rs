//! Repository mapping: apparent repository names to canonical names.
//!
//! The `_repo_mapping` file holds one `source,apparent,target` triple per
//! line. A logical path written against an apparent name (as seen from the
//! source repository) is rewritten to the canonical directory name before
//! lookup.

use std::collections::HashMap;

use crate::error::ParseError;

use super::logical_path::LogicalPath;

/// Logical path of the mapping file inside the runfiles tree.
pub const REPO_MAPPING_FILE: &str = "_repo_mapping";

/// Parsed repository mapping keyed by `(source, apparent)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMapping {
    entries: HashMap<(String, String), String>,
}

impl RepoMapping {
    /// Parses `_repo_mapping` text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for lines that do not have exactly three
    /// comma-separated fields or have an empty apparent name.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut entries = HashMap::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            let [source, apparent, target] = fields.as_slice() else {
                return Err(ParseError::new(
                    index + 1,
                    format!("expected 3 comma-separated fields, found {}", fields.len()),
                ));
            };
            if apparent.is_empty() {
                return Err(ParseError::new(index + 1, "empty apparent repository name"));
            }
            entries.insert(((*source).to_string(), (*apparent).to_string()), (*target).to_string());
        }
        Ok(Self { entries })
    }

    /// Returns `true` when no mappings are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the canonical name of `apparent` as seen from `source`.
    #[must_use]
    pub fn canonical(&self, source: &str, apparent: &str) -> Option<&str> {
        self.entries.get(&(source.to_string(), apparent.to_string())).map(String::as_str)
    }

    /// Rewrites the repository segment of `path`. Paths whose repository has
    /// no mapping are returned unchanged.
    #[must_use]
    pub fn apply(&self, source: &str, path: &LogicalPath) -> LogicalPath {
        let (apparent, _) = path.split_repository();
        match self.canonical(source, apparent) {
            Some(target) if target != apparent => path.with_repository(target),
            _ => path.clone(),
        }
    }
}
