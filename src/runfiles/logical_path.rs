//! Validated logical runfile paths.

use std::fmt;

use crate::error::RunfilesError;

/// A workspace-relative, forward-slash-separated runfile identifier such as
/// `rules_flex/tests/genrule_output.c`.
///
/// The first segment names the repository; the remainder is the
/// package-qualified file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Validates `raw` as a logical path.
    ///
    /// # Errors
    ///
    /// Returns [`RunfilesError::InvalidPath`] when `raw` is empty, absolute,
    /// uses backslashes, or contains empty, `.` or `..` segments.
    pub fn parse(raw: &str) -> Result<Self, RunfilesError> {
        let invalid = |reason| Err(RunfilesError::InvalidPath { path: raw.to_string(), reason });

        if raw.is_empty() {
            return invalid("must not be empty");
        }
        if raw.starts_with('/') || has_drive_prefix(raw) {
            return invalid("must be relative");
        }
        if raw.contains('\\') {
            return invalid("must use forward slashes");
        }
        for segment in raw.split('/') {
            match segment {
                "" => return invalid("must not contain empty segments"),
                "." => return invalid("must not contain '.' segments"),
                ".." => return invalid("must not contain '..' segments"),
                _ => {}
            }
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the path as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Returns the repository segment and the remainder, if any.
    #[must_use]
    pub fn split_repository(&self) -> (&str, Option<&str>) {
        match self.0.split_once('/') {
            Some((repo, rest)) => (repo, Some(rest)),
            None => (&self.0, None),
        }
    }

    /// Returns a copy with the repository segment replaced.
    #[must_use]
    pub(crate) fn with_repository(&self, repository: &str) -> Self {
        match self.split_repository() {
            (_, Some(rest)) => Self(format!("{repository}/{rest}")),
            (_, None) => Self(repository.to_string()),
        }
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
