//! Error types for runfiles resolution and artifact verification.
//!
//! - [`RunfilesError`]: initialization and lookup failures of the resolver
//! - [`VerifyError`]: failures of a single artifact check
//! - [`ConfigError`]: unusable expectation files

use std::path::PathBuf;

/// A malformed line in a manifest or repository-mapping file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// One-based line number.
    pub line: usize,
    /// What was wrong with the line.
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// Errors raised by the runfiles resolver.
///
/// `Initialization`, `Malformed` and `Io` only occur while constructing a
/// [`crate::runfiles::Runfiles`]; `InvalidPath` and `NotFound` only occur
/// during lookups.
#[derive(Debug, thiserror::Error)]
pub enum RunfilesError {
    /// No manifest and no usable runfiles directory could be found.
    #[error("cannot locate runfiles: {0}")]
    Initialization(String),

    /// A manifest or repository mapping could not be parsed.
    #[error("malformed runfiles file {path}: {source}")]
    Malformed {
        /// File being parsed.
        path: PathBuf,
        /// Offending line.
        #[source]
        source: ParseError,
    },

    /// A manifest or repository mapping exists but could not be read.
    #[error("cannot read runfiles file {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The logical path is not a well-formed runfile identifier.
    #[error("invalid logical path '{path}': {reason}")]
    InvalidPath {
        /// Logical path as supplied by the caller.
        path: String,
        /// Which rule it broke.
        reason: &'static str,
    },

    /// The logical path is not a declared runfile.
    #[error("runfile not found: '{path}' ({reason})")]
    NotFound {
        /// Logical path as supplied by the caller.
        path: String,
        /// Why the lookup failed.
        reason: String,
    },
}

impl RunfilesError {
    pub(crate) fn not_found(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Returns `true` for errors raised while constructing the resolver.
    #[must_use]
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::Initialization(_) | Self::Malformed { .. } | Self::Io { .. })
    }
}

/// Errors raised by a single verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The artifact could not be resolved to an existing file.
    #[error("resolve failed: {0}")]
    NotFound(#[from] RunfilesError),

    /// The artifact resolved but could not be read.
    #[error("read '{logical}' failed: {path}: {source}")]
    Read {
        /// Logical path of the artifact.
        logical: String,
        /// Resolved location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A required substring is absent.
    #[error("contains check on '{path}' failed: missing substring {missing:?}")]
    ContentMismatch {
        /// Logical path of the artifact.
        path: String,
        /// First substring that was not found.
        missing: String,
    },

    /// The artifact has zero bytes.
    #[error("non-empty check on '{path}' failed: artifact is empty (0 bytes)")]
    EmptyArtifact {
        /// Logical path of the artifact.
        path: String,
    },
}

/// Errors loading an expectation file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read expectation file {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for an expectation set.
    #[error("cannot parse expectation file {path}: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The file parsed but declares something unusable.
    #[error("invalid expectation: {0}")]
    Invalid(String),
}
