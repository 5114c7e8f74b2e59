//! Expectation sets: which artifacts to check and how.
//!
//! Mirrors the YAML expectation file:
//!
//! ```yaml
//! artifacts:
//!   - path: rules_flex/tests/genrule_output.c
//!     checks:
//!       - type: contains
//!         substrings: ["/* A lexical scanner generated by flex */", "void yyrestart"]
//!   - path: rules_flex/tests/hello_c_bin
//!     executable: true
//!     checks:
//!       - type: non_empty
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ports::FileSystem;

/// A single check against an artifact's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Every substring must occur somewhere in the artifact.
    Contains {
        /// Substrings to look for, in no particular order.
        substrings: Vec<String>,
    },
    /// The artifact must have at least one byte.
    NonEmpty,
}

/// Checks bound to one logical path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// Logical path of the artifact.
    pub path: String,
    /// Whether the host executable suffix is appended before resolution.
    #[serde(default)]
    pub executable: bool,
    /// Checks to run, in order.
    pub checks: Vec<Check>,
}

/// All expectations declared for one verification run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpectationSet {
    /// Artifacts to check, in order.
    pub artifacts: Vec<Expectation>,
}

impl ExpectationSet {
    /// Parses and validates YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML and
    /// [`ConfigError::Invalid`] for an empty set, an artifact without checks,
    /// or a `contains` check without substrings.
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        let set: Self = serde_yaml::from_str(yaml)
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })?;
        set.validate()?;
        Ok(set)
    }

    /// Reads, parses and validates an expectation file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`ExpectationSet::from_yaml`].
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs
            .read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_yaml(&yaml, path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.artifacts.is_empty() {
            return Err(ConfigError::Invalid("no artifacts declared".to_string()));
        }
        for artifact in &self.artifacts {
            if artifact.path.is_empty() {
                return Err(ConfigError::Invalid("artifact with empty path".to_string()));
            }
            if artifact.checks.is_empty() {
                return Err(ConfigError::Invalid(format!("'{}' declares no checks", artifact.path)));
            }
            for check in &artifact.checks {
                if let Check::Contains { substrings } = check {
                    if substrings.is_empty() {
                        return Err(ConfigError::Invalid(format!(
                            "'{}' has a contains check with no substrings",
                            artifact.path
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
