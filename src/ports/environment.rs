//! Environment port for process-level configuration.

use std::path::PathBuf;

/// Read access to the process environment.
///
/// Runfiles discovery is driven entirely by environment variables and the
/// program path, so both go through this port.
pub trait Environment: Send + Sync {
    /// Returns the value of an environment variable, or `None` when unset
    /// or not valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the path the current program was invoked as (`argv[0]`).
    fn argv0(&self) -> Option<PathBuf>;

    /// Returns the variable's value when it is set and non-empty.
    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}
