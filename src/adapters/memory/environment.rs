//! In-memory environment.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ports::environment::Environment;

/// Environment backed by a map, with an optional `argv[0]`.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
    argv0: Option<PathBuf>,
}

impl MemoryEnvironment {
    /// Creates an empty environment with no `argv[0]`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Sets the program path.
    #[must_use]
    pub fn with_argv0(mut self, argv0: impl Into<PathBuf>) -> Self {
        self.argv0 = Some(argv0.into());
        self
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn argv0(&self) -> Option<PathBuf> {
        self.argv0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_var_ignores_blank_values() {
        let env = MemoryEnvironment::new().with_var("A", "").with_var("B", "x");
        assert_eq!(env.var("A").as_deref(), Some(""));
        assert!(env.non_empty_var("A").is_none());
        assert_eq!(env.non_empty_var("B").as_deref(), Some("x"));
        assert!(env.var("C").is_none());
    }
}
