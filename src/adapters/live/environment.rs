//! Live environment adapter using `std::env`.

use std::path::PathBuf;

use crate::ports::environment::Environment;

/// Reads variables and `argv[0]` from the running process.
pub struct LiveEnvironment;

impl Environment for LiveEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn argv0(&self) -> Option<PathBuf> {
        std::env::args_os().next().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv0_is_present() {
        assert!(LiveEnvironment.argv0().is_some());
    }

    #[test]
    fn unset_variable_is_none() {
        assert!(LiveEnvironment.var("RUNCHECK_TEST_SURELY_UNSET_VARIABLE").is_none());
    }
}
