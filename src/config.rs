//! Runtime configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file at
//! startup) and are overridden by command-line flags.

use std::path::PathBuf;

use crate::context::ServiceContext;
use crate::error::RunfilesError;
use crate::ports::Environment;
use crate::runfiles::Runfiles;

/// Overrides the host executable suffix.
pub const EXE_SUFFIX_VAR: &str = "RUNCHECK_EXE_SUFFIX";

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Suffix appended to executable artifact paths (`.exe` on Windows,
    /// empty elsewhere).
    pub exe_suffix: String,
    /// Explicit manifest, bypassing discovery.
    pub manifest: Option<PathBuf>,
    /// Explicit runfiles directory, bypassing discovery.
    pub runfiles_dir: Option<PathBuf>,
    /// Discover runfiles as a test (honors `TEST_SRCDIR`).
    pub for_test: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exe_suffix: std::env::consts::EXE_SUFFIX.to_string(),
            manifest: None,
            runfiles_dir: None,
            for_test: false,
        }
    }
}

impl Config {
    /// Reads configuration from the environment.
    #[must_use]
    pub fn from_env(env: &dyn Environment) -> Self {
        let mut config = Self::default();
        if let Some(suffix) = env.var(EXE_SUFFIX_VAR) {
            config.exe_suffix = suffix;
        }
        config
    }

    /// Appends the executable suffix to a logical path.
    #[must_use]
    pub fn executable_path(&self, logical: &str) -> String {
        format!("{logical}{}", self.exe_suffix)
    }

    /// Builds the resolver this configuration asks for. An explicit manifest
    /// takes precedence over an explicit directory; with neither, runfiles
    /// are discovered from the environment.
    ///
    /// # Errors
    ///
    /// Returns an initialization error from the resolver.
    pub fn open_runfiles(&self, ctx: &ServiceContext) -> Result<Runfiles, RunfilesError> {
        match (&self.manifest, &self.runfiles_dir) {
            (Some(manifest), _) => Runfiles::from_manifest(ctx, manifest),
            (None, Some(dir)) => Runfiles::from_directory(ctx, dir),
            (None, None) if self.for_test => Runfiles::create_for_test(ctx),
            (None, None) => Runfiles::create(ctx),
        }
    }
}
