//! Locating the manifest or runfiles directory from the environment.

use std::path::{Path, PathBuf};

use crate::error::RunfilesError;
use crate::ports::{Environment, FileSystem};

/// Path to a runfiles manifest file.
pub const RUNFILES_MANIFEST_FILE: &str = "RUNFILES_MANIFEST_FILE";
/// Path to a runfiles directory.
pub const RUNFILES_DIR: &str = "RUNFILES_DIR";
/// Runfiles root set by test runners.
pub const TEST_SRCDIR: &str = "TEST_SRCDIR";
/// When `1`, only manifests are considered.
pub const RUNFILES_MANIFEST_ONLY: &str = "RUNFILES_MANIFEST_ONLY";
/// Runfiles directory variable exported for JVM children.
pub const JAVA_RUNFILES: &str = "JAVA_RUNFILES";

/// Where runfiles were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A manifest file mapping logical paths to targets.
    Manifest(PathBuf),
    /// A directory laid out by logical path.
    Directory(PathBuf),
}

/// Which execution context to discover runfiles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A binary started directly or by another tool.
    Binary,
    /// A test started by the build system's test runner; also honors
    /// `TEST_SRCDIR`.
    Test,
}

/// Finds runfiles for the current process.
///
/// Candidates are tried in order: `RUNFILES_MANIFEST_FILE`, `RUNFILES_DIR`,
/// `TEST_SRCDIR` (test mode only), then `<argv0>.runfiles_manifest`,
/// `<argv0>.runfiles/MANIFEST` and `<argv0>.runfiles`. Directory candidates
/// are skipped when `RUNFILES_MANIFEST_ONLY=1`.
///
/// # Errors
///
/// Returns [`RunfilesError::Initialization`] listing every candidate tried
/// when none is usable.
pub fn discover(
    fs: &dyn FileSystem,
    env: &dyn Environment,
    mode: Mode,
) -> Result<Location, RunfilesError> {
    let manifest_only = env.var(RUNFILES_MANIFEST_ONLY).as_deref() == Some("1");
    let mut tried = Vec::new();

    let mut candidates = Vec::new();
    if let Some(manifest) = env.non_empty_var(RUNFILES_MANIFEST_FILE) {
        candidates.push(Location::Manifest(PathBuf::from(manifest)));
    }
    if let Some(dir) = env.non_empty_var(RUNFILES_DIR) {
        candidates.push(Location::Directory(PathBuf::from(dir)));
    }
    if mode == Mode::Test {
        if let Some(dir) = env.non_empty_var(TEST_SRCDIR) {
            candidates.push(Location::Directory(PathBuf::from(dir)));
        }
    }
    if let Some(argv0) = env.argv0().filter(|p| !p.as_os_str().is_empty()) {
        candidates.extend(argv0_candidates(&argv0));
    }

    for candidate in candidates {
        match &candidate {
            Location::Manifest(path) => {
                if fs.is_file(path) {
                    tracing::debug!(manifest = %path.display(), "using runfiles manifest");
                    return Ok(candidate);
                }
                tried.push(format!("manifest {}", path.display()));
            }
            Location::Directory(path) => {
                if manifest_only {
                    continue;
                }
                if fs.is_dir(path) {
                    tracing::debug!(directory = %path.display(), "using runfiles directory");
                    return Ok(candidate);
                }
                tried.push(format!("directory {}", path.display()));
            }
        }
    }

    let detail = if tried.is_empty() {
        format!("none of {RUNFILES_MANIFEST_FILE}, {RUNFILES_DIR} is set and argv[0] is unknown")
    } else {
        format!("tried {}", tried.join(", "))
    };
    Err(RunfilesError::Initialization(detail))
}

fn argv0_candidates(argv0: &Path) -> [Location; 3] {
    let with_suffix = |suffix: &str| {
        let mut os = argv0.as_os_str().to_os_string();
        os.push(suffix);
        PathBuf::from(os)
    };
    [
        Location::Manifest(with_suffix(".runfiles_manifest")),
        Location::Manifest(with_suffix(".runfiles").join("MANIFEST")),
        Location::Directory(with_suffix(".runfiles")),
    ]
}
