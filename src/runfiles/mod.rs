//! Runfile resolution: logical paths to absolute filesystem paths.
//!
//! A [`Runfiles`] is built once per process from either a manifest or a
//! runfiles directory, then passed by reference to whatever needs to find
//! files. It is immutable after construction and safe to share between
//! threads.
//!
//! ```text
//! env / argv0 ──discover──▶ Location ──load──▶ Runfiles
//!                                                 │  ▲
//!                          rlocation("repo/pkg/file") │  _repo_mapping
//!                                                 ▼
//!                                            /abs/path
//! ```

pub mod discovery;
pub mod logical_path;
pub mod manifest;
pub mod repo_mapping;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::ServiceContext;
use crate::error::RunfilesError;
use crate::ports::FileSystem;

pub use discovery::{Location, Mode};
pub use logical_path::LogicalPath;
pub use manifest::Manifest;
pub use repo_mapping::{RepoMapping, REPO_MAPPING_FILE};

/// How logical paths are turned into filesystem paths.
#[derive(Debug, Clone)]
enum Strategy {
    Manifest { path: PathBuf, entries: Manifest },
    Directory(PathBuf),
}

/// Runfiles resolver.
pub struct Runfiles {
    strategy: Strategy,
    repo_mapping: RepoMapping,
    source_repository: String,
    fs: Arc<dyn FileSystem>,
}

impl fmt::Debug for Runfiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runfiles")
            .field("strategy", &self.strategy)
            .field("repo_mapping", &self.repo_mapping)
            .field("source_repository", &self.source_repository)
            .finish_non_exhaustive()
    }
}

impl Runfiles {
    /// Discovers runfiles for a binary from the context's environment.
    ///
    /// # Errors
    ///
    /// Returns an initialization error when nothing usable is found or the
    /// manifest/mapping cannot be read or parsed.
    pub fn create(ctx: &ServiceContext) -> Result<Self, RunfilesError> {
        Self::discover(ctx, Mode::Binary)
    }

    /// Discovers runfiles for a test, additionally honoring `TEST_SRCDIR`.
    ///
    /// # Errors
    ///
    /// Same as [`Runfiles::create`].
    pub fn create_for_test(ctx: &ServiceContext) -> Result<Self, RunfilesError> {
        Self::discover(ctx, Mode::Test)
    }

    fn discover(ctx: &ServiceContext, mode: Mode) -> Result<Self, RunfilesError> {
        let location = discovery::discover(ctx.fs.as_ref(), ctx.env.as_ref(), mode)?;
        Self::load(Arc::clone(&ctx.fs), location)
    }

    /// Uses an explicit manifest file.
    ///
    /// # Errors
    ///
    /// Returns an initialization error if the manifest cannot be read or
    /// parsed.
    pub fn from_manifest(
        ctx: &ServiceContext,
        path: impl Into<PathBuf>,
    ) -> Result<Self, RunfilesError> {
        Self::load(Arc::clone(&ctx.fs), Location::Manifest(path.into()))
    }

    /// Uses an explicit runfiles directory.
    ///
    /// # Errors
    ///
    /// Returns an initialization error if `path` is not a directory.
    pub fn from_directory(
        ctx: &ServiceContext,
        path: impl Into<PathBuf>,
    ) -> Result<Self, RunfilesError> {
        Self::load(Arc::clone(&ctx.fs), Location::Directory(path.into()))
    }

    fn load(fs: Arc<dyn FileSystem>, location: Location) -> Result<Self, RunfilesError> {
        let absolute = |path: PathBuf| fs.absolute(&path).map_err(|e| RunfilesError::io(&path, e));
        let (strategy, mapping_path) = match location {
            Location::Manifest(path) => {
                let path = absolute(path)?;
                let text = fs.read_to_string(&path).map_err(|e| RunfilesError::io(&path, e))?;
                let entries = Manifest::parse(&text).map_err(|source| RunfilesError::Malformed {
                    path: path.clone(),
                    source,
                })?;
                if entries.is_empty() {
                    tracing::warn!(manifest = %path.display(), "runfiles manifest has no entries");
                }
                tracing::debug!(
                    manifest = %path.display(),
                    entries = entries.len(),
                    "loaded runfiles manifest"
                );
                let mapping_path = entries.get(REPO_MAPPING_FILE).map(Path::to_path_buf);
                (Strategy::Manifest { path, entries }, mapping_path)
            }
            Location::Directory(path) => {
                let path = absolute(path)?;
                if !fs.is_dir(&path) {
                    return Err(RunfilesError::Initialization(format!(
                        "runfiles directory {} does not exist",
                        path.display()
                    )));
                }
                let mapping_path = path.join(REPO_MAPPING_FILE);
                (Strategy::Directory(path), Some(mapping_path))
            }
        };

        let repo_mapping = match mapping_path {
            Some(path) if fs.is_file(&path) => {
                let text = fs.read_to_string(&path).map_err(|e| RunfilesError::io(&path, e))?;
                RepoMapping::parse(&text)
                    .map_err(|source| RunfilesError::Malformed { path, source })?
            }
            _ => RepoMapping::default(),
        };

        Ok(Self {
            strategy,
            repo_mapping,
            source_repository: String::new(),
            fs,
        })
    }

    /// Resolves logical paths as seen from `repository` instead of the main
    /// repository. Only matters when a repository mapping is present.
    #[must_use]
    pub fn with_source_repository(mut self, repository: impl Into<String>) -> Self {
        self.source_repository = repository.into();
        self
    }

    /// Resolves a logical path to an absolute path that exists right now.
    ///
    /// Manifest lookups are exact-match. Directory lookups join the logical
    /// segments onto the runfiles directory. Nothing else is searched.
    ///
    /// # Errors
    ///
    /// Returns [`RunfilesError::InvalidPath`] for malformed input and
    /// [`RunfilesError::NotFound`] when the path is not a declared runfile or
    /// its target is missing.
    pub fn rlocation(&self, path: &str) -> Result<PathBuf, RunfilesError> {
        let logical = LogicalPath::parse(path)?;
        let mapped = self.repo_mapping.apply(&self.source_repository, &logical);
        if mapped != logical {
            tracing::trace!(from = %logical, to = %mapped, "applied repository mapping");
        }

        let candidate = match &self.strategy {
            Strategy::Manifest { entries, .. } => entries
                .get(mapped.as_str())
                .map(Path::to_path_buf)
                .ok_or_else(|| RunfilesError::not_found(path, "no manifest entry"))?,
            Strategy::Directory(dir) => {
                mapped.segments().fold(dir.clone(), |acc, s| acc.join(s))
            }
        };
        if candidate.as_os_str().is_empty() {
            return Err(RunfilesError::not_found(path, "manifest entry has no target"));
        }

        // Manifest targets are normally absolute already.
        let candidate = self
            .fs
            .absolute(&candidate)
            .map_err(|e| RunfilesError::not_found(path, e.to_string()))?;
        if !self.fs.exists(&candidate) {
            return Err(RunfilesError::not_found(
                path,
                format!("{} does not exist", candidate.display()),
            ));
        }
        tracing::debug!(logical = path, resolved = %candidate.display(), "resolved runfile");
        Ok(candidate)
    }

    /// Where this resolver reads runfiles from.
    #[must_use]
    pub fn location(&self) -> Location {
        match &self.strategy {
            Strategy::Manifest { path, .. } => Location::Manifest(path.clone()),
            Strategy::Directory(dir) => Location::Directory(dir.clone()),
        }
    }

    /// Environment variables that let a child process find the same
    /// runfiles.
    #[must_use]
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        let display = |p: &Path| p.display().to_string();
        match &self.strategy {
            Strategy::Manifest { path, .. } => {
                let mut vars = vec![(discovery::RUNFILES_MANIFEST_FILE, display(path))];
                if let Some(dir) = manifest::directory_for_manifest(path) {
                    vars.push((discovery::RUNFILES_DIR, display(&dir)));
                    vars.push((discovery::JAVA_RUNFILES, display(&dir)));
                }
                vars
            }
            Strategy::Directory(dir) => vec![
                (discovery::RUNFILES_DIR, display(dir)),
                (discovery::JAVA_RUNFILES, display(dir)),
            ],
        }
    }
}
