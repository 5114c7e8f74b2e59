//! Service context bundling all port trait objects.

use std::sync::Arc;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::environment::LiveEnvironment;
use crate::adapters::live::filesystem::LiveFileSystem;
#[cfg(test)]
use crate::adapters::memory::{FixedClock, MemoryEnvironment, MemoryFileSystem};
use crate::ports::clock::Clock;
use crate::ports::environment::Environment;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Ports are shared
/// through `Arc` so a [`crate::runfiles::Runfiles`] built from the context
/// can keep its own handle to the filesystem.
#[derive(Clone)]
pub struct ServiceContext {
    /// Clock for timestamping reports.
    pub clock: Arc<dyn Clock>,
    /// Filesystem for manifests and artifacts.
    pub fs: Arc<dyn FileSystem>,
    /// Process environment for runfiles discovery and configuration.
    pub env: Arc<dyn Environment>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, fs: Arc<dyn FileSystem>, env: Arc<dyn Environment>) -> Self {
        Self { clock, fs, env }
    }

    /// Creates a live context backed by the real clock, disk and process
    /// environment.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Arc::new(LiveClock), Arc::new(LiveFileSystem), Arc::new(LiveEnvironment))
    }

    /// Creates a context over in-memory adapters, with the clock pinned to
    /// 2024-01-01T00:00:00Z.
    #[cfg(test)]
    #[must_use]
    pub fn in_memory(fs: MemoryFileSystem, env: MemoryEnvironment) -> Self {
        use chrono::TimeZone;

        let epoch = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Self::new(Arc::new(FixedClock(epoch)), Arc::new(fs), Arc::new(env))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn in_memory_context_uses_given_adapters() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/rf/MANIFEST", "pkg/a /abs/a\n");
        let env = MemoryEnvironment::new().with_var("RUNFILES_DIR", "/rf");
        let ctx = ServiceContext::in_memory(fs, env);

        assert!(ctx.fs.is_file(Path::new("/rf/MANIFEST")));
        assert_eq!(ctx.env.var("RUNFILES_DIR").as_deref(), Some("/rf"));
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn clones_share_ports() {
        let ctx = ServiceContext::in_memory(MemoryFileSystem::new(), MemoryEnvironment::new());
        let copy = ctx.clone();
        assert!(Arc::ptr_eq(&ctx.fs, &copy.fs));
    }
}
