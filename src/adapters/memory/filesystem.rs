//! In-memory filesystem.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::ports::filesystem::FileSystem;

/// Filesystem holding files in a map. Directories exist implicitly as the
/// ancestors of stored files, or explicitly via [`MemoryFileSystem::add_dir`].
/// Relative paths are made absolute against `/work` unless
/// [`MemoryFileSystem::with_cwd`] says otherwise.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<Vec<PathBuf>>,
    unreadable: RwLock<Vec<PathBuf>>,
    cwd: Option<PathBuf>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory relative paths are resolved against.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Stores a file, replacing any previous contents.
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files
            .write()
            .expect("files lock poisoned")
            .insert(path.into(), contents.into());
    }

    /// Declares an empty directory.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.dirs.write().expect("dirs lock poisoned").push(path.into());
    }

    /// Stores a file that exists but fails every read with `PermissionDenied`.
    pub fn add_unreadable(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.add_file(path.clone(), Vec::new());
        self.unreadable.write().expect("unreadable lock poisoned").push(path);
    }

    fn rooted(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.cwd.as_deref().unwrap_or(Path::new("/work")).join(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let path = &self.rooted(path);
        let unreadable = self.unreadable.read().expect("unreadable lock poisoned");
        if unreadable.iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        self.files
            .read()
            .expect("files lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", path.display()),
                )
            })
    }

    fn exists(&self, path: &Path) -> bool {
        let path = &self.rooted(path);
        self.files.read().expect("files lock poisoned").contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = &self.rooted(path);
        let dirs = self.dirs.read().expect("dirs lock poisoned");
        dirs.iter().any(|d| d == path || d.starts_with(path))
            || self
                .files
                .read()
                .expect("files lock poisoned")
                .keys()
                .any(|k| k.starts_with(path) && k != path)
    }

    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(self.rooted(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_of_files_are_directories() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/rf/pkg/out.c", "x");

        assert!(fs.is_dir(Path::new("/rf")));
        assert!(fs.is_dir(Path::new("/rf/pkg")));
        assert!(fs.is_file(Path::new("/rf/pkg/out.c")));
        assert!(!fs.exists(Path::new("/rf/pkg/other.c")));
    }

    #[test]
    fn unreadable_file_exists_but_fails_to_read() {
        let fs = MemoryFileSystem::new();
        fs.add_unreadable("/rf/locked");

        assert!(fs.exists(Path::new("/rf/locked")));
        let err = fs.read(Path::new("/rf/locked")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn relative_paths_join_the_working_directory() {
        let fs = MemoryFileSystem::new();
        assert_eq!(fs.absolute(Path::new("rf")).unwrap(), Path::new("/work/rf"));
        assert_eq!(fs.absolute(Path::new("/abs/rf")).unwrap(), Path::new("/abs/rf"));

        let fs = MemoryFileSystem::new().with_cwd("/home/u");
        fs.add_file("/home/u/rf/MANIFEST", "");
        assert_eq!(fs.absolute(Path::new("rf")).unwrap(), Path::new("/home/u/rf"));
        assert!(fs.is_dir(Path::new("rf")));
        assert!(fs.is_file(Path::new("rf/MANIFEST")));
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/bin", vec![0xff, 0xfe]);
        assert!(fs.read(Path::new("/bin")).is_ok());
        assert_eq!(
            fs.read_to_string(Path::new("/bin")).unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
    }
}
