//! Filesystem port for read-only artifact access.

use std::io;
use std::path::{Path, PathBuf};

/// Provides read-only filesystem access for runfiles and artifacts.
///
/// Reads are binary-safe: no newline translation or encoding checks happen
/// at this boundary.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Returns `true` if the path names an existing file or directory.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path names an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Makes a path absolute against the current directory without touching
    /// the filesystem. Absolute paths are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    fn absolute(&self, path: &Path) -> io::Result<PathBuf>;

    /// Returns `true` if the path names an existing regular file.
    fn is_file(&self, path: &Path) -> bool {
        self.exists(path) && !self.is_dir(path)
    }
}
