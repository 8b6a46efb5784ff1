//! File system operations used by the comparator and the copy engine.
//!
//! Everything that touches file contents goes through [`FileSystem`] so
//! tests can count reads or simulate files locked by another process.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

/// Trait for the file operations the engine performs
///
/// Implement this trait to instrument or fake the file system (e.g., for testing).
pub trait FileSystem: Send + Sync {
    /// Size of a file in bytes
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Whether anything occupies this path
    fn exists(&self, path: &Path) -> bool;

    /// Open a file for sequential reading
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Create a directory and all of its parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy `from` to `to`, failing with `AlreadyExists` rather than
    /// overwriting an existing destination. Returns the bytes copied.
    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Whether the file carries the read-only attribute
    fn is_read_only(&self, path: &Path) -> io::Result<bool>;

    /// Delete a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<u64> {
        // Open the source first so a locked source never leaves an empty
        // destination behind
        let mut source = File::open(from)?;
        let modified = source.metadata()?.modified().ok();
        let mut dest = OpenOptions::new().write(true).create_new(true).open(to)?;

        let copied = match io::copy(&mut source, &mut dest) {
            Ok(copied) => copied,
            Err(e) => {
                drop(dest);
                let _ = fs::remove_file(to);
                return Err(e);
            }
        };

        if let Some(modified) = modified {
            if let Err(e) = dest.set_modified(modified) {
                tracing::debug!(path = %to.display(), error = %e, "could not carry over modified time");
            }
        }

        Ok(copied)
    }

    fn is_read_only(&self, path: &Path) -> io::Result<bool> {
        Ok(fs::metadata(path)?.permissions().readonly())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Whether an I/O error looks like another process holding the file
pub fn is_transient(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(error.raw_os_error(), Some(32) | Some(33))
}
