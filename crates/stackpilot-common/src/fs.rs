//! Filesystem capability.
//!
//! Components never touch `std::fs` directly; they receive a
//! [`FileSystem`] so tests can substitute [`MemoryFs`].

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Read-only filesystem operations needed to resolve and parse a project.
pub trait FileSystem {
    /// Reads a whole file as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file is missing or unreadable.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Returns `true` for regular files and symbolic links.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` for directories (symbolic links are not followed).
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory or a link to one.
    fn resolves_to_dir(&self, path: &Path) -> bool {
        self.is_dir(path)
    }

    /// Lists the entries of a directory as full paths, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be listed.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Lists the files (see [`FileSystem::is_file`]) directly under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be listed.
    fn files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(self
            .read_dir(dir)?
            .into_iter()
            .filter(|p| self.is_file(p))
            .collect())
    }

    /// Lists the directories directly under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be listed.
    fn directories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(self
            .read_dir(dir)?
            .into_iter()
            .filter(|p| self.is_dir(p))
            .collect())
    }
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tracing::debug!(path = %path.display(), "reading file");
        std::fs::read(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path)
            .is_ok_and(|meta| meta.is_file() || meta.file_type().is_symlink())
    }

    fn is_dir(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir())
    }

    fn resolves_to_dir(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok_and(|meta| meta.is_dir())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }
}

/// In-memory filesystem for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFs {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating its parent directories.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        let _ = self.files.insert(path, contents.into());
        self
    }

    /// Adds an empty directory and its parents.
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            let _ = self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                path.display().to_string(),
            ));
        }
        let children = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect::<BTreeSet<_>>();
        Ok(children.into_iter().collect())
    }
}
