//! Directory-listing collaborator
//!
//! The resolver performs no I/O of its own: it consumes (is-directory,
//! name) entries supplied per font search path by a `DirectoryListing`
//! implementation. `FsListing` adapts std::fs for hosts with a filesystem;
//! `MemoryListing` backs tests and fixed in-firmware file tables.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Storage collaborator supplying directory contents
///
/// Entries must come back in a stable order so scan results are
/// reproducible across runs.
pub trait DirectoryListing {
    /// True when the path names an existing directory
    fn exists(&self, path: &str) -> bool;

    /// List the entries of a directory
    fn entries(&self, path: &str) -> io::Result<Vec<DirEntry>>;
}

/// `DirectoryListing` over std::fs, rooted at a base directory
#[derive(Debug, Clone)]
pub struct FsListing {
    root: PathBuf,
}

impl FsListing {
    /// Create a listing rooted at `root`; all scanned paths are relative
    /// to it
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DirectoryListing for FsListing {
    fn exists(&self, path: &str) -> bool {
        self.root.join(path).is_dir()
    }

    fn entries(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(self.root.join(path))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type()?.is_dir();
            out.push(DirEntry { name, is_dir });
        }
        // read_dir order is platform-dependent; sort for reproducibility
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

/// In-memory `DirectoryListing` for tests and fixed file tables
#[derive(Debug, Clone, Default)]
pub struct MemoryListing {
    // path -> entry name -> is_dir; BTreeMap keeps listings ordered
    dirs: BTreeMap<String, BTreeMap<String, bool>>,
}

impl MemoryListing {
    /// Create an empty listing
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory, creating parent directories as needed
    pub fn add_dir(&mut self, path: &str) {
        let mut so_far = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            let parent = so_far.clone();
            if !so_far.is_empty() {
                so_far.push('/');
            }
            so_far.push_str(part);
            self.dirs
                .entry(parent)
                .or_default()
                .insert(part.to_string(), true);
            self.dirs.entry(so_far.clone()).or_default();
        }
    }

    /// Register a file, creating parent directories as needed
    pub fn add_file(&mut self, path: &str) {
        match path.rsplit_once('/') {
            Some((dir, name)) => {
                self.add_dir(dir);
                self.dirs
                    .entry(dir.to_string())
                    .or_default()
                    .insert(name.to_string(), false);
            }
            None => {
                self.dirs
                    .entry(String::new())
                    .or_default()
                    .insert(path.to_string(), false);
            }
        }
    }
}

impl DirectoryListing for MemoryListing {
    fn exists(&self, path: &str) -> bool {
        self.dirs.contains_key(path)
    }

    fn entries(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let Some(entries) = self.dirs.get(path) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path),
            ));
        };
        Ok(entries
            .iter()
            .map(|(name, is_dir)| DirEntry {
                name: name.clone(),
                is_dir: *is_dir,
            })
            .collect())
    }
}
