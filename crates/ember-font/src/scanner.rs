//! Directory scanner feeding the catalog
//!
//! Scanning is a coarse-grained phase distinct from the per-frame render
//! path: it happens at boot and on explicit font (re)selection, never
//! automatically. The exclusive borrow of the catalog serializes a scan
//! against every reader. A failed scan is not retried; every failure
//! degrades to fewer or zero resources.

use crate::{Announcement, Announcer, DirectoryListing, ResourceCatalog};
use tracing::{debug, info, warn};

/// Longest path segment the FAT-style storage naming accepts
const MAX_SEGMENT_LEN: usize = 8;

/// Walks font search paths and offers every filename to the catalog
///
/// Descends exactly one level into subdirectories, matching the
/// `name/name042.wav` and `name/042.wav` layouts.
#[derive(Debug)]
pub struct DirectoryScanner<L> {
    listing: L,
    paths: Vec<String>,
}

impl<L: DirectoryListing> DirectoryScanner<L> {
    /// Create a scanner over the given font search paths
    pub fn new(listing: L, paths: Vec<String>) -> Self {
        Self { listing, paths }
    }

    /// Font search paths in scan order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Rescan every search path from scratch
    ///
    /// Resets all descriptors first, then offers every filename (plus one
    /// level of subdirectory contents) to each of them. Afterwards every
    /// descriptor whose hit count disagrees with its inferred file count is
    /// reported as an incomplete font: a warning and an announcement, never
    /// a failure.
    pub fn rescan(&self, catalog: &mut ResourceCatalog, announcer: &mut dyn Announcer) {
        catalog.reset_all();

        for dir in &self.paths {
            info!("scanning font directory {}", dir);
            if !self.listing.exists(dir) {
                warn!("font directory {} not found", dir);
                if dir.split('/').any(|seg| seg.len() > MAX_SEGMENT_LEN) {
                    announcer.announce(Announcement::FontDirectoryTooLong);
                } else if !dir.is_empty() {
                    announcer.announce(Announcement::FontDirectoryNotFound);
                }
                continue;
            }
            let entries = match self.listing.entries(dir) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("cannot list font directory {}: {}", dir, err);
                    continue;
                }
            };
            for entry in &entries {
                if entry.is_dir {
                    let sub = format!("{}/{}", dir, entry.name);
                    let children = match self.listing.entries(&sub) {
                        Ok(children) => children,
                        Err(err) => {
                            warn!("cannot list subdirectory {}: {}", sub, err);
                            continue;
                        }
                    };
                    for child in children.iter().filter(|c| !c.is_dir) {
                        catalog.scan_all(dir, &format!("{}/{}", entry.name, child.name));
                    }
                } else {
                    catalog.scan_all(dir, &entry.name);
                }
            }
        }

        let mut warned = false;
        for (_, e) in catalog.effects() {
            if e.files_found() > 0 {
                debug!("{}", e.describe());
            }
            if e.is_incomplete() {
                if !warned {
                    warned = true;
                    warn!("this font seems to be missing some files");
                    announcer.announce(Announcement::ErrorInFontDirectory);
                }
                warn!("{}", e.describe());
            }
        }
    }
}
