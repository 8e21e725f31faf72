//! Ember Font - Resource-font resolver
//!
//! A "font" is a directory of numbered resource files implementing one
//! sound/visual profile: `hum1.wav`, `clash/clash02.wav`, `blst/003.wav`.
//! This crate discovers those files, validates their numbering, and selects
//! one on demand:
//! - `EffectDescriptor` - scan statistics and selection state for one named
//!   resource family
//! - `ResourceCatalog` - the process-lifetime registry of descriptors
//! - `FileHandle` - a small (descriptor, slot) identifier for one file
//! - `DirectoryScanner` - walks font search paths through a
//!   `DirectoryListing` collaborator
//! - `Announcer` - diagnostics collaborator for spoken/beeped error
//!   announcements
//!
//! Scanning never fails: every irregularity degrades to fewer (or zero)
//! resources plus a diagnostic record, and playback treats an empty effect
//! as a no-op.

mod announce;
mod catalog;
mod descriptor;
mod handle;
mod listing;
mod scanner;

pub use announce::{Announcement, Announcer, RecordingAnnouncer, SilentAnnouncer};
pub use catalog::ResourceCatalog;
pub use descriptor::{EffectDescriptor, Extension, FilePattern, ResourceKind};
pub use handle::{EffectId, FileHandle};
pub use listing::{DirEntry, DirectoryListing, FsListing, MemoryListing};
pub use scanner::DirectoryScanner;
