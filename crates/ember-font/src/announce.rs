//! Diagnostics collaborator for audible announcements
//!
//! Some failure conditions deserve more than a log line on a headless
//! prop: the driver may speak or beep them. The resolver reports the
//! condition; rendering it is the collaborator's business.

use std::fmt;

/// Conditions a driver may announce audibly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    /// A configured font search path does not exist
    FontDirectoryNotFound,
    /// A configured font search path has a segment too long for the
    /// storage's naming limits
    FontDirectoryTooLong,
    /// A scanned font is missing some of its files
    ErrorInFontDirectory,
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Announcement::FontDirectoryNotFound => "font directory not found",
            Announcement::FontDirectoryTooLong => "font directory name too long",
            Announcement::ErrorInFontDirectory => "error in font directory",
        };
        write!(f, "{}", text)
    }
}

/// Receiver of audible announcements
pub trait Announcer {
    fn announce(&mut self, what: Announcement);
}

/// Announcer that drops everything (headless or muted operation)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _what: Announcement) {}
}

/// Announcer that records everything, for tests
#[derive(Debug, Clone, Default)]
pub struct RecordingAnnouncer {
    pub announced: Vec<Announcement>,
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, what: Announcement) {
        self.announced.push(what);
    }
}
