//! Per-effect resource metadata and scan statistics
//!
//! An `EffectDescriptor` tracks one named resource family ("hum", "clash").
//! Files may be numbered any which way, as long as the numbering is
//! consistent and has no gaps: the descriptor records the minimum and
//! maximum index found, whether an unnumbered file exists, and the
//! zero-padding width, which is enough to both count the set and rebuild
//! any filename in it.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// File extensions accepted by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extension {
    Wav,
    Raw,
    Usl,
    Bmp,
    Pbm,
    Bin,
}

impl Extension {
    /// Identify a filename's extension against the allow-list
    pub fn identify(filename: &str) -> Option<Extension> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext {
            "wav" => Some(Extension::Wav),
            "raw" => Some(Extension::Raw),
            "usl" => Some(Extension::Usl),
            "bmp" => Some(Extension::Bmp),
            "pbm" => Some(Extension::Pbm),
            "bin" => Some(Extension::Bin),
            _ => None,
        }
    }

    /// The extension without the separator
    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::Wav => "wav",
            Extension::Raw => "raw",
            Extension::Usl => "usl",
            Extension::Bmp => "bmp",
            Extension::Pbm => "pbm",
            Extension::Bin => "bin",
        }
    }

    /// The resource kind this extension carries
    pub fn kind(&self) -> ResourceKind {
        match self {
            Extension::Wav | Extension::Raw | Extension::Usl => ResourceKind::Sound,
            Extension::Bmp | Extension::Pbm | Extension::Bin => ResourceKind::Image,
        }
    }
}

/// Sound or image resource family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceKind {
    #[default]
    Sound,
    Image,
}

/// Detected naming shape of a resource family
///
/// Fixed by the first accepted file; no mixing within one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilePattern {
    /// No file accepted yet
    #[default]
    Unknown,
    /// `name042.wav`
    Flat,
    /// `name/name042.wav`
    Subdirs,
    /// `name/042.wav`
    NonredundantSubdirs,
}

/// Metadata and selection state for one named resource family
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    // Configured identity, untouched by reset()
    name: String,
    kind: ResourceKind,
    pub(crate) following: Option<crate::EffectId>,
    pub(crate) paired: bool,
    volume: u8,

    // Scan state
    range: Option<(u32, u32)>,
    digits: Option<u8>,
    unnumbered: bool,
    pattern: FilePattern,
    ext: Option<Extension>,
    directory: Option<String>,
    hits: u32,

    // Selection state
    pub(crate) selected: Option<u32>,
    pub(crate) last: Option<u32>,
}

impl EffectDescriptor {
    /// Create a descriptor for a named resource family
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            following: None,
            paired: false,
            volume: 100,
            range: None,
            digits: None,
            unnumbered: false,
            pattern: FilePattern::Unknown,
            ext: None,
            directory: None,
            hits: 0,
            selected: None,
            last: None,
        }
    }

    /// Clear scan and selection state before a rescan
    ///
    /// Configured identity (name, kind, pairing, following, volume) is
    /// configuration, not a scan result, and survives.
    pub fn reset(&mut self) {
        self.range = None;
        self.digits = None;
        self.unnumbered = false;
        self.pattern = FilePattern::Unknown;
        self.ext = None;
        self.directory = None;
        self.hits = 0;
        self.selected = None;
        self.last = None;
    }

    /// Test a filename (relative to its font directory) against this family
    ///
    /// Three naming shapes are tried in order: `name042.wav`,
    /// `name/name042.wav`, `name/042.wav`. The first accepted file fixes the
    /// shape and the extension; later files that disagree are excluded, not
    /// errors. A bare `name.ext` marks the unnumbered slot. Numeric suffixes
    /// must be positive; a suffix with a leading zero fixes the padding
    /// width once.
    pub(crate) fn scan(&mut self, filename: &str) -> bool {
        let Some(ext) = Extension::identify(filename) else {
            return false;
        };
        if ext.kind() != self.kind {
            return false;
        }
        if let Some(locked) = self.ext {
            if locked != ext {
                return false;
            }
        }

        let Some(mut rest) = filename.strip_prefix(self.name.as_str()) else {
            return false;
        };
        let mut pattern = FilePattern::Flat;
        if let Some(after_slash) = rest.strip_prefix('/') {
            if let Some(tail) = after_slash.strip_prefix(self.name.as_str()) {
                pattern = FilePattern::Subdirs;
                rest = tail;
            } else {
                pattern = FilePattern::NonredundantSubdirs;
                rest = after_slash;
            }
        }
        if self.pattern != FilePattern::Unknown && self.pattern != pattern {
            return false;
        }

        let Some(stem) = rest.strip_suffix(ext.as_str()) else {
            return false;
        };
        let Some(stem) = stem.strip_suffix('.') else {
            return false;
        };

        let number = if stem.is_empty() {
            None
        } else {
            if !stem.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            let Ok(n) = stem.parse::<u32>() else {
                return false;
            };
            if n == 0 {
                return false;
            }
            Some(n)
        };

        // Accepted: commit the statistics
        self.pattern = pattern;
        self.ext = Some(ext);
        match number {
            None => self.unnumbered = true,
            Some(n) => {
                self.range = Some(match self.range {
                    None => (n, n),
                    Some((lo, hi)) => (lo.min(n), hi.max(n)),
                });
                if stem.starts_with('0') && self.digits.is_none() {
                    self.digits = Some(stem.len() as u8);
                }
            }
        }
        self.hits += 1;
        true
    }

    /// Number of files this family should have, inferred from the numbering
    pub fn files_found(&self) -> u32 {
        let mut n = self.range.map_or(0, |(lo, hi)| hi - lo + 1);
        if self.unnumbered {
            n += 1;
        }
        n
    }

    /// True when the raw hit count disagrees with the inferred count
    pub fn is_incomplete(&self) -> bool {
        self.files_found() != self.hits
    }

    /// Rebuild the full path of a file slot
    ///
    /// Deterministic inverse of `scan`: the produced path (minus the bound
    /// directory) re-scans to the same family and slot. Returns `None` for
    /// out-of-range slots or when nothing was found.
    pub fn file_name(&self, slot: u32) -> Option<String> {
        if slot >= self.files_found() {
            return None;
        }
        let ext = self.ext?;

        let mut path = String::new();
        if let Some(dir) = &self.directory {
            if !dir.is_empty() {
                path.push_str(dir);
                path.push('/');
            }
        }
        path.push_str(&self.name);
        match self.pattern {
            FilePattern::Unknown | FilePattern::Flat => {}
            FilePattern::Subdirs => {
                path.push('/');
                path.push_str(&self.name);
            }
            FilePattern::NonredundantSubdirs => path.push('/'),
        }

        // The slot one past the numbered range is the unnumbered file
        let number = self.range.and_then(|(lo, hi)| {
            let n = lo + slot;
            (n <= hi).then_some(n)
        });
        if let Some(n) = number {
            let _ = write!(path, "{:0width$}", n, width = self.digits() as usize);
        }
        path.push('.');
        path.push_str(ext.as_str());
        Some(path)
    }

    /// Human-readable scan summary, for diagnostics
    pub fn describe(&self) -> String {
        let mut out = format!("Found {} files: ", self.name);
        if let Some((lo, hi)) = self.range {
            let _ = write!(out, "{}-{}", lo, hi);
            if let Some(d) = self.digits {
                let _ = write!(out, " using {} digits", d);
            }
            if self.unnumbered {
                out.push_str(" + ");
            }
        }
        if self.unnumbered {
            out.push_str("one unnumbered file");
        }
        match self.pattern {
            FilePattern::Unknown | FilePattern::Flat => {}
            FilePattern::Subdirs => out.push_str(" in subdirs"),
            FilePattern::NonredundantSubdirs => out.push_str(" in efficient subdirs"),
        }
        if self.is_incomplete() {
            let _ = write!(
                out,
                " (missing files: found {}, expected {})",
                self.hits,
                self.files_found()
            );
        }
        if let Some(dir) = &self.directory {
            let _ = write!(out, " in {}", dir);
        }
        out
    }

    /// Family name (the filename prefix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sound or image
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Declared following family, if any
    pub fn following(&self) -> Option<crate::EffectId> {
        self.following
    }

    /// True when index selection is synchronized with the following family
    pub fn paired(&self) -> bool {
        self.paired
    }

    /// Playback volume hint in percent
    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub(crate) fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    /// Lowest numeric index found
    pub fn min_file(&self) -> Option<u32> {
        self.range.map(|(lo, _)| lo)
    }

    /// Highest numeric index found
    pub fn max_file(&self) -> Option<u32> {
        self.range.map(|(_, hi)| hi)
    }

    /// Zero-padding width used when rebuilding filenames
    ///
    /// 1 unless a zero-led suffix fixed a wider padding; the first such hit
    /// wins and is never widened retroactively.
    pub fn digits(&self) -> u8 {
        self.digits.unwrap_or(1)
    }

    /// True when a bare `name.ext` file was found
    pub fn unnumbered(&self) -> bool {
        self.unnumbered
    }

    /// Naming shape fixed by the first accepted file
    pub fn pattern(&self) -> FilePattern {
        self.pattern
    }

    /// Extension fixed by the first accepted file
    pub fn extension(&self) -> Option<Extension> {
        self.ext
    }

    /// Directory this family was found in
    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    pub(crate) fn bind_directory(&mut self, dir: &str) {
        if self.directory.is_none() {
            self.directory = Some(dir.to_string());
        }
    }

    /// Raw accepted-file count from the last scan
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Forced-selection slot, if one is active
    pub fn selected(&self) -> Option<u32> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sound(name: &str) -> EffectDescriptor {
        EffectDescriptor::new(name, ResourceKind::Sound)
    }

    #[test]
    fn test_flat_pattern_inference() {
        let mut e = sound("hum");
        assert!(e.scan("hum1.wav"));
        assert!(e.scan("hum2.wav"));
        assert!(e.scan("hum10.wav"));

        assert_eq!(e.min_file(), Some(1));
        assert_eq!(e.max_file(), Some(10));
        assert_eq!(e.digits(), 1);
        assert_eq!(e.pattern(), FilePattern::Flat);
        assert_eq!(e.extension(), Some(Extension::Wav));
        assert_eq!(e.files_found(), 10);
        assert_eq!(e.hits(), 3);
        assert!(e.is_incomplete());
    }

    #[test]
    fn test_subdir_patterns() {
        let mut e = sound("lock");
        assert!(e.scan("lock/lock1.wav"));
        assert!(e.scan("lock/lock2.wav"));
        assert_eq!(e.pattern(), FilePattern::Subdirs);
        assert_eq!(e.files_found(), 2);

        let mut e = sound("lock");
        assert!(e.scan("lock/1.wav"));
        assert!(e.scan("lock/2.wav"));
        assert_eq!(e.pattern(), FilePattern::NonredundantSubdirs);
        assert_eq!(e.files_found(), 2);
    }

    #[test]
    fn test_pattern_locked_by_first_hit() {
        let mut e = sound("hum");
        assert!(e.scan("hum1.wav"));
        // A subdir-shaped file for the same family is excluded, not an error
        assert!(!e.scan("hum/hum2.wav"));
        assert_eq!(e.pattern(), FilePattern::Flat);
        assert_eq!(e.hits(), 1);
    }

    #[test]
    fn test_extension_locked_by_first_hit() {
        let mut e = sound("hum");
        assert!(e.scan("hum1.wav"));
        assert!(!e.scan("hum2.raw"));
        assert_eq!(e.extension(), Some(Extension::Wav));
        assert_eq!(e.files_found(), 1);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut e = sound("hum");
        assert!(!e.scan("hum1.bmp"));

        let mut img = EffectDescriptor::new("logo", ResourceKind::Image);
        assert!(img.scan("logo1.bmp"));
        assert!(!img.scan("logo2.wav"));
    }

    #[test]
    fn test_unnumbered_slot() {
        let mut e = sound("hum");
        assert!(e.scan("hum.wav"));
        assert!(e.scan("hum1.wav"));
        assert!(e.scan("hum2.wav"));

        assert!(e.unnumbered());
        assert_eq!(e.files_found(), 3);
        // Slot past the numbered range addresses the unnumbered file
        assert_eq!(e.file_name(2), Some("hum.wav".to_string()));
    }

    #[test]
    fn test_zero_padding_fixed_by_first_zero_led_hit() {
        let mut e = sound("clash");
        assert!(e.scan("clash01.wav"));
        assert!(e.scan("clash2.wav"));
        assert!(e.scan("clash003.wav"));

        // First zero-led suffix wins; not widened retroactively
        assert_eq!(e.digits(), 2);
        assert_eq!(e.file_name(0), Some("clash01.wav".to_string()));
    }

    #[test]
    fn test_rejects_junk_suffixes() {
        let mut e = sound("hum");
        assert!(!e.scan("hum0.wav"));
        assert!(!e.scan("humx.wav"));
        assert!(!e.scan("hum1x.wav"));
        assert!(!e.scan("hummingbird.wav"));
        assert!(!e.scan("hum1"));
        assert_eq!(e.hits(), 0);
        assert_eq!(e.files_found(), 0);
    }

    #[test]
    fn test_files_found_invariant() {
        let mut e = sound("blast");
        for name in ["blast3.wav", "blast5.wav", "blast.wav"] {
            assert!(e.scan(name));
        }
        // (max - min + 1) + unnumbered
        assert_eq!(e.files_found(), 3 + 1);
        assert_eq!(e.hits(), 3);
        assert!(e.is_incomplete());
    }

    #[test]
    fn test_file_name_round_trip() {
        let mut e = sound("clsh");
        e.bind_directory("fonts/alpha");
        assert!(e.scan("clsh/clsh01.wav"));
        assert!(e.scan("clsh/clsh02.wav"));
        assert!(e.scan("clsh/clsh03.wav"));

        for slot in 0..e.files_found() {
            let path = e.file_name(slot).unwrap();
            let relative = path.strip_prefix("fonts/alpha/").unwrap();

            let mut fresh = sound("clsh");
            assert!(fresh.scan(relative), "{} does not re-scan", relative);
            assert_eq!(fresh.min_file(), Some(slot + 1));
        }
    }

    #[test]
    fn test_file_name_out_of_range() {
        let mut e = sound("hum");
        assert!(e.scan("hum1.wav"));
        assert_eq!(e.file_name(0), Some("hum1.wav".to_string()));
        assert_eq!(e.file_name(1), None);

        let empty = sound("hum");
        assert_eq!(empty.file_name(0), None);
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut e = sound("hum");
        e.set_volume(80);
        assert!(e.scan("hum1.wav"));
        e.selected = Some(0);
        e.reset();

        assert_eq!(e.name(), "hum");
        assert_eq!(e.volume(), 80);
        assert_eq!(e.files_found(), 0);
        assert_eq!(e.pattern(), FilePattern::Unknown);
        assert_eq!(e.selected(), None);
        assert_eq!(e.directory(), None);
    }

    #[test]
    fn test_describe_mentions_missing_files() {
        let mut e = sound("hum");
        assert!(e.scan("hum1.wav"));
        assert!(e.scan("hum10.wav"));
        let text = e.describe();
        assert!(text.contains("hum"));
        assert!(text.contains("1-10"));
        assert!(text.contains("missing"));
    }
}
