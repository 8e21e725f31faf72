//! Identifiers for descriptors and resolved files

use std::fmt;

/// Identifier of a descriptor slot in the catalog
///
/// Assigned at registration time in declaration order; stable for the
/// process lifetime because descriptors are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(usize);

impl EffectId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw catalog index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect:{}", self.0)
    }
}

/// A small identifier for one concrete resource file
///
/// Holds a descriptor id and a zero-based slot into that descriptor's file
/// set; it owns no content and is cheap to copy and compare. The slot one
/// past the numbered range addresses the unnumbered file when present.
/// `FileHandle::NONE` is the canonical "no file" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHandle {
    effect: Option<EffectId>,
    slot: u32,
}

impl FileHandle {
    /// The canonical null handle
    pub const NONE: FileHandle = FileHandle {
        effect: None,
        slot: 0,
    };

    pub(crate) fn new(effect: EffectId, slot: u32) -> Self {
        Self {
            effect: Some(effect),
            slot,
        }
    }

    /// The descriptor this handle points into, if any
    pub fn effect(&self) -> Option<EffectId> {
        self.effect
    }

    /// Zero-based file slot
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// True if this handle points at a file
    pub fn is_some(&self) -> bool {
        self.effect.is_some()
    }

    /// True for the null handle
    pub fn is_none(&self) -> bool {
        self.effect.is_none()
    }
}

impl Default for FileHandle {
    fn default() -> Self {
        FileHandle::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle() {
        assert!(FileHandle::NONE.is_none());
        assert!(!FileHandle::NONE.is_some());
        assert_eq!(FileHandle::NONE, FileHandle::default());
    }

    #[test]
    fn test_equality_is_identity_plus_slot() {
        let a = FileHandle::new(EffectId::new(0), 2);
        let b = FileHandle::new(EffectId::new(0), 2);
        let c = FileHandle::new(EffectId::new(1), 2);
        let d = FileHandle::new(EffectId::new(0), 3);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(a, FileHandle::NONE);
    }
}
