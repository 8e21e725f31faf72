//! Process-lifetime registry of effect descriptors
//!
//! The catalog owns every `EffectDescriptor`, the RNG behind random file
//! selection, and the trigger bindings. It is constructed once by
//! configuration loading and passed by reference to the scanner and the
//! trigger dispatcher; there is no global descriptor list.

use crate::{EffectDescriptor, EffectId, Extension, FileHandle};
use ember_core::{Rng, Trigger};
use indexmap::IndexMap;
use tracing::{info, warn};

/// Registry of effect descriptors plus selection policy
#[derive(Debug)]
pub struct ResourceCatalog {
    effects: IndexMap<String, EffectDescriptor>,
    triggers: Vec<(Trigger, EffectId)>,
    rng: Rng,
    anti_repeat: bool,
}

impl ResourceCatalog {
    /// Create an empty catalog
    ///
    /// `anti_repeat` enables the no-repeat re-roll policy on random
    /// selection.
    pub fn new(seed: u64, anti_repeat: bool) -> Self {
        Self {
            effects: IndexMap::new(),
            triggers: Vec::new(),
            rng: Rng::new(seed),
            anti_repeat,
        }
    }

    /// Register a descriptor; returns `None` if the name is already taken
    pub fn add_effect(&mut self, descriptor: EffectDescriptor) -> Option<EffectId> {
        if self.effects.contains_key(descriptor.name()) {
            return None;
        }
        let id = EffectId::new(self.effects.len());
        self.effects.insert(descriptor.name().to_string(), descriptor);
        Some(id)
    }

    /// Declare that `id` follows `other` for paired selection
    pub fn set_following(&mut self, id: EffectId, other: EffectId) {
        if let Some((_, e)) = self.effects.get_index_mut(id.index()) {
            e.following = Some(other);
        }
    }

    /// Mark a descriptor as paired with its following descriptor
    pub fn set_paired(&mut self, id: EffectId, paired: bool) {
        if let Some((_, e)) = self.effects.get_index_mut(id.index()) {
            e.paired = paired;
        }
    }

    /// Set the playback volume hint of a descriptor
    pub fn set_volume(&mut self, id: EffectId, volume: u8) {
        if let Some((_, e)) = self.effects.get_index_mut(id.index()) {
            e.set_volume(volume);
        }
    }

    /// Bind a trigger tag to a descriptor
    pub fn bind_trigger(&mut self, trigger: Trigger, id: EffectId) {
        self.triggers.retain(|(t, _)| *t != trigger);
        self.triggers.push((trigger, id));
    }

    /// Descriptor bound to a trigger tag
    pub fn effect_for(&self, trigger: Trigger) -> Option<EffectId> {
        self.triggers
            .iter()
            .find(|(t, _)| *t == trigger)
            .map(|(_, id)| *id)
    }

    /// Look up a descriptor by family name
    pub fn lookup(&self, name: &str) -> Option<EffectId> {
        self.effects.get_index_of(name).map(EffectId::new)
    }

    /// Descriptor by id
    pub fn effect(&self, id: EffectId) -> Option<&EffectDescriptor> {
        self.effects.get_index(id.index()).map(|(_, e)| e)
    }

    /// Iterate descriptors in declaration order
    pub fn effects(&self) -> impl Iterator<Item = (EffectId, &EffectDescriptor)> {
        self.effects
            .values()
            .enumerate()
            .map(|(i, e)| (EffectId::new(i), e))
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True when no descriptor is registered
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Clear scan and selection state of every descriptor
    pub fn reset_all(&mut self) {
        for e in self.effects.values_mut() {
            e.reset();
        }
    }

    /// Offer a filename to every descriptor not bound to another directory
    ///
    /// The first acceptance locks the descriptor to `dir`; matches against a
    /// different directory in a later search path are ignored.
    pub fn scan_all(&mut self, dir: &str, filename: &str) {
        if Extension::identify(filename).is_none() {
            return;
        }
        for e in self.effects.values_mut() {
            if let Some(bound) = e.directory() {
                if bound != dir {
                    continue;
                }
            }
            if e.scan(filename) {
                e.bind_directory(dir);
            }
        }
    }

    /// Pick a random file slot from a descriptor
    ///
    /// Returns the null handle when the family has no files. A forced
    /// selection short-circuits the draw. With anti-repeat enabled the pick
    /// is re-rolled when it equals the previous one: once for exactly two
    /// files, up to three times for more.
    pub fn random_file(&mut self, id: EffectId) -> FileHandle {
        let anti_repeat = self.anti_repeat;
        let Some((_, e)) = self.effects.get_index_mut(id.index()) else {
            return FileHandle::NONE;
        };
        let n = e.files_found();
        if n == 0 {
            warn!("no files found for effect {}", e.name());
            return FileHandle::NONE;
        }
        let slot = match e.selected {
            Some(sel) => sel.min(n - 1),
            None => {
                let mut slot = self.rng.range_u32(n);
                if anti_repeat {
                    let rerolls = match n {
                        0 | 1 => 0,
                        2 => 1,
                        _ => 3,
                    };
                    for _ in 0..rerolls {
                        if Some(slot) != e.last {
                            break;
                        }
                        slot = self.rng.range_u32(n);
                    }
                }
                e.last = Some(slot);
                slot
            }
        };
        FileHandle::new(id, slot)
    }

    /// Force a specific slot to be returned by `random_file`
    pub fn select(&mut self, id: EffectId, slot: u32) {
        if let Some((_, e)) = self.effects.get_index_mut(id.index()) {
            e.selected = Some(slot);
        }
    }

    /// Clear a forced selection
    pub fn clear_selection(&mut self, id: EffectId) {
        if let Some((_, e)) = self.effects.get_index_mut(id.index()) {
            e.selected = None;
        }
    }

    /// Advance the forced selection to the next slot, wrapping at the end
    pub fn select_next(&mut self, id: EffectId) {
        if let Some((_, e)) = self.effects.get_index_mut(id.index()) {
            let n = e.files_found().max(1);
            e.selected = Some(match e.selected {
                None => 0,
                Some(s) => (s + 1) % n,
            });
        }
    }

    /// Map a continuous signal in [0, 1] to a file slot
    ///
    /// `ratio` is scaled across the file set and clamped into range. With
    /// anti-repeat enabled a pick that collides with the current or previous
    /// selection is nudged one slot up or down, up to three times. The
    /// result becomes the forced selection and is returned as a handle.
    pub fn select_float(&mut self, id: EffectId, ratio: f32) -> FileHandle {
        let anti_repeat = self.anti_repeat;
        let Some((_, e)) = self.effects.get_index_mut(id.index()) else {
            return FileHandle::NONE;
        };
        let n = e.files_found();
        if n == 0 {
            return FileHandle::NONE;
        }
        let top = (n - 1) as i64;
        let mut slot = ((n as f32 * ratio).floor() as i64).clamp(0, top);
        if anti_repeat {
            for _ in 0..3 {
                let collides = Some(slot as u32) == e.selected
                    || (Some(slot as u32) == e.last && self.rng.coin_flip());
                if !collides {
                    break;
                }
                let step = if self.rng.coin_flip() { 1 } else { -1 };
                slot = (slot + step).clamp(0, top);
            }
        }
        e.last = e.selected;
        e.selected = Some(slot as u32);
        FileHandle::new(id, slot as u32)
    }

    /// Resolve a handle's paired counterpart in another family
    ///
    /// Returns the same slot into `other` only when the handle's descriptor
    /// is paired, both families report equal file counts, and `other` has no
    /// forced selection; otherwise an independent random draw from `other`.
    /// The silent fallback keeps playback going when a font ships mismatched
    /// pair counts.
    pub fn following_file(&mut self, handle: FileHandle, other: EffectId) -> FileHandle {
        if let Some(id) = handle.effect() {
            let cur = self.effect(id);
            let oth = self.effect(other);
            if let (Some(cur), Some(oth)) = (cur, oth) {
                if cur.paired()
                    && cur.files_found() == oth.files_found()
                    && oth.selected().is_none()
                {
                    return FileHandle::new(other, handle.slot());
                }
            }
        }
        self.random_file(other)
    }

    /// Rebuild the full path of a resolved file
    pub fn file_name(&self, handle: FileHandle) -> Option<String> {
        let id = handle.effect()?;
        self.effect(id)?.file_name(handle.slot())
    }

    /// Resolve a random file straight to a playable path
    ///
    /// Returns `None` when the family has no files; playback is skipped and
    /// the engine continues.
    pub fn play(&mut self, id: EffectId) -> Option<String> {
        let handle = self.random_file(id);
        let path = self.file_name(handle)?;
        info!("playing {}", path);
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceKind;

    fn catalog_with(names: &[&str]) -> (ResourceCatalog, Vec<EffectId>) {
        let mut catalog = ResourceCatalog::new(42, false);
        let ids = names
            .iter()
            .map(|n| {
                catalog
                    .add_effect(EffectDescriptor::new(*n, ResourceKind::Sound))
                    .unwrap()
            })
            .collect();
        (catalog, ids)
    }

    fn feed(catalog: &mut ResourceCatalog, dir: &str, files: &[&str]) {
        for f in files {
            catalog.scan_all(dir, f);
        }
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (mut catalog, _) = catalog_with(&["hum"]);
        assert!(catalog
            .add_effect(EffectDescriptor::new("hum", ResourceKind::Sound))
            .is_none());
    }

    #[test]
    fn test_lookup_and_triggers() {
        let (mut catalog, ids) = catalog_with(&["hum", "clsh"]);
        assert_eq!(catalog.lookup("clsh"), Some(ids[1]));
        assert_eq!(catalog.lookup("nope"), None);

        catalog.bind_trigger(Trigger::Clash, ids[1]);
        assert_eq!(catalog.effect_for(Trigger::Clash), Some(ids[1]));
        assert_eq!(catalog.effect_for(Trigger::Blast), None);

        // Rebinding replaces the previous binding
        catalog.bind_trigger(Trigger::Clash, ids[0]);
        assert_eq!(catalog.effect_for(Trigger::Clash), Some(ids[0]));
    }

    #[test]
    fn test_random_file_empty_returns_null() {
        let (mut catalog, ids) = catalog_with(&["hum"]);
        assert_eq!(catalog.random_file(ids[0]), FileHandle::NONE);
        assert_eq!(catalog.play(ids[0]), None);
    }

    #[test]
    fn test_random_file_in_range() {
        let (mut catalog, ids) = catalog_with(&["hum"]);
        feed(&mut catalog, "f", &["hum1.wav", "hum2.wav", "hum3.wav"]);

        for _ in 0..50 {
            let h = catalog.random_file(ids[0]);
            assert!(h.is_some());
            assert!(h.slot() < 3);
        }
    }

    #[test]
    fn test_forced_selection() {
        let (mut catalog, ids) = catalog_with(&["hum"]);
        feed(&mut catalog, "f", &["hum1.wav", "hum2.wav", "hum3.wav"]);

        catalog.select(ids[0], 2);
        for _ in 0..10 {
            assert_eq!(catalog.random_file(ids[0]).slot(), 2);
        }
        catalog.clear_selection(ids[0]);

        catalog.select_next(ids[0]);
        assert_eq!(catalog.random_file(ids[0]).slot(), 0);
        catalog.select_next(ids[0]);
        assert_eq!(catalog.random_file(ids[0]).slot(), 1);
        catalog.select_next(ids[0]);
        catalog.select_next(ids[0]);
        // Wraps past the last slot
        assert_eq!(catalog.random_file(ids[0]).slot(), 0);
    }

    #[test]
    fn test_anti_repeat_suppresses_consecutive_repeats() {
        // Property over seeded randomness: a repeat survives only if four
        // draws in a row collide, so with four files repeats drop from one
        // in four to well under one in twenty.
        let draws = 2000;
        let mut catalog = ResourceCatalog::new(42, true);
        let id = catalog
            .add_effect(EffectDescriptor::new("hum", ResourceKind::Sound))
            .unwrap();
        feed(
            &mut catalog,
            "f",
            &["hum1.wav", "hum2.wav", "hum3.wav", "hum4.wav"],
        );

        let mut repeats = 0;
        let mut prev = catalog.random_file(id).slot();
        for _ in 0..draws {
            let next = catalog.random_file(id).slot();
            if next == prev {
                repeats += 1;
            }
            prev = next;
        }
        assert!(repeats < draws / 20, "{} repeats in {} draws", repeats, draws);
    }

    #[test]
    fn test_anti_repeat_rerolls_once_for_two_files() {
        // With two files the policy re-rolls a single time, halving the
        // repeat rate rather than eliminating it.
        let draws = 2000;
        let mut catalog = ResourceCatalog::new(7, true);
        let id = catalog
            .add_effect(EffectDescriptor::new("hum", ResourceKind::Sound))
            .unwrap();
        feed(&mut catalog, "f", &["hum1.wav", "hum2.wav"]);

        let mut repeats = 0;
        let mut prev = catalog.random_file(id).slot();
        for _ in 0..draws {
            let next = catalog.random_file(id).slot();
            if next == prev {
                repeats += 1;
            }
            prev = next;
        }
        // Expected rate one in four; far below the unfiltered one in two
        assert!(repeats < draws * 2 / 5, "{} repeats in {} draws", repeats, draws);
    }

    #[test]
    fn test_select_float_endpoints_and_range() {
        let (mut catalog, ids) = catalog_with(&["swng"]);
        feed(
            &mut catalog,
            "f",
            &["swng1.wav", "swng2.wav", "swng3.wav", "swng4.wav"],
        );

        assert_eq!(catalog.select_float(ids[0], 0.0).slot(), 0);
        catalog.clear_selection(ids[0]);
        assert_eq!(catalog.select_float(ids[0], 1.0).slot(), 3);
        catalog.clear_selection(ids[0]);

        for i in 0..=20 {
            let ratio = i as f32 / 20.0;
            let h = catalog.select_float(ids[0], ratio);
            assert!(h.slot() < 4);
            catalog.clear_selection(ids[0]);
        }
    }

    #[test]
    fn test_select_float_forces_selection() {
        let (mut catalog, ids) = catalog_with(&["swng"]);
        feed(&mut catalog, "f", &["swng1.wav", "swng2.wav", "swng3.wav"]);

        let picked = catalog.select_float(ids[0], 0.9);
        assert_eq!(catalog.random_file(ids[0]), picked);
    }

    #[test]
    fn test_pairing_synchronizes_slots() {
        let (mut catalog, ids) = catalog_with(&["out", "in"]);
        feed(
            &mut catalog,
            "f",
            &["out1.wav", "out2.wav", "out3.wav", "out4.wav"],
        );
        feed(
            &mut catalog,
            "f",
            &["in1.wav", "in2.wav", "in3.wav", "in4.wav"],
        );
        catalog.set_following(ids[0], ids[1]);
        catalog.set_paired(ids[0], true);

        let handle = FileHandle::new(ids[0], 2);
        assert_eq!(
            catalog.following_file(handle, ids[1]),
            FileHandle::new(ids[1], 2)
        );

        // A forced selection on the followed family takes precedence
        catalog.select(ids[1], 0);
        assert_eq!(
            catalog.following_file(handle, ids[1]),
            FileHandle::new(ids[1], 0)
        );
    }

    #[test]
    fn test_pairing_falls_back_on_count_mismatch() {
        let (mut catalog, ids) = catalog_with(&["out", "in"]);
        feed(&mut catalog, "f", &["out1.wav", "out2.wav", "out3.wav"]);
        feed(&mut catalog, "f", &["in1.wav", "in2.wav"]);
        catalog.set_paired(ids[0], true);

        let handle = FileHandle::new(ids[0], 2);
        let follow = catalog.following_file(handle, ids[1]);
        assert!(follow.is_some());
        assert!(follow.slot() < 2);
    }

    #[test]
    fn test_unpaired_draws_independently() {
        let (mut catalog, ids) = catalog_with(&["out", "in"]);
        feed(&mut catalog, "f", &["out1.wav", "out2.wav"]);
        feed(&mut catalog, "f", &["in1.wav", "in2.wav"]);

        let handle = FileHandle::new(ids[0], 1);
        let follow = catalog.following_file(handle, ids[1]);
        assert_eq!(follow.effect(), Some(ids[1]));
        assert!(follow.slot() < 2);
    }

    #[test]
    fn test_directory_lock_first_match_wins() {
        let (mut catalog, ids) = catalog_with(&["hum"]);
        catalog.scan_all("fonts/a", "hum1.wav");
        catalog.scan_all("fonts/b", "hum2.wav");

        let e = catalog.effect(ids[0]).unwrap();
        assert_eq!(e.directory(), Some("fonts/a"));
        assert_eq!(e.files_found(), 1);
    }

    #[test]
    fn test_play_resolves_path() {
        let (mut catalog, ids) = catalog_with(&["hum"]);
        feed(&mut catalog, "fonts/a", &["hum1.wav"]);

        assert_eq!(catalog.play(ids[0]), Some("fonts/a/hum1.wav".to_string()));
    }

    #[test]
    fn test_file_name_for_null_handle() {
        let (catalog, _) = catalog_with(&["hum"]);
        assert_eq!(catalog.file_name(FileHandle::NONE), None);
    }
}
