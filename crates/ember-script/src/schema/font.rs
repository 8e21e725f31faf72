//! Font configuration schema

use ember_core::Trigger;
use ember_font::ResourceKind;
use serde::{Deserialize, Serialize};

/// Declaration of one effect family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectDecl {
    /// Family name, the filename prefix scanned for
    pub name: String,
    /// Sound or image family
    #[serde(default)]
    pub kind: ResourceKind,
    /// Name of the family whose selection may follow this one
    #[serde(default)]
    pub following: Option<String>,
    /// Synchronize slot selection with the following family
    #[serde(default)]
    pub paired: bool,
    /// Playback volume hint in percent
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_volume() -> u8 {
    100
}

impl EffectDecl {
    /// Create a sound-family declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::Sound,
            following: None,
            paired: false,
            volume: 100,
        }
    }

    /// Set the followed family
    pub fn following(mut self, name: impl Into<String>) -> Self {
        self.following = Some(name.into());
        self
    }

    /// Mark the family as paired
    pub fn paired(mut self) -> Self {
        self.paired = true;
        self
    }
}

/// Binding of a trigger tag to an effect family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerBinding {
    pub trigger: Trigger,
    pub effect: String,
}

/// Resource-font configuration: search paths, policy and family list
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FontConfig {
    /// Font search paths, scanned in order
    pub search_paths: Vec<String>,
    /// Enable the no-repeat re-roll policy on random selection
    #[serde(default)]
    pub anti_repeat: bool,
    /// Seed for the selection RNG
    #[serde(default)]
    pub seed: u64,
    /// Declared effect families
    pub effects: Vec<EffectDecl>,
    /// Trigger-to-family bindings; a repeated trigger keeps the last one
    #[serde(default)]
    pub triggers: Vec<TriggerBinding>,
}
