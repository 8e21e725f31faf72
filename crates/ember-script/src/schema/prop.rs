//! Top-level prop configuration

use crate::schema::{FontConfig, StyleDef};
use serde::{Deserialize, Serialize};

/// Everything one firmware build composes: the font and the style trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropConfig {
    /// Resource-font configuration
    pub font: FontConfig,
    /// One style tree per light strip
    pub styles: Vec<StyleDef>,
    /// Seed stream for the style trees' internal randomness
    #[serde(default)]
    pub style_seed: u64,
}
