//! Style tree schema
//!
//! Declarative mirror of the runtime node and transition trees. These types
//! are pure data; `crate::loader` compiles them into `ember_style` objects.

use ember_core::{Color, Trigger};
use serde::{Deserialize, Serialize};

/// Declarative style node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StyleDef {
    /// Opaque solid color
    Solid(Color),
    /// Solid color with explicit alpha
    Alpha { color: Color, alpha: f32 },
    /// Per-frame random blend between two children
    RandomFlicker { a: Box<StyleDef>, b: Box<StyleDef> },
    /// Audio-envelope-driven blend between two children
    AudioFlicker { a: Box<StyleDef>, b: Box<StyleDef> },
    /// Battery fill indicator between a low and a high color
    BatteryGauge { low: Box<StyleDef>, high: Box<StyleDef> },
    /// Composited sub-stack, first entry at the bottom
    Layers(Vec<StyleDef>),
    /// Transition layer restarted by a trigger
    TriggerTransition {
        trigger: Trigger,
        transition: TransitionDef,
    },
    /// Ignition/retraction gate around a base style
    InOut {
        ignite: TransitionDef,
        retract: TransitionDef,
        base: Box<StyleDef>,
        /// Off-state color; black when omitted
        #[serde(default)]
        off: Option<Color>,
    },
}

/// Declarative transition; durations in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransitionDef {
    Instant,
    Fade(u32),
    Delay(u32),
    Wipe(u32),
    WipeIn(u32),
    /// Chain of transitions through intermediate colors
    Concat {
        steps: Vec<(TransitionDef, StyleDef)>,
        last: Box<TransitionDef>,
    },
}
