//! Trigger event tags
//!
//! A trigger is a discrete event produced by the prop's controls and sensors
//! (button gestures, impacts, battery state). The same tag is used two ways:
//! as a lookup key into the resource catalog, and as a signal dispatched into
//! the style tree to restart the transitions bound to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete event tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Controller finished booting
    Boot,
    /// Blade extends
    Ignition,
    /// Blade retracts
    Retraction,
    /// Impact detected
    Clash,
    /// Stab gesture detected
    Stab,
    /// Incoming blast deflected
    Blast,
    /// Force effect requested
    Force,
    /// Sustained lockup started
    LockupBegin,
    /// Sustained lockup released
    LockupEnd,
    /// Drag-along-surface started
    DragBegin,
    /// Drag-along-surface released
    DragEnd,
    /// Battery level display requested
    BatteryLevel,
    /// Battery charge dropped below the warning threshold
    LowBattery,
    /// A different resource font was selected
    NewFont,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trigger::Boot => "boot",
            Trigger::Ignition => "ignition",
            Trigger::Retraction => "retraction",
            Trigger::Clash => "clash",
            Trigger::Stab => "stab",
            Trigger::Blast => "blast",
            Trigger::Force => "force",
            Trigger::LockupBegin => "lockup-begin",
            Trigger::LockupEnd => "lockup-end",
            Trigger::DragBegin => "drag-begin",
            Trigger::DragEnd => "drag-end",
            Trigger::BatteryLevel => "battery-level",
            Trigger::LowBattery => "low-battery",
            Trigger::NewFont => "new-font",
        };
        write!(f, "{}", name)
    }
}
