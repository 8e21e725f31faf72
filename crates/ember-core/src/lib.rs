//! Ember Core - Shared leaf types for the effect engine
//!
//! This crate provides the types shared by the style evaluator and the
//! resource-font resolver:
//! - Frame clock and per-tick frame snapshot (`Tick`, `FrameClock`, `Frame`)
//! - Deterministic RNG (`Rng`)
//! - Color math for light elements (`Color`, `Shade`)
//! - Trigger event tags (`Trigger`)

mod color;
mod frame;
mod rng;
mod trigger;

pub use color::{Color, Shade};
pub use frame::{Frame, FrameClock, Tick};
pub use rng::Rng;
pub use trigger::Trigger;
