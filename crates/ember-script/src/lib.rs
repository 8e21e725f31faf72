//! Ember Script - RON configuration loader
//!
//! The engine's composition is declarative: a RON document names the effect
//! families, their pairing relationships, the trigger bindings and the
//! style trees. This crate parses that document and compiles it into the
//! runtime objects - a `ResourceCatalog` and one `Style` per light strip.
//! Composition is fixed per load; runtime mutation is limited to trigger
//! dispatch and the selection calls.
//!
//! Unlike the scan phase, loading DOES fail loudly: bad RON, duplicate
//! names and dangling references are configuration bugs, not runtime
//! conditions.

mod error;
mod loader;
pub mod schema;

pub use error::{Error, Result};
pub use loader::{compile_style, compile_transition, Loader};
pub use schema::{EffectDecl, FontConfig, PropConfig, StyleDef, TransitionDef, TriggerBinding};
