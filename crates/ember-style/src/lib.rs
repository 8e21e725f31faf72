//! Ember Style - Effect-graph evaluator
//!
//! A style is a tree of composable nodes that produces a color per light
//! element per frame. The tree is built once from configuration and then
//! only advanced (`run`) and queried (`get_color`) on the render tick;
//! triggers dispatched into it restart the transitions bound to them.
//!
//! - `Node` - tagged-variant style node (color sources, compositors,
//!   trigger-bound wrappers)
//! - `Transition` - time-bounded blend between two colors with an explicit
//!   not-started / active / finished lifecycle
//! - `Sequencer` - chains transitions through intermediate colors into one
//!   larger transition
//! - `LayerStack` - composites an ordered set of nodes bottom-to-top
//! - `Style` - the tree root plus the per-frame driving surface
//!
//! Evaluation has no error conditions: every node yields a valid color in
//! every lifecycle state, including before the first trigger.

mod layers;
mod node;
mod sequencer;
mod transition;

pub use layers::LayerStack;
pub use node::{Node, Style};
pub use sequencer::Sequencer;
pub use transition::{Timed, Transition};
