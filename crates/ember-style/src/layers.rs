//! Layer compositing
//!
//! A layer stack holds an ordered list of nodes, the first being the
//! bottom. Every node advances every tick, active or not, so timers stay
//! consistent regardless of compositing order; colors fold upward with each
//! layer painting over the accumulated base through its own alpha. There is
//! no cross-layer state beyond that fold.

use crate::Node;
use ember_core::{Color, Frame, Shade, Trigger};

/// An ordered set of style nodes composited bottom-to-top
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Node>,
}

impl LayerStack {
    /// Create a stack; the first node is the bottom layer
    pub fn new(layers: Vec<Node>) -> Self {
        Self { layers }
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True when the stack holds no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Reset every layer
    pub fn begin(&mut self) {
        for layer in &mut self.layers {
            layer.begin();
        }
    }

    /// Advance every layer unconditionally
    pub fn run(&mut self, frame: &Frame) {
        for layer in &mut self.layers {
            layer.run(frame);
        }
    }

    /// True when every layer is done
    pub fn done(&self) -> bool {
        self.layers.iter().all(|l| l.done())
    }

    /// Forward a trigger to every layer
    pub fn dispatch(&mut self, trigger: Trigger) {
        for layer in &mut self.layers {
            layer.dispatch(trigger);
        }
    }

    /// Fold the layers over black into one opaque shade
    pub fn get_color(&self, element: usize) -> Shade {
        let mut base = Color::BLACK;
        for layer in &self.layers {
            base = layer.get_color(element).over(base);
        }
        Shade::opaque(base)
    }
}
