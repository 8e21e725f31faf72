//! Tagged-variant style nodes
//!
//! The style tree is a statically constructed object graph: configuration
//! builds it once, and afterwards the render path only advances and queries
//! it. Every variant honors the same capability set - begin, run, done,
//! get_color - plus trigger dispatch; evaluation always yields a valid
//! shade, whatever the lifecycle state.

use crate::{LayerStack, Transition};
use ember_core::{Color, Frame, Rng, Shade, Trigger};

/// One node of the style tree
#[derive(Debug, Clone)]
pub enum Node {
    /// Fixed shade
    Solid(Shade),
    /// Per-frame random blend between two children
    RandomFlicker {
        a: Box<Node>,
        b: Box<Node>,
        mix: f32,
        rng: Rng,
    },
    /// Blend between two children driven by the audio envelope
    AudioFlicker {
        a: Box<Node>,
        b: Box<Node>,
        level: f32,
    },
    /// Battery indicator: charge-colored fill over a transparent remainder
    BatteryGauge {
        low: Box<Node>,
        high: Box<Node>,
        level: f32,
        elements: usize,
    },
    /// Composited sub-stack
    Layers(LayerStack),
    /// A transition restarted whenever its trigger is dispatched
    ///
    /// Blends transparent-to-transparent, so the flash colors live in the
    /// transition's own chain and the layer vanishes once it completes.
    TriggerTransition {
        trigger: Trigger,
        transition: Transition,
    },
    /// Ignition/retraction gate around a base style
    InOut {
        ignite: Transition,
        retract: Transition,
        base: Box<Node>,
        off: Shade,
        on: bool,
    },
}

impl Node {
    /// Opaque solid color
    pub fn solid(color: Color) -> Node {
        Node::Solid(Shade::opaque(color))
    }

    /// Solid shade with explicit alpha
    pub fn solid_shade(shade: Shade) -> Node {
        Node::Solid(shade)
    }

    /// Random per-frame blend between two children
    pub fn random_flicker(a: Node, b: Node, seed: u64) -> Node {
        Node::RandomFlicker {
            a: Box::new(a),
            b: Box::new(b),
            mix: 0.0,
            rng: Rng::new(seed),
        }
    }

    /// Audio-driven blend between two children
    pub fn audio_flicker(a: Node, b: Node) -> Node {
        Node::AudioFlicker {
            a: Box::new(a),
            b: Box::new(b),
            level: 0.0,
        }
    }

    /// Battery fill indicator between a low and a high color
    pub fn battery_gauge(low: Node, high: Node) -> Node {
        Node::BatteryGauge {
            low: Box::new(low),
            high: Box::new(high),
            level: 1.0,
            elements: 0,
        }
    }

    /// Composited sub-stack; the first node is the bottom layer
    pub fn layers(layers: Vec<Node>) -> Node {
        Node::Layers(LayerStack::new(layers))
    }

    /// Transition layer restarted by a trigger
    pub fn trigger_transition(trigger: Trigger, transition: Transition) -> Node {
        Node::TriggerTransition {
            trigger,
            transition,
        }
    }

    /// Ignition/retraction gate around a base style
    pub fn in_out(ignite: Transition, retract: Transition, base: Node, off: Shade) -> Node {
        Node::InOut {
            ignite,
            retract,
            base: Box::new(base),
            off,
            on: false,
        }
    }

    /// Reset the node and its children
    ///
    /// Trigger-bound transitions are left idle; they only restart on
    /// dispatch.
    pub fn begin(&mut self) {
        match self {
            Node::Solid(_) => {}
            Node::RandomFlicker { a, b, .. } | Node::AudioFlicker { a, b, .. } => {
                a.begin();
                b.begin();
            }
            Node::BatteryGauge { low, high, .. } => {
                low.begin();
                high.begin();
            }
            Node::Layers(stack) => stack.begin(),
            Node::TriggerTransition { .. } => {}
            Node::InOut { base, .. } => base.begin(),
        }
    }

    /// Advance the node and all of its children by one frame
    pub fn run(&mut self, frame: &Frame) {
        match self {
            Node::Solid(_) => {}
            Node::RandomFlicker { a, b, mix, rng } => {
                *mix = rng.next_f32();
                a.run(frame);
                b.run(frame);
            }
            Node::AudioFlicker { a, b, level } => {
                *level = frame.audio_level.clamp(0.0, 1.0);
                a.run(frame);
                b.run(frame);
            }
            Node::BatteryGauge {
                low,
                high,
                level,
                elements,
            } => {
                *level = frame.battery.clamp(0.0, 1.0);
                *elements = frame.elements;
                low.run(frame);
                high.run(frame);
            }
            Node::Layers(stack) => stack.run(frame),
            Node::TriggerTransition { transition, .. } => transition.run(frame),
            Node::InOut {
                ignite,
                retract,
                base,
                ..
            } => {
                base.run(frame);
                ignite.run(frame);
                retract.run(frame);
            }
        }
    }

    /// True when no transition anywhere below is mid-flight
    pub fn done(&self) -> bool {
        match self {
            Node::Solid(_) => true,
            Node::RandomFlicker { a, b, .. } | Node::AudioFlicker { a, b, .. } => {
                a.done() && b.done()
            }
            Node::BatteryGauge { low, high, .. } => low.done() && high.done(),
            Node::Layers(stack) => stack.done(),
            Node::TriggerTransition { transition, .. } => transition.done(),
            Node::InOut {
                ignite,
                retract,
                base,
                ..
            } => ignite.done() && retract.done() && base.done(),
        }
    }

    /// Route a trigger to the nodes bound to it
    pub fn dispatch(&mut self, trigger: Trigger) {
        match self {
            Node::Solid(_) => {}
            Node::RandomFlicker { a, b, .. } | Node::AudioFlicker { a, b, .. } => {
                a.dispatch(trigger);
                b.dispatch(trigger);
            }
            Node::BatteryGauge { low, high, .. } => {
                low.dispatch(trigger);
                high.dispatch(trigger);
            }
            Node::Layers(stack) => stack.dispatch(trigger),
            Node::TriggerTransition {
                trigger: bound,
                transition,
            } => {
                if *bound == trigger {
                    transition.begin();
                }
                transition.dispatch(trigger);
            }
            Node::InOut {
                ignite,
                retract,
                base,
                on,
                ..
            } => {
                match trigger {
                    Trigger::Ignition => {
                        *on = true;
                        ignite.begin();
                    }
                    Trigger::Retraction => {
                        *on = false;
                        retract.begin();
                    }
                    _ => {}
                }
                base.dispatch(trigger);
                ignite.dispatch(trigger);
                retract.dispatch(trigger);
            }
        }
    }

    /// Shade of one light element
    pub fn get_color(&self, element: usize) -> Shade {
        match self {
            Node::Solid(shade) => *shade,
            Node::RandomFlicker { a, b, mix, .. } => {
                a.get_color(element).lerp(b.get_color(element), *mix)
            }
            Node::AudioFlicker { a, b, level } => {
                a.get_color(element).lerp(b.get_color(element), *level)
            }
            Node::BatteryGauge {
                low,
                high,
                level,
                elements,
            } => {
                let filled = (*level * *elements as f32).ceil() as usize;
                if element < filled {
                    low.get_color(element).lerp(high.get_color(element), *level)
                } else {
                    Shade::TRANSPARENT
                }
            }
            Node::Layers(stack) => stack.get_color(element),
            Node::TriggerTransition { transition, .. } => {
                transition.get_color(Shade::TRANSPARENT, Shade::TRANSPARENT, element)
            }
            Node::InOut {
                ignite,
                retract,
                base,
                off,
                on,
            } => {
                let lit = base.get_color(element);
                if *on {
                    ignite.get_color(*off, lit, element)
                } else {
                    retract.get_color(lit, *off, element)
                }
            }
        }
    }
}

/// A complete style: the tree root plus the per-frame driving surface
#[derive(Debug, Clone)]
pub struct Style {
    root: Node,
}

impl Style {
    /// Wrap a node tree as a complete style
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// The tree root
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Reset the tree
    pub fn begin(&mut self) {
        self.root.begin();
    }

    /// Advance the tree by one frame
    pub fn run(&mut self, frame: &Frame) {
        self.root.run(frame);
    }

    /// Route a trigger into the tree
    pub fn dispatch(&mut self, trigger: Trigger) {
        self.root.dispatch(trigger);
    }

    /// Final color of one light element
    pub fn color_at(&self, element: usize) -> Color {
        self.root.get_color(element).over(Color::BLACK)
    }
}
