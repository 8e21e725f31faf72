//! Chained transitions through intermediate colors
//!
//! A sequencer composes an ordered chain of transitions into one larger
//! transition: between consecutive stages sits an intermediate color node
//! that is the end of the stage before it and the start of the stage after
//! it. When a stage completes, the next one begins in the same tick, so the
//! handoff is seamless on screen.

use crate::{Node, Transition};
use ember_core::{Frame, Shade, Trigger};

/// An ordered chain of transitions forming one larger transition
///
/// Holds `(transition, intermediate)` pairs plus a final transition; a
/// chain of one transition has no intermediates. Queries are stateless
/// across elements, so every light element can be evaluated independently
/// each frame.
#[derive(Debug, Clone)]
pub struct Sequencer {
    chain: Vec<(Transition, Node)>,
    last: Box<Transition>,
    current: usize,
    begun: bool,
}

impl Sequencer {
    /// Build a chain from `(transition, intermediate)` pairs and the final
    /// transition
    pub fn new(chain: Vec<(Transition, Node)>, last: Transition) -> Self {
        Self {
            chain,
            last: Box::new(last),
            current: 0,
            begun: false,
        }
    }

    /// Build a single-stage chain
    pub fn single(only: Transition) -> Self {
        Self::new(Vec::new(), only)
    }

    /// Number of stages in the chain
    pub fn stages(&self) -> usize {
        self.chain.len() + 1
    }

    fn stage(&self, index: usize) -> &Transition {
        if index < self.chain.len() {
            &self.chain[index].0
        } else {
            &self.last
        }
    }

    /// (Re)start the chain from its first stage
    pub fn begin(&mut self) {
        self.current = 0;
        self.begun = true;
        if let Some((first, _)) = self.chain.first_mut() {
            first.begin();
        } else {
            self.last.begin();
        }
    }

    /// True before the first `begin()` and after the final stage finishes
    pub fn done(&self) -> bool {
        if !self.begun {
            return true;
        }
        self.current == self.chain.len() && self.last.done()
    }

    /// Advance the active stage and the intermediates feeding it
    ///
    /// Intermediates at or below the active stage keep running every tick
    /// so their timers stay consistent. A stage that completes hands off to
    /// the next within this same call.
    pub fn run(&mut self, frame: &Frame) {
        for i in 0..self.current.min(self.chain.len()) {
            self.chain[i].1.run(frame);
        }
        let mut step = *frame;
        loop {
            if self.current < self.chain.len() {
                let (stage, intermediate) = &mut self.chain[self.current];
                intermediate.run(&step);
                stage.run(&step);
                if self.begun && stage.done() {
                    self.current += 1;
                    if self.current < self.chain.len() {
                        self.chain[self.current].0.begin();
                    } else {
                        self.last.begin();
                    }
                    // A freshly begun stage has seen none of this tick's time
                    step.delta_ms = 0;
                    continue;
                }
            } else {
                self.last.run(&step);
            }
            break;
        }
    }

    /// Forward a trigger into the intermediate nodes
    pub fn dispatch(&mut self, trigger: Trigger) {
        for (stage, intermediate) in &mut self.chain {
            stage.dispatch(trigger);
            intermediate.dispatch(trigger);
        }
        self.last.dispatch(trigger);
    }

    /// Blend between `start` and `end` for one element
    ///
    /// Before the first `begin()` and after completion this is `end`;
    /// mid-chain the active stage blends between the surrounding
    /// intermediates.
    pub fn get_color(&self, start: Shade, end: Shade, element: usize) -> Shade {
        if self.done() {
            return end;
        }
        let local_start = if self.current == 0 {
            start
        } else {
            self.chain[self.current - 1].1.get_color(element)
        };
        let local_end = if self.current < self.chain.len() {
            self.chain[self.current].1.get_color(element)
        } else {
            end
        };
        self.stage(self.current).get_color(local_start, local_end, element)
    }
}
