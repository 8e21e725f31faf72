//! Time-bounded transitions between two colors
//!
//! A transition blends a start and an end shade over a fixed duration.
//! Lifecycle: not-started (reports done) -> begin() -> active -> finished.
//! begin() restarts unconditionally and idempotently; retriggering an event
//! simply begins the transition again. Queried in any state a transition
//! returns a valid shade; outside the active window that is the end shade,
//! so an untriggered transition is invisible in a composition.

use crate::Sequencer;
use ember_core::{Frame, Shade};

/// Lifecycle phase of a timed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Shared timing state of the simple transition variants
///
/// Tracks elapsed time against a fixed duration and snapshots the element
/// count for the per-element variants.
#[derive(Debug, Clone)]
pub struct Timed {
    duration_ms: u32,
    elapsed_ms: u32,
    elements: usize,
    phase: Phase,
}

impl Timed {
    fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0,
            elements: 0,
            phase: Phase::Idle,
        }
    }

    fn begin(&mut self) {
        self.elapsed_ms = 0;
        self.phase = Phase::Running;
    }

    fn run(&mut self, frame: &Frame) {
        self.elements = frame.elements;
        if self.phase == Phase::Running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(frame.delta_ms);
            if self.elapsed_ms >= self.duration_ms {
                self.phase = Phase::Finished;
            }
        }
    }

    fn done(&self) -> bool {
        self.phase != Phase::Running
    }

    /// Progress in [0, 1]; a zero duration counts as complete
    fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }
}

/// A time-bounded blend between two shades
#[derive(Debug, Clone)]
pub enum Transition {
    /// Cuts to the end shade on the tick it begins
    Instant(Timed),
    /// Linear blend from start to end over the duration
    Fade(Timed),
    /// Holds the start shade for the duration, then ends
    Delay(Timed),
    /// Sweeps the end shade from the first element toward the last
    Wipe(Timed),
    /// Sweeps the end shade from the last element toward the first
    WipeIn(Timed),
    /// A chain of transitions through intermediate colors
    Concat(Sequencer),
}

impl Transition {
    /// Instant cut
    pub fn instant() -> Self {
        Transition::Instant(Timed::new(0))
    }

    /// Linear fade over `duration_ms`
    pub fn fade(duration_ms: u32) -> Self {
        Transition::Fade(Timed::new(duration_ms))
    }

    /// Hold for `duration_ms`
    pub fn delay(duration_ms: u32) -> Self {
        Transition::Delay(Timed::new(duration_ms))
    }

    /// Sweep from the base toward the tip over `duration_ms`
    pub fn wipe(duration_ms: u32) -> Self {
        Transition::Wipe(Timed::new(duration_ms))
    }

    /// Sweep from the tip toward the base over `duration_ms`
    pub fn wipe_in(duration_ms: u32) -> Self {
        Transition::WipeIn(Timed::new(duration_ms))
    }

    /// Chain transitions through intermediate colors
    pub fn concat(sequencer: Sequencer) -> Self {
        Transition::Concat(sequencer)
    }

    /// (Re)start the transition
    pub fn begin(&mut self) {
        match self {
            Transition::Instant(t)
            | Transition::Fade(t)
            | Transition::Delay(t)
            | Transition::Wipe(t)
            | Transition::WipeIn(t) => t.begin(),
            Transition::Concat(s) => s.begin(),
        }
    }

    /// Advance by one frame
    pub fn run(&mut self, frame: &Frame) {
        match self {
            Transition::Instant(t)
            | Transition::Fade(t)
            | Transition::Delay(t)
            | Transition::Wipe(t)
            | Transition::WipeIn(t) => t.run(frame),
            Transition::Concat(s) => s.run(frame),
        }
    }

    /// True outside the active window (not yet begun, or finished)
    pub fn done(&self) -> bool {
        match self {
            Transition::Instant(t)
            | Transition::Fade(t)
            | Transition::Delay(t)
            | Transition::Wipe(t)
            | Transition::WipeIn(t) => t.done(),
            Transition::Concat(s) => s.done(),
        }
    }

    /// Forward a trigger into nested nodes (concat intermediates)
    pub fn dispatch(&mut self, trigger: ember_core::Trigger) {
        if let Transition::Concat(s) = self {
            s.dispatch(trigger);
        }
    }

    /// Blend between `start` and `end` for one element
    pub fn get_color(&self, start: Shade, end: Shade, element: usize) -> Shade {
        match self {
            Transition::Instant(_) => end,
            Transition::Fade(t) => {
                if t.done() {
                    end
                } else {
                    start.lerp(end, t.progress())
                }
            }
            Transition::Delay(t) => {
                if t.done() {
                    end
                } else {
                    start
                }
            }
            Transition::Wipe(t) => {
                if t.done() {
                    end
                } else {
                    let threshold = t.progress() * t.elements as f32;
                    if (element as f32) < threshold {
                        end
                    } else {
                        start
                    }
                }
            }
            Transition::WipeIn(t) => {
                if t.done() {
                    end
                } else {
                    let threshold = (1.0 - t.progress()) * t.elements as f32;
                    if (element as f32) >= threshold {
                        end
                    } else {
                        start
                    }
                }
            }
            Transition::Concat(s) => s.get_color(start, end, element),
        }
    }
}
