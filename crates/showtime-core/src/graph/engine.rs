//! Frame-driven engine: a graph plus the clock that ticks it.
//!
//! The host calls [`Engine::frame`] from its event loop with the wall time
//! elapsed since the session started. Editing happens between frames through
//! [`Engine::graph_mut`], so a tick is never observed half-done.

use std::time::Duration;

use super::processing::Graph;
use crate::tempo::{BeatClock, Scheduler};

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Beat-phase at this frame.
    pub phase: f64,
    /// Whether a tick fired.
    pub ticked: bool,
}

/// Owns the live graph and schedules its ticks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use showtime_core::{Engine, Graph};
///
/// let mut engine = Engine::new(Graph::new(), 60.0);
/// assert!(!engine.frame(Duration::from_millis(500)).ticked);
/// assert!(engine.frame(Duration::from_millis(1016)).ticked);
/// assert_eq!(engine.ticks(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    graph: Graph,
    clock: BeatClock,
    scheduler: Scheduler,
    phase: f64,
    ticks: u64,
}

impl Engine {
    /// Creates an engine at `bpm`, with time starting at zero.
    pub fn new(graph: Graph, bpm: f64) -> Self {
        Self {
            graph,
            clock: BeatClock::new(bpm),
            scheduler: Scheduler::default(),
            phase: 0.0,
            ticks: 0,
        }
    }

    /// Advances to `elapsed` and fires a tick if one is due.
    pub fn frame(&mut self, elapsed: Duration) -> FrameReport {
        self.phase = self.clock.phase_at(elapsed);
        let ticked = self.scheduler.on_frame(self.phase);
        if ticked {
            self.graph.tick();
            self.ticks += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "engine_tick: #{} at phase {:.3}",
                self.ticks,
                self.phase
            );
        }
        FrameReport {
            phase: self.phase,
            ticked,
        }
    }

    /// Beat-phase of the most recent frame.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Fraction of the current beat, in [0, 1).
    pub fn beat_fraction(&self) -> f64 {
        self.phase.rem_euclid(1.0)
    }

    /// Ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The beat clock.
    pub fn clock(&self) -> BeatClock {
        self.clock
    }

    /// The live graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for editing between frames.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Replaces the graph wholesale, returning the previous one. The clock
    /// keeps running.
    pub fn restore(&mut self, graph: Graph) -> Graph {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "engine_restore: {} nodes, {} wires",
            graph.node_count(),
            graph.wire_count()
        );
        std::mem::replace(&mut self.graph, graph)
    }
}
