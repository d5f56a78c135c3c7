//! Search statistics and timing.

use std::time::{Duration, Instant};

/// Counters updated during a search pass
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes visited
    pub nodes: u64,

    /// Nodes at root ply
    pub root_nodes: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Record elapsed time and compute NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    #[inline]
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    #[inline]
    pub fn inc_root_node(&mut self) {
        self.root_nodes += 1;
    }

    #[inline]
    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.search_time.as_millis() as u64
    }
}
