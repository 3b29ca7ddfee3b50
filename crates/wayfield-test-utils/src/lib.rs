//! Test utilities and mock hosts for Wayfield development.
//!
//! Provides mock implementations of the host traits ([`SharedChannel`],
//! [`HostClock`], [`TerrainSensor`], [`Landmarks`]) so every component
//! can be exercised without the real game host.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;

use wayfield_core::{ChannelError, HostClock, SharedChannel, TickId};

mod fixtures;

pub use fixtures::{AsciiMap, FixedLandmarks};

/// In-memory shared channel with optional failure injection.
///
/// Backed by a plain `Vec<u32>`. Construct with [`new`](ArrayChannel::new)
/// for an always-healthy channel, [`exhausted`](ArrayChannel::exhausted)
/// to fail every write, or [`failing_after`](ArrayChannel::failing_after)
/// to simulate the per-tick allowance running out mid-expansion.
pub struct ArrayChannel {
    cells: Vec<u32>,
    writes_before_failure: Option<usize>,
    writes: usize,
}

impl ArrayChannel {
    /// A healthy channel of `capacity` cells, all zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![0; capacity],
            writes_before_failure: None,
            writes: 0,
        }
    }

    /// A channel whose writes always fail with [`ChannelError::Exhausted`].
    pub fn exhausted(capacity: usize) -> Self {
        Self::failing_after(capacity, 0)
    }

    /// A channel that accepts `allowance` writes and then fails the rest.
    pub fn failing_after(capacity: usize, allowance: usize) -> Self {
        Self {
            cells: vec![0; capacity],
            writes_before_failure: Some(allowance),
            writes: 0,
        }
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Direct cell access for assertions.
    pub fn cell(&self, index: usize) -> u32 {
        self.cells[index]
    }
}

impl SharedChannel for ArrayChannel {
    fn capacity(&self) -> usize {
        self.cells.len()
    }

    fn read_cell(&self, index: usize) -> Result<u32, ChannelError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(ChannelError::OutOfRange {
                index,
                capacity: self.cells.len(),
            })
    }

    fn write_cell(&mut self, index: usize, value: u32) -> Result<(), ChannelError> {
        if let Some(allowance) = self.writes_before_failure {
            if self.writes >= allowance {
                return Err(ChannelError::Exhausted);
            }
        }
        let capacity = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(ChannelError::OutOfRange { index, capacity })?;
        *cell = value;
        self.writes += 1;
        Ok(())
    }
}

/// Scriptable host clock and compute-budget source.
///
/// The budget drains by `drain_per_query` every time it is observed,
/// which lets tests force suspension after an exact number of expansion
/// steps. [`advance`](FakeClock::advance) moves the tick forward and
/// refills the budget, as the host scheduler does between rounds.
pub struct FakeClock {
    tick: Cell<u32>,
    budget: Cell<u32>,
    refill: u32,
    drain_per_query: u32,
}

impl FakeClock {
    /// A clock at `tick` with an effectively unlimited budget.
    pub fn new(tick: u32) -> Self {
        Self::with_budget(tick, u32::MAX, 0)
    }

    /// A clock whose budget starts at `budget` each tick and drains by
    /// `drain_per_query` per observation.
    pub fn with_budget(tick: u32, budget: u32, drain_per_query: u32) -> Self {
        Self {
            tick: Cell::new(tick),
            budget: Cell::new(budget),
            refill: budget,
            drain_per_query,
        }
    }

    /// Advance the tick by `ticks` and refill the budget.
    pub fn advance(&self, ticks: u32) {
        self.tick.set(self.tick.get() + ticks);
        self.budget.set(self.refill);
    }

    /// Override the remaining budget for the current tick.
    pub fn set_budget(&self, budget: u32) {
        self.budget.set(budget);
    }
}

impl HostClock for FakeClock {
    fn current_tick(&self) -> TickId {
        TickId(self.tick.get())
    }

    fn remaining_budget(&self) -> u32 {
        let remaining = self.budget.get();
        self.budget
            .set(remaining.saturating_sub(self.drain_per_query));
        remaining
    }
}
