//! The two-bucket fractional-cost frontier.

use std::collections::VecDeque;

/// Edge weight of an orthogonal step, in tenths of a tick.
pub const ORTHOGONAL_TENTHS: u32 = 10;

/// Edge weight of a diagonal step, in tenths of a tick.
pub const DIAGONAL_TENTHS: u32 = 14;

/// One queued wavefront tile: wrapped coordinates plus accumulated move
/// cost in tenths of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Wrapped x coordinate.
    pub x: u8,
    /// Wrapped y coordinate.
    pub y: u8,
    /// Accumulated cost from the destination, x10.
    pub cost_tenths: u32,
}

/// A pair of round-robin ring queues standing in for a priority queue.
///
/// With only two edge weights (1.0 and 1.4 ticks), bucketing an entry by
/// the whole ticks its step crosses — queue `(current + (edge + carry) /
/// 10) % 2`, where `carry` is the fractional part of the parent's
/// accumulated cost, all in tenths — dequeues whole-tick cost
/// generations in non-decreasing order without any heap. A diagonal
/// step over a carry of 0.6 or more crosses two whole ticks at once;
/// the two rings only cover the current generation and the next, so
/// those entries are held aside until the rings cycle. Within one
/// generation ties dequeue FIFO and may reorder by under a tick.
#[derive(Clone, Debug)]
pub struct FrontierRings {
    queues: [VecDeque<FrontierEntry>; 2],
    held: VecDeque<FrontierEntry>,
    current: usize,
}

impl FrontierRings {
    /// Rings sized for a map of `cells` tiles. Every tile is enqueued at
    /// most once per expansion, so `cells` bounds the combined length.
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            queues: [
                VecDeque::with_capacity(cells),
                VecDeque::with_capacity(cells),
            ],
            held: VecDeque::new(),
            current: 0,
        }
    }

    /// Drop all entries and return to queue 0.
    pub fn reset(&mut self) {
        self.queues[0].clear();
        self.queues[1].clear();
        self.held.clear();
        self.current = 0;
    }

    /// Whether no entries remain anywhere (the expansion is quiescent).
    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty) && self.held.is_empty()
    }

    /// Enqueue a zero-cost source tile. Call only after
    /// [`reset`](Self::reset), before any pops.
    pub fn push_seed(&mut self, x: u8, y: u8) {
        self.queues[0].push_back(FrontierEntry {
            x,
            y,
            cost_tenths: 0,
        });
    }

    /// Enqueue a tile reached from a parent of cost `parent_tenths` over
    /// an edge of weight `edge_tenths`, into the bucket selected by the
    /// round-robin rule.
    pub fn push_expanded(&mut self, parent_tenths: u32, edge_tenths: u32, x: u8, y: u8) {
        let carry = parent_tenths % 10;
        let skip = ((edge_tenths + carry) / 10) as usize;
        let entry = FrontierEntry {
            x,
            y,
            cost_tenths: parent_tenths + edge_tenths,
        };
        if skip >= 2 {
            // Two generations out. The active ring would dequeue it a
            // whole tick early.
            self.held.push_back(entry);
        } else {
            self.queues[(self.current + skip) % 2].push_back(entry);
        }
    }

    /// Dequeue the next entry, cycling past empty buckets and admitting
    /// held entries as their generation comes around.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        for _ in 0..3 {
            if let Some(entry) = self.queues[self.current].pop_front() {
                return Some(entry);
            }
            // The ring that just drained fronts the generation the held
            // entries belong to.
            let drained = self.current;
            self.current = (self.current + 1) % 2;
            self.queues[drained].append(&mut self.held);
        }
        None
    }
}
