//! Incremental pathfinding for Wayfield.
//!
//! The engine runs a reverse breadth-first expansion from the requested
//! destination outward, in budget-bounded slices spread across ticks,
//! and publishes one bit-packed next-hop record per visited tile into a
//! leased shared-channel page. Because expansion state stays inside the
//! agent while results live in the channel, one agent computes and the
//! whole team consumes.
//!
//! - [`NavEngine`]: lease a page, expand a slice, commit metadata
//! - [`FrontierRings`]: the two-bucket queue that stands in for a
//!   priority queue given the 1.0/1.4 edge weights
//! - [`AdvanceRequest`] / [`AdvanceStatus`]: the per-tick contract with
//!   the calling agent

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod frontier;

pub use engine::{AdvanceRequest, AdvanceStatus, NavEngine, NavTarget};
pub use error::NavError;
pub use frontier::{FrontierEntry, FrontierRings};
