//! Shared-channel paging for Wayfield.
//!
//! The team's only communication mechanism is a fixed-size array of
//! integer cells. This crate partitions it into a small pool of
//! pathfinding "pages" plus a metadata tail ([`ChannelLayout`]), defines
//! the two bit-packed wire words that cross it ([`PageMetadata`],
//! [`PathRecord`]), arbitrates transient page ownership through implicit
//! leases ([`PageAllocator`]), and publishes/reads per-tile results
//! ([`ResultPublisher`], [`ResultReader`]).
//!
//! Nothing here holds a lock: a page belongs to whoever most recently
//! stamped its metadata tick, ownership silently expires when the stamp
//! goes stale, and readers always destination-match each record, so the
//! worst outcome of a lease collision is one tick of duplicated work.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod layout;
pub mod metadata;
pub mod publish;
pub mod record;

pub use allocator::{PageAllocator, PageGrant};
pub use layout::{ChannelLayout, LayoutError, MAX_PAGES};
pub use metadata::PageMetadata;
pub use publish::{ResultPublisher, ResultReader};
pub use record::PathRecord;
