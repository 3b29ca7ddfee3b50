//! Map knowledge for Wayfield: coordinate wrapping, symmetry inference,
//! and the cached terrain oracle.
//!
//! The host offsets map coordinates by an undisclosed amount each run
//! and only reveals terrain within sensor range. This crate owns the
//! three pieces that turn raw sensing into usable map knowledge:
//!
//! - [`CoordinateWindow`]: wrap/translate between logical coordinates
//!   and the toroidal storage window, with dynamically discovered bounds
//! - [`SymmetryModel`]: the geometric transform mapping one side of the
//!   map onto the other, detected once from the base locations
//! - [`TerrainOracle`]: a per-agent cache over raw terrain queries that
//!   mirrors every definite result through the symmetry model

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod oracle;
pub mod symmetry;
pub mod window;

pub use error::MapError;
pub use oracle::TerrainOracle;
pub use symmetry::{Symmetry, SymmetryModel};
pub use window::CoordinateWindow;
