//! Engine construction errors.

use std::error::Error;
use std::fmt;

/// Errors detected while assembling a [`NavEngine`](crate::NavEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavError {
    /// The terrain oracle's window and the channel layout disagree on
    /// the map dimensions, so storage indices would not line up.
    WindowMismatch {
        /// `(width, height)` of the oracle's coordinate window.
        window: (u32, u32),
        /// `(width, height)` of the channel layout.
        layout: (u32, u32),
    },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowMismatch { window, layout } => write!(
                f,
                "oracle window is {}x{} but channel layout is {}x{}",
                window.0, window.1, layout.0, layout.1
            ),
        }
    }
}

impl Error for NavError {}
