//! The boxed overlay drawn over the image: geometry, repaint classification
//! and drawing.

/// Pure repaint classification.
mod classify;
/// Drawing and state tracking.
mod renderer;

pub use classify::{Repaint, classify};
pub use renderer::{Layout, OverlayRenderer};

use crate::geom::Rect;

/// What the overlay currently looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayState {
    /// Geometry of the last drawn overlay box.
    pub rect: Rect,
    /// Is an overlay on screen?
    pub displayed: bool,
    /// Has nothing but overlay typing touched the screen since the overlay
    /// was last drawn?
    pub clean: bool,
}

impl OverlayState {
    /// A displayed overlay at `rect`.
    pub fn shown(rect: Rect, clean: bool) -> Self {
        Self {
            rect,
            displayed: true,
            clean,
        }
    }
}
