//! Pixel geometry primitives for the qview overlay.
//!
//! Coordinates are signed: an overlay centered on a small window can start
//! above or to the left of the container origin. Sizes are unsigned.

/// Width/height size type.
mod expanse;
/// One-pixel frame helpers.
mod frame;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// One-dimensional extents.
mod span;

pub use expanse::Expanse;
pub use frame::Frame;
pub use point::Point;
pub use rect::Rect;
pub use span::Span;
