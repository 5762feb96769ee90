//! qview-overlay: the command overlay of the qview image viewer.
//!
//! The overlay is a single-line editor drawn as a box on top of the image.
//! It is used to type an image number to jump to, or to compose a command
//! for an external program. The interesting part is the repaint logic: the
//! image underneath is expensive to redraw, so every time the box changes
//! size the renderer works out the cheapest repaint that leaves the screen
//! correct.
//!
//! # Module Organization
//!
//! - [`buffer`] - The fixed-capacity UTF-8 edit buffer
//! - [`tagpos`] - Locating the offending word in tag error messages
//! - [`overlay`] - Overlay layout, repaint classification and drawing
//! - [`controller`] - The modal state machine driving everything else
//! - [`surface`] and [`viewer`] - The traits a host implements

#![warn(missing_docs)]

pub mod buffer;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod jump;
pub mod key;
pub mod mode;
pub mod overlay;
pub mod surface;
pub mod tagpos;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod viewer;

pub use qview_geom as geom;

pub use buffer::EditBuffer;
pub use command::{CommandOutput, CommandRunner, ShellCommand};
pub use config::Config;
pub use controller::{EditorState, Outcome};
pub use error::{Error, Result};
pub use event::Event;
pub use jump::JumpTarget;
pub use mode::Mode;
pub use overlay::{OverlayRenderer, OverlayState, Repaint};
pub use surface::{FontMetrics, Paint, Refresh, Surface};
pub use viewer::{Host, NormalKey, Viewer};
