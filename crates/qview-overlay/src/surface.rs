//! The drawing surface the overlay paints on.
//!
//! The host owns the window (or screen), the base image and the fonts. The
//! overlay only needs to measure text, fill rectangles, draw text, ask the
//! host to repaint parts of the base image, and flush.
use unicode_width::UnicodeWidthStr;

use crate::{
    error::Result,
    geom::{Expanse, Point, Rect},
};

/// Font metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: i32,
    /// Distance from the baseline to the bottom of the lowest glyph.
    pub descent: i32,
}

impl FontMetrics {
    /// Construct font metrics.
    pub fn new(ascent: i32, descent: i32) -> Self {
        Self { ascent, descent }
    }

    /// Height of one text line.
    pub fn line_height(&self) -> i32 {
        self.ascent + self.descent
    }
}

/// The paints the overlay draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    /// The window background, used to erase areas outside the image.
    Background,
    /// The overlay panel fill.
    Panel,
    /// The overlay frame.
    Border,
    /// Overlay text and the cursor marker.
    Text,
}

/// A request to repaint (part of) the base surface, from cheapest to most
/// expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refresh {
    /// Copy already-rendered image pixels back over a region. Areas of the
    /// region outside the image are left alone.
    Region(Rect),
    /// Re-render the image and the status area.
    Image,
    /// Clear the whole surface, then re-render everything.
    Full,
}

/// The trait implemented by drawing surfaces.
pub trait Surface {
    /// Size of the active container: the screen in fullscreen mode, the
    /// window otherwise.
    fn container(&self) -> Expanse;

    /// Where the base image currently sits within the container.
    fn image_rect(&self) -> Rect;

    /// Metrics of the overlay font.
    fn metrics(&self) -> FontMetrics;

    /// Width of `txt` in pixels when drawn in the overlay font.
    fn text_width(&self, txt: &str) -> u32;

    /// Fill a rectangle.
    fn fill(&mut self, r: Rect, paint: Paint) -> Result<()>;

    /// Draw text with its top-left corner at `loc`.
    fn text(&mut self, loc: Point, txt: &str) -> Result<()>;

    /// Replace the text of the title/status area.
    fn title(&mut self, txt: &str) -> Result<()>;

    /// Repaint the base surface.
    fn refresh(&mut self, r: Refresh) -> Result<()>;

    /// Block until everything drawn so far is visible.
    fn flush(&mut self) -> Result<()>;
}

/// Text measurement for fixed-pitch fonts: every terminal column is `cell`
/// pixels wide. Wide characters take two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monospace {
    /// Width of one column in pixels.
    pub cell: u32,
}

impl Monospace {
    /// Construct a fixed-pitch measurer.
    pub fn new(cell: u32) -> Self {
        Self { cell }
    }

    /// Width of `txt` in pixels.
    pub fn width(&self, txt: &str) -> u32 {
        (txt.width() as u32).saturating_mul(self.cell)
    }
}
