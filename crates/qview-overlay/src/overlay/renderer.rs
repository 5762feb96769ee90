use std::iter;

use tracing::debug;

use super::{OverlayState, Repaint, classify};
use crate::{
    config::Config,
    error::Result,
    geom::{Expanse, Frame, Point, Rect},
    surface::{Paint, Refresh, Surface},
};

/// Space between the box edge and the text.
const PAD: i32 = 4;

/// Blank lines reserved around the content: one for the continuation
/// message, one above it, one for the box padding.
const RESERVED_LINES: i64 = 3;

/// Where everything goes for one overlay draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// The overlay box.
    pub rect: Rect,
    /// Top-left of the first content line.
    pub text: Point,
    /// Height of one line.
    pub line_height: i32,
    /// Number of content lines drawn.
    pub shown: usize,
    /// Top-left of the continuation message.
    pub message: Point,
}

impl Layout {
    /// Lay out `lines` and `message` centered in the surface's container.
    pub fn compute<S, L>(
        s: &S,
        lines: &[L],
        message: &str,
        margin: i32,
        fallback_lines: usize,
    ) -> Self
    where
        S: Surface + ?Sized,
        L: AsRef<str>,
    {
        let Expanse { w, h } = s.container();
        let (cw, ch) = (i64::from(w), i64::from(h));
        let metrics = s.metrics();
        let lh = i64::from(metrics.line_height());

        let max_lines = if lh > 0 {
            (ch / lh - RESERVED_LINES).max(1) as usize
        } else {
            fallback_lines
        };
        let shown = lines.len().min(max_lines);
        let message_w = i64::from(s.text_width(message));
        let text_w = lines[..shown]
            .iter()
            .map(|l| i64::from(s.text_width(l.as_ref())))
            .chain(iter::once(message_w))
            .max()
            .unwrap_or(0);
        let text_h = (shown as i64 + 2) * lh.max(0);

        let left = (cw / 2 - text_w / 2 - i64::from(PAD)).max(i64::from(margin));
        let top = ch / 2 - text_h / 2;
        let rect = Rect::new(
            left as i32,
            (top - i64::from(PAD)) as i32,
            (text_w + 7) as u32,
            (text_h + 7) as u32,
        );
        let message_y = top - i64::from(metrics.descent) + (shown as i64 + 1) * lh;
        Self {
            rect,
            text: Point::new(left as i32 + PAD, top as i32),
            line_height: lh as i32,
            shown,
            message: Point::new((cw / 2 - message_w / 2) as i32, message_y as i32),
        }
    }

    /// Top-left of content line `i`.
    pub fn line(&self, i: usize) -> Point {
        self.text.offset(0, i as i32 * self.line_height)
    }
}

/// Draws the overlay box and decides how much of the base surface must be
/// repainted each time it changes.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    /// The box currently on screen.
    state: OverlayState,
    /// Title last written to the status area.
    title: Option<String>,
    /// Minimum distance of the box from the left container edge.
    margin: i32,
    /// Line cap used when the font reports no line height.
    fallback_lines: usize,
}

impl OverlayRenderer {
    /// Construct a renderer with layout settings from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            state: OverlayState::default(),
            title: None,
            margin: config.margin,
            fallback_lines: config.fallback_lines,
        }
    }

    /// The overlay as it currently stands.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Is an overlay on screen?
    pub fn is_displayed(&self) -> bool {
        self.state.displayed
    }

    /// Note that something other than overlay typing touched the screen.
    pub fn mark_dirty(&mut self) {
        self.state.clean = false;
    }

    /// Forget the overlay without repainting, because the host has just
    /// redrawn the whole surface anyway.
    pub fn forget(&mut self) {
        self.state.displayed = false;
    }

    /// Draw `lines` in a centered box with `message` on the last line and an
    /// optional cursor at byte offset `cursor` of the first line. The screen
    /// is flushed before returning.
    pub fn display<S, L>(
        &mut self,
        s: &mut S,
        title: &str,
        lines: &[L],
        cursor: Option<usize>,
        message: &str,
    ) -> Result<Repaint>
    where
        S: Surface + ?Sized,
        L: AsRef<str>,
    {
        let layout = Layout::compute(s, lines, message, self.margin, self.fallback_lines);
        let repaint = classify(&self.state, layout.rect);
        debug!(?repaint, prev = ?self.state, next = ?layout.rect, "overlay display");

        let redrew = self.prepare(s, repaint)?;
        if redrew || self.title.as_deref() != Some(title) {
            s.title(title)?;
            self.title = Some(title.to_string());
        }

        s.fill(layout.rect, Paint::Panel)?;
        for edge in Frame::new(layout.rect, 1).edges() {
            s.fill(edge, Paint::Border)?;
        }
        for (i, line) in lines[..layout.shown].iter().enumerate() {
            s.text(layout.line(i), line.as_ref())?;
        }
        if let Some(first) = lines[..layout.shown].first()
            && let Some(x) = cursor_offset(s, first.as_ref(), cursor)
        {
            let marker = Rect::new(
                layout.text.x + x,
                layout.text.y,
                1,
                layout.line_height.max(1) as u32,
            );
            s.fill(marker, Paint::Text)?;
        }
        s.text(layout.message, message)?;
        s.flush()?;

        self.state = OverlayState::shown(layout.rect, true);
        Ok(repaint)
    }

    /// Remove the overlay from the screen, restoring what was under it.
    pub fn hide<S: Surface + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        if !self.state.displayed {
            return Ok(());
        }
        let prev = self.state.rect;
        let image = s.image_rect();
        debug!(?prev, ?image, clean = self.state.clean, "overlay hide");
        if image.vspan().contains(&prev.vspan()) {
            // The image spans the overlay vertically: fill the bars beside
            // the image, copy image pixels back over the rest.
            for bar in side_bars(prev, image) {
                s.fill(bar, Paint::Background)?;
            }
            s.refresh(if self.state.clean {
                Refresh::Region(prev)
            } else {
                Refresh::Image
            })?;
        } else {
            s.refresh(Refresh::Full)?;
        }
        s.flush()?;
        self.state.displayed = false;
        self.state.clean = false;
        Ok(())
    }

    /// Repaint the base surface ahead of a new box. Returns true if the status
    /// area was repainted with it.
    fn prepare<S: Surface + ?Sized>(&self, s: &mut S, repaint: Repaint) -> Result<bool> {
        match repaint {
            Repaint::Skip => Ok(false),
            Repaint::StripErase { left, right } => {
                let image = s.image_rect();
                for strip in [left, right] {
                    if strip.is_zero() {
                        continue;
                    }
                    s.fill(strip, Paint::Background)?;
                    if let Some(exposed) = strip.intersect(&image) {
                        s.refresh(Refresh::Region(exposed))?;
                    }
                }
                Ok(false)
            }
            Repaint::ContainedRefresh { clean: true } => {
                s.refresh(Refresh::Region(self.state.rect))?;
                Ok(false)
            }
            Repaint::ContainedRefresh { clean: false } => {
                s.refresh(Refresh::Image)?;
                Ok(true)
            }
            Repaint::FullRedraw => {
                s.refresh(Refresh::Full)?;
                Ok(true)
            }
        }
    }
}

/// Pixel offset of byte position `cursor` within `line`, if it is a valid
/// character boundary.
fn cursor_offset<S: Surface + ?Sized>(s: &S, line: &str, cursor: Option<usize>) -> Option<i32> {
    let pos = cursor?;
    if !line.is_char_boundary(pos) {
        return None;
    }
    Some(s.text_width(&line[..pos]) as i32)
}

/// The parts of `prev` left and right of the image's horizontal extent.
fn side_bars(prev: Rect, image: Rect) -> impl Iterator<Item = Rect> {
    let v = prev.vspan();
    let (left, right) = (i64::from(prev.tl.x), prev.right());
    let (img_left, img_right) = (i64::from(image.tl.x), image.right());
    let bar_l = (left, img_left.min(right));
    let bar_r = (img_right.max(left), right);
    [bar_l, bar_r]
        .into_iter()
        .filter(|(a, b)| b > a)
        .map(move |(a, b)| Rect::new(a as i32, v.off, (b - a) as u32, v.len))
}
