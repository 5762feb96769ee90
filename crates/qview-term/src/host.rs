//! A terminal stand-in for the image window.
//!
//! Every terminal cell is one "pixel" and every text line is one cell high.
//! The image is a coloured placeholder block with the file name in the
//! middle, and the bottom row is the status bar that carries the overlay
//! title.
use std::io::{self, Stderr, Write};

use crossterm::{QueueableCommand, cursor as ccursor, style, terminal};
use qview_overlay::{
    CommandOutput, CommandRunner, Error, JumpTarget, NormalKey, Result, ShellCommand, Viewer,
    geom::{Expanse, Point, Rect, Span},
    key::{Key, KeyCode},
    surface::{FontMetrics, Monospace, Paint, Refresh, Surface},
};
use tracing::debug;

/// Convert terminal IO errors.
fn translate_result<T>(e: io::Result<T>) -> Result<T> {
    e.map_err(|e| Error::Render(e.to_string()))
}

/// Colour used for each paint.
fn paint_color(p: Paint) -> style::Color {
    match p {
        Paint::Background => style::Color::Black,
        Paint::Panel => style::Color::DarkBlue,
        Paint::Border => style::Color::Grey,
        Paint::Text => style::Color::White,
    }
}

/// The terminal host.
pub struct TermHost {
    /// Output stream.
    fp: Stderr,
    /// Terminal size.
    size: Expanse,
    /// Image names.
    images: Vec<String>,
    /// Index of the current image.
    current: usize,
    /// Runs the external command.
    runner: ShellCommand,
    /// Text of the status bar.
    status: String,
    /// Text measurement.
    mono: Monospace,
}

impl TermHost {
    /// A host showing `images`, running `command` for the overlay.
    pub fn new(size: Expanse, images: Vec<String>, command: &str) -> Self {
        Self {
            fp: io::stderr(),
            size,
            images,
            current: 0,
            runner: ShellCommand::new(command),
            status: String::new(),
            mono: Monospace::new(1),
        }
    }

    /// Adopt a new terminal size.
    pub fn resize(&mut self, size: Expanse) {
        self.size = size;
    }

    /// The current image's position and name for the status bar.
    fn describe(&self) -> String {
        format!(
            "qview {}/{} {}",
            self.current + 1,
            self.images.len(),
            self.current_image()
        )
    }

    /// Colour of the current image placeholder.
    fn image_color(&self) -> style::Color {
        style::Color::AnsiValue(22 + (self.current as u8).wrapping_mul(37) % 200)
    }

    /// Queue `txt` at `loc`, clipped to the screen.
    fn put(&mut self, loc: Point, txt: &str) -> io::Result<()> {
        if loc.y < 0 || loc.y as u32 >= self.size.h {
            return Ok(());
        }
        let skip = (-loc.x).max(0) as usize;
        let room = (self.size.w as i64 - i64::from(loc.x.max(0))).max(0) as usize;
        let clipped: String = txt.chars().skip(skip).take(room).collect();
        if clipped.is_empty() {
            return Ok(());
        }
        self.fp
            .queue(ccursor::MoveTo(loc.x.max(0) as u16, loc.y as u16))?;
        self.fp.queue(style::Print(clipped))?;
        Ok(())
    }

    /// Queue overlay text.
    fn panel_text(&mut self, loc: Point, txt: &str) -> io::Result<()> {
        self.fp
            .queue(style::SetBackgroundColor(paint_color(Paint::Panel)))?;
        self.fp
            .queue(style::SetForegroundColor(paint_color(Paint::Text)))?;
        self.put(loc, txt)
    }

    /// Queue a solid block of colour.
    fn block(&mut self, r: Rect, color: style::Color) -> io::Result<()> {
        let Some(r) = r.intersect(&self.size.rect()) else {
            return Ok(());
        };
        self.fp.queue(style::SetBackgroundColor(color))?;
        let row = " ".repeat(r.w as usize);
        for y in r.tl.y..r.tl.y + r.h as i32 {
            self.put(Point::new(r.tl.x, y), &row)?;
        }
        Ok(())
    }

    /// Redraw the part of the image inside `r`.
    fn draw_image(&mut self, r: Rect) -> io::Result<()> {
        let image = self.image_rect();
        let Some(r) = r.intersect(&image) else {
            return Ok(());
        };
        let color = self.image_color();
        self.block(r, color)?;

        let name = self.current_image();
        let name_y = image.tl.y + image.h as i32 / 2;
        if r.vspan().contains(&Span::new(name_y, 1)) {
            let name_x = image.tl.x + (image.w as i32 - name.len() as i32) / 2;
            let skip = (r.tl.x - name_x).max(0) as usize;
            let start = name_x.max(r.tl.x);
            let room = (r.right() - i64::from(start)).max(0) as usize;
            let visible: String = name.chars().skip(skip).take(room).collect();
            self.fp.queue(style::SetForegroundColor(style::Color::White))?;
            self.put(Point::new(start, name_y), &visible)?;
        }
        Ok(())
    }

    /// Redraw the status bar.
    fn draw_status(&mut self) -> io::Result<()> {
        if self.size.h == 0 {
            return Ok(());
        }
        let y = self.size.h as i32 - 1;
        let text = format!("{} {}", self.describe(), self.status);
        let padded = format!("{text:<width$}", width = self.size.w as usize);
        self.fp.queue(style::SetBackgroundColor(style::Color::DarkGrey))?;
        self.fp.queue(style::SetForegroundColor(style::Color::White))?;
        self.put(Point::new(0, y), &padded)
    }

    /// Clear the screen and draw everything.
    fn draw_all(&mut self) -> io::Result<()> {
        self.fp.queue(style::SetBackgroundColor(paint_color(Paint::Background)))?;
        self.fp.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_image(self.size.rect())?;
        self.draw_status()
    }
}

impl Surface for TermHost {
    fn container(&self) -> Expanse {
        self.size
    }

    fn image_rect(&self) -> Rect {
        let w = self.size.w * 2 / 3;
        let h = self.size.h.saturating_sub(3);
        Rect::new(((self.size.w - w) / 2) as i32, 1, w, h)
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics::new(1, 0)
    }

    fn text_width(&self, txt: &str) -> u32 {
        self.mono.width(txt)
    }

    fn fill(&mut self, r: Rect, paint: Paint) -> Result<()> {
        translate_result(self.block(r, paint_color(paint)))
    }

    fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
        translate_result(self.panel_text(loc, txt))
    }

    fn title(&mut self, txt: &str) -> Result<()> {
        self.status = txt.to_string();
        translate_result(self.draw_status())
    }

    fn refresh(&mut self, r: Refresh) -> Result<()> {
        debug!(?r, "refresh");
        translate_result(match r {
            Refresh::Region(r) => self.draw_image(r),
            Refresh::Image => self
                .draw_image(self.size.rect())
                .and_then(|_| self.draw_status()),
            Refresh::Full => self.draw_all(),
        })
    }

    fn flush(&mut self) -> Result<()> {
        translate_result(self.fp.flush())
    }
}

impl Viewer for TermHost {
    fn current_image(&self) -> String {
        self.images.get(self.current).cloned().unwrap_or_default()
    }

    fn run_command(&mut self, text: &str, image: &str, tab_probe: bool) -> Result<CommandOutput> {
        self.runner.run(text, image, tab_probe)
    }

    fn jump(&mut self, expr: &str) -> Result<()> {
        let target = JumpTarget::parse(expr)?;
        self.current = target
            .resolve(self.current, self.images.len())
            .ok_or_else(|| Error::Jump("no images".into()))?;
        Ok(())
    }

    fn load_image(&mut self) -> Result<bool> {
        self.status.clear();
        self.refresh(Refresh::Full)?;
        self.flush()?;
        Ok(true)
    }

    fn normal_key(&mut self, key: &Key) -> Result<NormalKey> {
        let n = self.images.len().max(1);
        let k = key.normalize();
        if k == 'q' || k == KeyCode::Esc {
            return Ok(NormalKey::Quit);
        }
        if k == ' ' || k == KeyCode::Right || k == KeyCode::PageDown {
            self.current = (self.current + 1) % n;
        } else if k == KeyCode::Backspace || k == KeyCode::Left || k == KeyCode::PageUp {
            self.current = (self.current + n - 1) % n;
        } else {
            return Ok(NormalKey::Ignored);
        }
        self.load_image()?;
        Ok(NormalKey::Handled)
    }
}
