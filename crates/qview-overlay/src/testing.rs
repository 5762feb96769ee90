//! Test doubles for the drawing surface and the viewer.
use std::collections::{HashMap, VecDeque};

use crate::{
    command::CommandOutput,
    error::{Error, Result},
    geom::{Expanse, Point, Rect},
    jump::JumpTarget,
    key::Key,
    mode::Mode,
    surface::{FontMetrics, Monospace, Paint, Refresh, Surface},
    viewer::{NormalKey, Viewer},
};

/// Width of one character cell on the recording surface.
pub const CELL: u32 = 10;

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// A rectangle fill.
    Fill(Rect, Paint),
    /// A text draw.
    Text(Point, String),
    /// A title change.
    Title(String),
    /// A base surface repaint.
    Refresh(Refresh),
    /// A flush.
    Flush,
}

/// A surface that records every call made against it. Text is measured in
/// fixed 10px cells; lines are 20px high.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    /// Container size.
    container: Expanse,
    /// Where the image sits.
    image: Rect,
    /// Font metrics.
    metrics: FontMetrics,
    /// Text measurement.
    mono: Monospace,
    /// Recorded operations since the last `take`.
    ops: Vec<DrawOp>,
    /// Make every drawing call fail.
    failing: bool,
}

impl RecordingSurface {
    /// A surface of the given size, with the image filling it.
    pub fn new(container: Expanse) -> Self {
        Self {
            container,
            image: container.rect(),
            metrics: FontMetrics::new(16, 4),
            mono: Monospace::new(CELL),
            ops: vec![],
            failing: false,
        }
    }

    /// Place the image at `r`.
    pub fn with_image(mut self, r: Rect) -> Self {
        self.image = r;
        self
    }

    /// Use the given font metrics.
    pub fn with_metrics(mut self, ascent: i32, descent: i32) -> Self {
        self.metrics = FontMetrics::new(ascent, descent);
        self
    }

    /// Make every drawing call fail from now on.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Change the container size.
    pub fn resize(&mut self, e: Expanse) {
        self.container = e;
        self.image = e.rect();
    }

    /// All recorded operations since the last `take`.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded operations.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Rectangles filled with `paint`.
    pub fn fills(&self, paint: Paint) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(r, p) if *p == paint => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Refresh requests.
    pub fn refreshes(&self) -> Vec<Refresh> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Refresh(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Titles written.
    pub fn titles(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Title(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    /// Text drawn, in order.
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(_, t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    /// Record an operation.
    fn push(&mut self, op: DrawOp) -> Result<()> {
        if self.failing {
            return Err(Error::Render("recording surface failure".into()));
        }
        self.ops.push(op);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn container(&self) -> Expanse {
        self.container
    }

    fn image_rect(&self) -> Rect {
        self.image
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn text_width(&self, txt: &str) -> u32 {
        self.mono.width(txt)
    }

    fn fill(&mut self, r: Rect, paint: Paint) -> Result<()> {
        self.push(DrawOp::Fill(r, paint))
    }

    fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
        self.push(DrawOp::Text(loc, txt.to_string()))
    }

    fn title(&mut self, txt: &str) -> Result<()> {
        self.push(DrawOp::Title(txt.to_string()))
    }

    fn refresh(&mut self, r: Refresh) -> Result<()> {
        self.push(DrawOp::Refresh(r))
    }

    fn flush(&mut self) -> Result<()> {
        self.push(DrawOp::Flush)
    }
}

/// One call made against a [`FakeViewer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `run_command`.
    Command {
        /// Command text.
        text: String,
        /// Image argument.
        image: String,
        /// Was this a tab probe?
        tab_probe: bool,
    },
    /// `jump`.
    Jump(String),
    /// `load_image`.
    Load,
    /// `normal_key`.
    NormalKey(Key),
    /// `mode_changed`.
    Mode(Mode),
}

/// A scripted viewer over a list of image names.
#[derive(Debug, Clone)]
pub struct FakeViewer {
    /// Image names.
    pub images: Vec<String>,
    /// Index of the current image.
    pub current: usize,
    /// Results handed out by `run_command`, in order. An empty queue produces
    /// empty output.
    pub outputs: VecDeque<Result<CommandOutput>>,
    /// Does `load_image` report a full redraw?
    pub load_redraws: bool,
    /// Normal-mode bindings. Unbound keys are ignored.
    pub bindings: HashMap<Key, NormalKey>,
    /// Every call received.
    pub calls: Vec<Call>,
}

impl Default for FakeViewer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FakeViewer {
    /// A viewer over `n` images named `1.jpg`, `2.jpg` and so on, with space
    /// bound to "next image".
    pub fn new(n: usize) -> Self {
        Self {
            images: (1..=n).map(|i| format!("{i}.jpg")).collect(),
            current: 0,
            outputs: VecDeque::new(),
            load_redraws: false,
            bindings: HashMap::from([(Key::from(' '), NormalKey::Handled)]),
            calls: vec![],
        }
    }

    /// Queue a command result made of `lines`.
    pub fn respond<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs.push_back(Ok(CommandOutput::from_lines(lines)));
    }

    /// Queue a command failure.
    pub fn fail_command(&mut self, msg: &str) {
        self.outputs.push_back(Err(Error::Command(msg.into())));
    }

    /// Commands run so far, as `(text, tab_probe)`.
    pub fn commands(&self) -> Vec<(String, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Command {
                    text, tab_probe, ..
                } => Some((text.clone(), *tab_probe)),
                _ => None,
            })
            .collect()
    }

    /// Mode transitions reported so far.
    pub fn modes(&self) -> Vec<Mode> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Mode(m) => Some(*m),
                _ => None,
            })
            .collect()
    }
}

impl Viewer for FakeViewer {
    fn current_image(&self) -> String {
        self.images.get(self.current).cloned().unwrap_or_default()
    }

    fn run_command(&mut self, text: &str, image: &str, tab_probe: bool) -> Result<CommandOutput> {
        self.calls.push(Call::Command {
            text: text.into(),
            image: image.into(),
            tab_probe,
        });
        self.outputs.pop_front().unwrap_or_else(|| Ok(CommandOutput::default()))
    }

    fn jump(&mut self, expr: &str) -> Result<()> {
        self.calls.push(Call::Jump(expr.into()));
        let target = JumpTarget::parse(expr)?;
        self.current = target
            .resolve(self.current, self.images.len())
            .ok_or_else(|| Error::Jump("no images".into()))?;
        Ok(())
    }

    fn load_image(&mut self) -> Result<bool> {
        self.calls.push(Call::Load);
        Ok(self.load_redraws)
    }

    fn normal_key(&mut self, key: &Key) -> Result<NormalKey> {
        self.calls.push(Call::NormalKey(*key));
        let action = self
            .bindings
            .get(key)
            .copied()
            .unwrap_or(NormalKey::Ignored);
        if action == NormalKey::Handled && *key == ' ' {
            self.current = (self.current + 1) % self.images.len().max(1);
        }
        Ok(action)
    }

    fn mode_changed(&mut self, mode: Mode) {
        self.calls.push(Call::Mode(mode));
    }
}

/// A [`RecordingSurface`] and a [`FakeViewer`] acting as one host.
#[derive(Debug, Clone)]
pub struct TestHost {
    /// The drawing surface.
    pub surface: RecordingSurface,
    /// The viewer.
    pub viewer: FakeViewer,
}

impl TestHost {
    /// A 400x300 surface over ten images.
    pub fn new() -> Self {
        Self {
            surface: RecordingSurface::new(Expanse::new(400, 300)),
            viewer: FakeViewer::default(),
        }
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TestHost {
    fn container(&self) -> Expanse {
        self.surface.container()
    }

    fn image_rect(&self) -> Rect {
        self.surface.image_rect()
    }

    fn metrics(&self) -> FontMetrics {
        self.surface.metrics()
    }

    fn text_width(&self, txt: &str) -> u32 {
        self.surface.text_width(txt)
    }

    fn fill(&mut self, r: Rect, paint: Paint) -> Result<()> {
        self.surface.fill(r, paint)
    }

    fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
        self.surface.text(loc, txt)
    }

    fn title(&mut self, txt: &str) -> Result<()> {
        self.surface.title(txt)
    }

    fn refresh(&mut self, r: Refresh) -> Result<()> {
        self.surface.refresh(r)
    }

    fn flush(&mut self) -> Result<()> {
        self.surface.flush()
    }
}

impl Viewer for TestHost {
    fn current_image(&self) -> String {
        self.viewer.current_image()
    }

    fn run_command(&mut self, text: &str, image: &str, tab_probe: bool) -> Result<CommandOutput> {
        self.viewer.run_command(text, image, tab_probe)
    }

    fn jump(&mut self, expr: &str) -> Result<()> {
        self.viewer.jump(expr)
    }

    fn load_image(&mut self) -> Result<bool> {
        let full = self.viewer.load_image()?;
        if full {
            self.surface.refresh(Refresh::Full)?;
        }
        Ok(full)
    }

    fn normal_key(&mut self, key: &Key) -> Result<NormalKey> {
        self.viewer.normal_key(key)
    }

    fn mode_changed(&mut self, mode: Mode) {
        self.viewer.mode_changed(mode);
    }
}
