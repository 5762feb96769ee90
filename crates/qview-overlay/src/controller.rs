//! The modal state machine behind the command overlay.
//!
//! [`EditorState`] owns the mode, the edit buffer and the overlay renderer.
//! The host feeds it one [`Event`] at a time; each event is fully processed
//! (buffer edits, collaborator calls, repaint and flush) before the call
//! returns.
use tracing::{debug, trace, warn};

use crate::{
    buffer::EditBuffer,
    command::CommandOutput,
    config::Config,
    error::Result,
    event::Event,
    key::{Empty, Key, KeyCode},
    mode::Mode,
    overlay::OverlayRenderer,
    tagpos::find_tag_error_pos,
    viewer::{Host, NormalKey},
};

/// Title while typing a jump expression.
pub const TITLE_JUMP: &str = "(Jump to image)";
/// Title after a tab probe from normal mode.
pub const TITLE_TAB_START: &str = "(Tab-start command)";
/// Title while typing a command.
pub const TITLE_EDITING: &str = "(Editing command)";
/// Title while a tab completion runs.
pub const TITLE_TAB_COMPLETION: &str = "(Tab completion)";
/// Title after a tab completion.
pub const TITLE_EXPANDED: &str = "(Expanded command)";
/// Title for command output.
pub const TITLE_OUTPUT: &str = "(Command output)";
/// Title for help.
pub const TITLE_HELP: &str = "(Showing Help)";

/// Continuation message while editing a command.
pub const MSG_SEND: &str = "Press <Return> to send, <Esc> to abort";
/// Continuation message while editing a jump.
pub const MSG_JUMP: &str = "Press <Return> to jump, <Esc> to abort";
/// Continuation message for output and help.
pub const MSG_ANY_KEY: &str = "Push any key...";
/// Continuation message while a tab completion runs.
pub const MSG_TAB_RUNNING: &str = "<Tab> completion running...";

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep going.
    Continue,
    /// Exit the program.
    Quit,
}

/// The result of handling one key.
#[derive(Debug, Clone, Copy)]
struct Handled {
    /// What the host should do next.
    outcome: Outcome,
    /// Did the key touch the screen beyond overlay editing?
    dirty: bool,
}

impl Handled {
    /// The screen may have changed under the overlay.
    const DIRTY: Self = Self {
        outcome: Outcome::Continue,
        dirty: true,
    };
    /// Only the overlay changed, if anything.
    const CLEAN: Self = Self {
        outcome: Outcome::Continue,
        dirty: false,
    };
    /// Exit.
    const QUIT: Self = Self {
        outcome: Outcome::Quit,
        dirty: true,
    };
}

/// All state of the command overlay.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Settings.
    config: Config,
    /// Current mode.
    mode: Mode,
    /// The line being edited in `JumpEdit` and `ExtEdit`.
    buffer: EditBuffer,
    /// Command output lines shown under the edited line.
    extra: Vec<String>,
    /// Title of the last edit display.
    title: &'static str,
    /// The overlay box.
    renderer: OverlayRenderer,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl EditorState {
    /// Construct the overlay state in normal mode.
    pub fn new(config: Config) -> Self {
        Self {
            buffer: EditBuffer::new(config.buffer_capacity),
            renderer: OverlayRenderer::new(&config),
            config,
            mode: Mode::Normal,
            extra: vec![],
            title: TITLE_EDITING,
        }
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The edit buffer.
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// The text being edited.
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Command output lines shown under the edited line.
    pub fn extra_lines(&self) -> &[String] {
        &self.extra
    }

    /// The overlay renderer.
    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    /// Is the overlay on screen?
    pub fn is_displayed(&self) -> bool {
        self.renderer.is_displayed()
    }

    /// Process one event.
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, ev: &Event) -> Result<Outcome> {
        match ev {
            Event::Key(k) => {
                let handled = self.handle_key(host, k)?;
                if handled.dirty {
                    self.renderer.mark_dirty();
                }
                Ok(handled.outcome)
            }
            Event::Resize(_) => {
                self.renderer.mark_dirty();
                if self.mode.is_editing() && self.renderer.is_displayed() {
                    self.display_edit(host, self.title)?;
                }
                Ok(Outcome::Continue)
            }
            other => {
                if other.touches_screen() {
                    self.renderer.mark_dirty();
                }
                Ok(Outcome::Continue)
            }
        }
    }

    /// Dispatch a key on the current mode.
    fn handle_key<H: Host + ?Sized>(&mut self, host: &mut H, key: &Key) -> Result<Handled> {
        if key.is_ctrl('q') {
            debug!(mode = %self.mode, "quit requested");
            return Ok(Handled::QUIT);
        }
        match self.mode {
            Mode::Confirm => {
                if !key.is_modifier() {
                    self.to_normal(host)?;
                }
                Ok(Handled::DIRTY)
            }
            Mode::JumpEdit => self.jump_key(host, key),
            Mode::ExtEdit => self.ext_key(host, key),
            Mode::Normal => self.normal_key(host, key),
        }
    }

    /// A key in normal mode.
    fn normal_key<H: Host + ?Sized>(&mut self, host: &mut H, key: &Key) -> Result<Handled> {
        let k = key.normalize();
        match k.key {
            KeyCode::F(n @ 1..=10) if self.config.f_commands => {
                self.run_command_str(host, &format!(":f{n}"))?;
                return Ok(Handled::DIRTY);
            }
            KeyCode::F(1) => {
                let help = host.help();
                self.confirm(host, TITLE_HELP, &help)?;
                return Ok(Handled::DIRTY);
            }
            KeyCode::Enter if self.config.enter_command && k.mods == Empty => {
                self.run_command_str(host, ":enter")?;
                return Ok(Handled::DIRTY);
            }
            KeyCode::Tab => {
                self.tab_start(host)?;
                return Ok(Handled::CLEAN);
            }
            _ => {}
        }

        if k == 'j' {
            self.buffer.clear();
            self.extra.clear();
            self.set_mode(host, Mode::JumpEdit);
            Ok(Handled::DIRTY)
        } else if k == '^' {
            self.buffer.clear();
            self.extra.clear();
            self.buffer.insert_codepoint('^');
            self.set_mode(host, Mode::ExtEdit);
            self.display_edit(host, TITLE_EDITING)?;
            Ok(Handled::CLEAN)
        } else if k == '?' {
            let help = host.help();
            self.confirm(host, TITLE_HELP, &help)?;
            Ok(Handled::DIRTY)
        } else if let KeyCode::Char(c) = k.key
            && k.mods == Empty
            && self.config.is_command_key(c)
        {
            self.run_command_str(host, c.encode_utf8(&mut [0; 4]))?;
            Ok(Handled::DIRTY)
        } else {
            Ok(match host.normal_key(key)? {
                NormalKey::Handled => Handled::DIRTY,
                NormalKey::Ignored => Handled::CLEAN,
                NormalKey::Quit => Handled::QUIT,
            })
        }
    }

    /// A key while editing a jump expression.
    fn jump_key<H: Host + ?Sized>(&mut self, host: &mut H, key: &Key) -> Result<Handled> {
        if is_abort(key) {
            self.to_normal(host)?;
            return Ok(Handled::DIRTY);
        }
        match key.key {
            KeyCode::Tab => {
                self.tab_start(host)?;
                Ok(Handled::CLEAN)
            }
            KeyCode::Enter => {
                self.jump(host)?;
                Ok(Handled::DIRTY)
            }
            _ => {
                if self.apply_edit(key) {
                    self.display_edit(host, TITLE_JUMP)?;
                }
                Ok(Handled::CLEAN)
            }
        }
    }

    /// A key while editing a command.
    fn ext_key<H: Host + ?Sized>(&mut self, host: &mut H, key: &Key) -> Result<Handled> {
        if is_abort(key) {
            self.to_normal(host)?;
            return Ok(Handled::DIRTY);
        }
        match key.key {
            KeyCode::Tab if !self.buffer.at_end() => Ok(Handled::CLEAN),
            KeyCode::Tab => {
                self.run_edited(host, true)?;
                Ok(Handled::DIRTY)
            }
            KeyCode::Enter => {
                self.run_edited(host, false)?;
                Ok(Handled::DIRTY)
            }
            _ => {
                if self.apply_edit(key) {
                    self.display_edit(host, TITLE_EDITING)?;
                }
                Ok(Handled::CLEAN)
            }
        }
    }

    /// Apply an editing key to the buffer. Returns true if the buffer changed.
    fn apply_edit(&mut self, key: &Key) -> bool {
        let b = &mut self.buffer;
        let Key { mods, .. } = *key;
        let changed = match key.key {
            KeyCode::Backspace if mods.alt => b.delete_backward_word(),
            KeyCode::Backspace => b.delete_backward_char(),
            KeyCode::Delete => b.delete_forward_char(),
            KeyCode::Home => b.move_home(),
            KeyCode::End => b.move_end(),
            KeyCode::Left => b.move_backward_char(),
            KeyCode::Right => b.move_forward_char(),
            KeyCode::Char(c) if mods.ctrl && !mods.alt => match c.to_ascii_lowercase() {
                'h' => b.delete_backward_char(),
                'd' => b.delete_forward_char(),
                'w' => b.delete_backward_word(),
                'a' => b.move_home(),
                'e' => b.move_end(),
                'b' => b.move_backward_char(),
                'f' => b.move_forward_char(),
                'u' => b.clear(),
                _ => false,
            },
            _ if key.is_alt('d') || key.is_alt('D') => b.delete_forward_word(),
            _ => key.printable().is_some_and(|c| b.insert_codepoint(c)),
        };
        trace!(?key, text = b.as_str(), cursor = b.cursor(), changed, "edit");
        changed
    }

    /// Jump to the image named by the buffer, reload and return to normal
    /// mode.
    fn jump<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let expr = self.buffer.as_str().to_string();
        debug!(expr, "jump");
        let reloaded = match host.jump(&expr) {
            Ok(()) => host.load_image(),
            Err(e) => {
                warn!(expr, error = %e, "jump failed");
                Ok(false)
            }
        };
        if matches!(reloaded, Ok(true)) {
            // The whole surface was just redrawn, so the overlay is gone.
            self.renderer.forget();
        }
        self.to_normal(host)?;
        reloaded.map(|_| ())
    }

    /// Probe the command for a completion of the empty line and start editing
    /// with the result.
    fn tab_start<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        self.to_normal(host)?;
        let image = host.current_image();
        match host.run_command("", &image, true) {
            Ok(out) => self.expand(out),
            Err(e) => return self.command_failed(host, &e.to_string()),
        }
        self.set_mode(host, Mode::ExtEdit);
        self.display_edit(host, TITLE_TAB_START)
    }

    /// Run the edited command, as a tab completion or for real.
    fn run_edited<H: Host + ?Sized>(&mut self, host: &mut H, tab: bool) -> Result<()> {
        if tab {
            self.display_lines(host, TITLE_TAB_COMPLETION, MSG_TAB_RUNNING)?;
        } else {
            self.renderer.hide(host)?;
        }
        let text = self.buffer.as_str().to_string();
        let image = host.current_image();
        let mut out = match host.run_command(&text, &image, tab) {
            Ok(out) => out,
            Err(e) => return self.command_failed(host, &e.to_string()),
        };
        let mut tab = tab;
        if !tab && out.take_bell() {
            debug!(text, "command reported an error");
            tab = true;
        }
        if tab {
            self.expand(out);
            self.display_edit(host, TITLE_EXPANDED)
        } else if out.is_empty() {
            self.to_normal(host)
        } else {
            self.confirm(host, TITLE_OUTPUT, &out.lines)
        }
    }

    /// Run a command that is not being edited and show its output.
    fn run_command_str<H: Host + ?Sized>(&mut self, host: &mut H, text: &str) -> Result<()> {
        let image = host.current_image();
        match host.run_command(text, &image, false) {
            Ok(out) if out.is_empty() => self.to_normal(host),
            Ok(out) => self.confirm(host, TITLE_OUTPUT, &out.lines),
            Err(e) => self.command_failed(host, &e.to_string()),
        }
    }

    /// Replace the buffer with line 0 of a completion, keeping the rest of
    /// the output under it. Empty output keeps the buffer.
    fn expand(&mut self, out: CommandOutput) {
        let mut lines = out.lines.into_iter();
        let Some(first) = lines.next() else {
            self.extra.clear();
            return;
        };
        self.buffer.set_text(&first);
        self.extra = lines.collect();
        if self.config.tag_error_pos {
            let mut all = Vec::with_capacity(self.extra.len() + 1);
            all.push(self.buffer.as_str());
            all.extend(self.extra.iter().map(String::as_str));
            if let Some(pos) = find_tag_error_pos(&all) {
                debug!(pos, "tag error");
                self.buffer.set_cursor(pos);
            }
        }
    }

    /// Show a runner failure as command output.
    fn command_failed<H: Host + ?Sized>(&mut self, host: &mut H, err: &str) -> Result<()> {
        warn!(error = err, "command failed");
        self.confirm(host, TITLE_OUTPUT, &[format!("(command failed: {err})")])
    }

    /// Show `lines` and wait for any key.
    fn confirm<H: Host + ?Sized, L: AsRef<str>>(
        &mut self,
        host: &mut H,
        title: &str,
        lines: &[L],
    ) -> Result<()> {
        self.buffer.clear();
        self.extra.clear();
        self.set_mode(host, Mode::Confirm);
        self.renderer
            .display(host, title, lines, None, MSG_ANY_KEY)
            .map(|_| ())
    }

    /// Leave any edit session and hide the overlay.
    fn to_normal<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        self.buffer.clear();
        self.extra.clear();
        self.set_mode(host, Mode::Normal);
        self.renderer.hide(host)
    }

    /// Show the edited line, with the cursor, over any extra output lines.
    fn display_edit<H: Host + ?Sized>(&mut self, host: &mut H, title: &'static str) -> Result<()> {
        self.title = title;
        let msg = if self.mode == Mode::JumpEdit {
            MSG_JUMP
        } else {
            MSG_SEND
        };
        self.display_lines(host, title, msg)
    }

    /// Display the buffer and extra lines with the given title and message.
    fn display_lines<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        title: &str,
        msg: &str,
    ) -> Result<()> {
        let mut lines = Vec::with_capacity(self.extra.len() + 1);
        lines.push(self.buffer.as_str());
        lines.extend(self.extra.iter().map(String::as_str));
        self.renderer
            .display(host, title, &lines, Some(self.buffer.cursor()), msg)
            .map(|_| ())
    }

    /// Switch modes, notifying the viewer.
    fn set_mode<H: Host + ?Sized>(&mut self, host: &mut H, mode: Mode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "mode");
            self.mode = mode;
            host.mode_changed(mode);
        }
    }
}

/// Escape or Ctrl-C.
fn is_abort(key: &Key) -> bool {
    key.key == KeyCode::Esc || key.is_ctrl('c')
}
