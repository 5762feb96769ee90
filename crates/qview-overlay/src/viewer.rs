//! The viewer the overlay is embedded in.
use crate::{command::CommandOutput, error::Result, key::Key, mode::Mode, surface::Surface};

/// Help lines describing the overlay's own keys.
pub const DEFAULT_HELP: &[&str] = &[
    "j<n><return>         jump to image number n",
    "jt<n><return>        jump to image number n",
    "jf<n><return>        jump forward n images",
    "jb<n><return>        jump backward n images",
    "^<text><return>      run the external command with ^<text>",
    "<tab>                start a command with tab completion",
    "0-9                  run the external command with the key",
    "?/F1                 show keys",
    "ctrl-q               exit",
];

/// What the viewer did with a key the overlay does not handle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalKey {
    /// A bound action ran and may have drawn over the screen.
    Handled,
    /// The key has no binding.
    Ignored,
    /// The viewer wants to exit.
    Quit,
}

/// The collaborators the overlay drives: command execution, jumping and
/// image loading.
pub trait Viewer {
    /// A name for the current image, passed to the external command.
    fn current_image(&self) -> String;

    /// Run the external command for `text` on `image`. When `tab_probe` is set
    /// the command is asked for a completion instead.
    fn run_command(&mut self, text: &str, image: &str, tab_probe: bool) -> Result<CommandOutput>;

    /// Resolve a jump expression and make the selected image current. Must
    /// not panic on malformed input.
    fn jump(&mut self, expr: &str) -> Result<()>;

    /// Reload the current image and redraw the base surface. Returns true if
    /// the whole surface was redrawn.
    fn load_image(&mut self) -> Result<bool>;

    /// Handle a normal-mode key with the viewer's own bindings.
    fn normal_key(&mut self, key: &Key) -> Result<NormalKey>;

    /// Lines shown for `?` and F1.
    fn help(&self) -> Vec<String> {
        DEFAULT_HELP.iter().map(|s| s.to_string()).collect()
    }

    /// Called after every mode transition.
    fn mode_changed(&mut self, _mode: Mode) {}
}

/// A host provides both the drawing surface and the viewer.
pub trait Host: Surface + Viewer {}

impl<T: Surface + Viewer + ?Sized> Host for T {}
