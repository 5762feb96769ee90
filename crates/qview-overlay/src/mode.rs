use std::fmt;

/// The modes of the command overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// No edit session. Keys go to the viewer's own bindings.
    #[default]
    Normal,
    /// Typing an image index to jump to.
    JumpEdit,
    /// Composing an external command.
    ExtEdit,
    /// Command output or help is on screen, waiting for any key.
    Confirm,
}

impl Mode {
    /// Is a line being edited in this mode?
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::JumpEdit | Self::ExtEdit)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::JumpEdit => "jump",
            Self::ExtEdit => "command",
            Self::Confirm => "confirm",
        })
    }
}
