//! Abstract keyboard input consumed by the overlay.
//!
//! Mapping raw window-system or terminal events onto [`Key`] is the host's
//! job. The overlay only needs the logical key, the modifier state, whether
//! the key is itself a modifier, and the decoded character, if any.
use std::ops::Add;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key {
            mods: self,
            key,
            text: None,
        }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, c: char) -> Self::Output {
        let text = (!self.ctrl && !self.alt).then_some(c);
        Key {
            mods: self,
            key: c.into(),
            text,
        }
    }
}

impl Add<Self> for Mods {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
        }
    }
}

/// No modifiers pressed.
#[allow(non_upper_case_globals)]
pub const Empty: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: false,
};

/// Shift-only modifier state.
#[allow(non_upper_case_globals)]
pub const Shift: Mods = Mods {
    shift: true,
    ctrl: false,
    alt: false,
};

/// Control-only modifier state.
#[allow(non_upper_case_globals)]
pub const Ctrl: Mods = Mods {
    shift: false,
    ctrl: true,
    alt: false,
};

/// Alt-only modifier state.
#[allow(non_upper_case_globals)]
pub const Alt: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: true,
};

/// Physical modifier key codes.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum ModifierKeyCode {
    /// Either Shift key.
    Shift,
    /// Either Control key.
    Control,
    /// Either Alt key.
    Alt,
    /// Either Super key.
    Super,
    /// Either Meta key.
    Meta,
    /// Caps lock.
    CapsLock,
    /// Iso Level3 Shift key.
    IsoLevel3Shift,
}

/// Logical key codes.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/return key, including keypad enter.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
    /// F key.
    ///
    /// `KeyCode::F(1)` represents F1 key, etc.
    F(u8),
    /// A character.
    ///
    /// `KeyCode::Char('c')` represents `c` character, etc.
    Char(char),
    /// A modifier pressed on its own.
    Modifier(ModifierKeyCode),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// Keys that should be preserved verbatim when normalizing shift.
const LEAVE_INTACT: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];

/// A keystroke along with modifiers and the decoded character.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifier state.
    pub mods: Mods,
    /// Key code.
    pub key: KeyCode,
    /// The character this keystroke produces, as decoded by the host's input
    /// method. `None` for function keys, modifiers and control chords.
    pub text: Option<char>,
}

impl Key {
    /// Construct a key with an explicit decoded character.
    pub fn new(mods: Mods, key: KeyCode, text: Option<char>) -> Self {
        Self { mods, key, text }
    }

    /// Is this a modifier key pressed on its own?
    pub fn is_modifier(&self) -> bool {
        matches!(self.key, KeyCode::Modifier(_))
    }

    /// Is this the given character with control held?
    pub fn is_ctrl(&self, c: char) -> bool {
        self.mods.ctrl && !self.mods.alt && self.key == KeyCode::Char(c)
    }

    /// Is this the given character with alt held?
    pub fn is_alt(&self, c: char) -> bool {
        self.mods.alt && !self.mods.ctrl && self.key == KeyCode::Char(c)
    }

    /// The decoded character if it is printable: not a control character and
    /// not produced by a control chord.
    pub fn printable(&self) -> Option<char> {
        if self.mods.ctrl {
            return None;
        }
        self.text.filter(|c| !c.is_control())
    }

    /// When we receive an event it includes the shift modifier and also the
    /// shifted character - e.g. "shift + A". Bindings are written as plain
    /// "A", so matching uses a lossy normalisation:
    ///
    /// | input             | normalization    |
    /// |-------------------|------------------|
    /// | shift + A         | A                |
    /// | shift + a         | A                |
    /// | shift + )         | )                |
    /// | shift + enter     | shift + enter    |
    /// | shift + ctrl + A  | ctrl + A         |
    ///
    /// The decoded character is left untouched.
    pub fn normalize(&self) -> Self {
        if !self.mods.shift {
            return *self;
        }
        let KeyCode::Char(c) = self.key else {
            return *self;
        };
        if LEAVE_INTACT.contains(&self.key) {
            return *self;
        }
        Self {
            mods: Mods {
                shift: false,
                ..self.mods
            },
            key: KeyCode::Char(c.to_ascii_uppercase()),
            text: self.text,
        }
    }
}

impl PartialEq<KeyCode> for Key {
    fn eq(&self, c: &KeyCode) -> bool {
        // If there are modifiers, we never match.
        if self.mods != Empty {
            return false;
        }
        *c == self.key
    }
}

impl PartialEq<char> for Key {
    fn eq(&self, c: &char) -> bool {
        *self == KeyCode::Char(*c)
    }
}

impl PartialEq<Key> for char {
    fn eq(&self, k: &Key) -> bool {
        *k == KeyCode::Char(*self)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Empty + c
    }
}

impl From<KeyCode> for Key {
    fn from(c: KeyCode) -> Self {
        let text = match c {
            KeyCode::Char(c) => Some(c),
            _ => None,
        };
        Self {
            mods: Empty,
            key: c,
            text,
        }
    }
}
