use crate::{geom::Expanse, key::Key};

/// An input or window event delivered to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(Key),
    /// Part of the window was exposed and repainted by the host.
    Expose,
    /// The container changed size.
    Resize(Expanse),
    /// The pointer left the window.
    PointerLeave,
}

impl Event {
    /// Does this event mean the host touched the screen under the overlay?
    pub(crate) fn touches_screen(&self) -> bool {
        matches!(self, Self::Expose | Self::Resize(_))
    }
}

impl From<Key> for Event {
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}
