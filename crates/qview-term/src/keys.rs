//! Translation of crossterm input into overlay events.
use crossterm::event as cevent;
use qview_overlay::{
    Event,
    geom::Expanse,
    key::{self, Key},
};

/// Translate crossterm modifier flags.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a modifier key pressed on its own.
fn translate_modifier(m: cevent::ModifierKeyCode) -> key::ModifierKeyCode {
    use cevent::ModifierKeyCode as M;
    match m {
        M::LeftShift | M::RightShift => key::ModifierKeyCode::Shift,
        M::LeftControl | M::RightControl => key::ModifierKeyCode::Control,
        M::LeftAlt | M::RightAlt => key::ModifierKeyCode::Alt,
        M::LeftSuper | M::RightSuper | M::LeftHyper | M::RightHyper => {
            key::ModifierKeyCode::Super
        }
        M::LeftMeta | M::RightMeta => key::ModifierKeyCode::Meta,
        M::IsoLevel3Shift | M::IsoLevel5Shift => key::ModifierKeyCode::IsoLevel3Shift,
    }
}

/// Translate a crossterm key event. Keys the overlay has no use for, and key
/// releases, yield `None`.
fn translate_key(k: cevent::KeyEvent) -> Option<Key> {
    if k.kind == cevent::KeyEventKind::Release {
        return None;
    }
    let mut mods = translate_key_modifiers(k.modifiers);
    let code = match k.code {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => {
            mods.shift = true;
            key::KeyCode::Tab
        }
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::F(x) => key::KeyCode::F(x),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        cevent::KeyCode::Modifier(m) => key::KeyCode::Modifier(translate_modifier(m)),
        _ => return None,
    };
    let text = match code {
        key::KeyCode::Char(c) if !mods.ctrl && !mods.alt => Some(c),
        _ => None,
    };
    Some(Key::new(mods, code, text))
}

/// Translate a crossterm event into an overlay event.
pub fn translate_event(e: cevent::Event) -> Option<Event> {
    match e {
        cevent::Event::Key(k) => translate_key(k).map(Event::Key),
        cevent::Event::Resize(w, h) => Some(Event::Resize(Expanse::new(
            u32::from(w),
            u32::from(h),
        ))),
        cevent::Event::FocusLost => Some(Event::PointerLeave),
        cevent::Event::FocusGained => Some(Event::Expose),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode as CK, KeyEvent, KeyEventKind, KeyModifiers as KM};
    use pretty_assertions::assert_eq;
    use qview_overlay::key::{Ctrl, KeyCode, Shift};

    use super::*;

    fn ev(code: CK, mods: KM) -> Option<Event> {
        translate_event(cevent::Event::Key(KeyEvent::new(code, mods)))
    }

    #[test]
    fn chars() {
        assert_eq!(ev(CK::Char('a'), KM::NONE), Some(Event::Key('a'.into())));
        assert_eq!(ev(CK::Char('w'), KM::CONTROL), Some(Event::Key(Ctrl + 'w')));
        assert_eq!(
            ev(CK::Char('N'), KM::SHIFT),
            Some(Event::Key(Shift + 'N'))
        );
    }

    #[test]
    fn special() {
        assert_eq!(ev(CK::Enter, KM::NONE), Some(Event::Key(KeyCode::Enter.into())));
        assert_eq!(
            ev(CK::BackTab, KM::NONE),
            Some(Event::Key(Shift + KeyCode::Tab))
        );
        assert_eq!(ev(CK::CapsLock, KM::NONE), None);
        let mut release = KeyEvent::new(CK::Char('a'), KM::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_event(cevent::Event::Key(release)), None);
        assert_eq!(
            translate_event(cevent::Event::Resize(80, 24)),
            Some(Event::Resize(Expanse::new(80, 24)))
        );
    }
}
