use super::OverlayState;
use crate::geom::Rect;

/// How the base surface must be repainted before a new overlay box is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repaint {
    /// Nothing to repaint: there was no overlay, or the new box covers the
    /// old one and nothing else touched the screen.
    Skip,
    /// The box only got narrower. Erase the uncovered strips on either side.
    /// Either strip may be empty.
    StripErase {
        /// Strip left of the new box.
        left: Rect,
        /// Strip right of the new box.
        right: Rect,
    },
    /// The new box covers the old one. When clean, refreshing the old area is
    /// enough; otherwise the base image has to be redrawn.
    ContainedRefresh {
        /// Was the previous overlay clean?
        clean: bool,
    },
    /// The new box leaves part of the old one exposed.
    FullRedraw,
}

/// Decide how to repaint when replacing the overlay described by `prev` with
/// a box at `next`.
pub fn classify(prev: &OverlayState, next: Rect) -> Repaint {
    let covered = next.contains_rect(&prev.rect);
    if !prev.displayed || (prev.clean && covered) {
        return Repaint::Skip;
    }
    if prev.clean
        && prev.rect.vspan() == next.vspan()
        && let Some((head, tail)) = prev.rect.hspan().carve(&next.hspan())
    {
        let v = prev.rect.vspan();
        return Repaint::StripErase {
            left: Rect::from_spans(head, v),
            right: Rect::from_spans(tail, v),
        };
    }
    if covered {
        Repaint::ContainedRefresh { clean: prev.clean }
    } else {
        Repaint::FullRedraw
    }
}
