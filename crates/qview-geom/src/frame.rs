use super::Rect;

/// A frame extracted from a rectangle: four edges of a given thickness.
/// Corners belong to the top and bottom edges.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Frame {
    /// The top edge, including corners.
    pub top: Rect,
    /// The bottom edge, including corners.
    pub bottom: Rect,
    /// The left edge, excluding corners.
    pub left: Rect,
    /// The right edge, excluding corners.
    pub right: Rect,
}

impl Frame {
    /// Construct a new frame. If the rect is too small to fit the border on
    /// both sides, the whole rect becomes the top edge.
    pub fn new(rect: Rect, border: u32) -> Self {
        if rect.w <= border * 2 || rect.h <= border * 2 {
            return Self {
                top: rect,
                ..Self::default()
            };
        }
        let (x, y) = (rect.tl.x, rect.tl.y);
        let b = border as i32;
        Self {
            top: Rect::new(x, y, rect.w, border),
            bottom: Rect::new(x, y + rect.h as i32 - b, rect.w, border),
            left: Rect::new(x, y + b, border, rect.h - 2 * border),
            right: Rect::new(x + rect.w as i32 - b, y + b, border, rect.h - 2 * border),
        }
    }

    /// The edges of the frame, skipping empty ones.
    pub fn edges(&self) -> impl Iterator<Item = Rect> + '_ {
        [self.top, self.bottom, self.left, self.right]
            .into_iter()
            .filter(|r| !r.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tframe() {
        let r = Rect::new(10, 10, 10, 10);
        let f = Frame::new(r, 1);
        assert_eq!(f.top, Rect::new(10, 10, 10, 1));
        assert_eq!(f.bottom, Rect::new(10, 19, 10, 1));
        assert_eq!(f.left, Rect::new(10, 11, 1, 8));
        assert_eq!(f.right, Rect::new(19, 11, 1, 8));
        assert_eq!(f.edges().count(), 4);
    }

    #[test]
    fn degenerate() {
        let r = Rect::new(0, 0, 2, 8);
        let f = Frame::new(r, 1);
        assert_eq!(f.edges().collect::<Vec<_>>(), vec![r]);
    }
}
