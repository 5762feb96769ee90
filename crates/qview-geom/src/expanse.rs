use super::{Point, Rect};

/// An `Expanse` has a width and height but no location. Containers (the
/// screen or a window) are described by an expanse whose origin is (0, 0).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Return a `Rect` with the same dimensions, located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_at_origin() {
        let e = Expanse::new(640, 480);
        assert_eq!(e.rect(), Rect::new(0, 0, 640, 480));
        assert_eq!(Expanse::default().rect(), Rect::default());
    }
}
