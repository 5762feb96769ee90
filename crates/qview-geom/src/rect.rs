use super::{Point, Span};

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.tl.x) + i64::from(self.w)
    }

    /// The exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.tl.y) + i64::from(self.h)
    }

    /// The horizontal extent of this rectangle.
    pub fn hspan(&self) -> Span {
        Span::new(self.tl.x, self.w)
    }

    /// The vertical extent of this rectangle.
    pub fn vspan(&self) -> Span {
        Span::new(self.tl.y, self.h)
    }

    /// Build a rectangle from a horizontal and a vertical extent.
    pub fn from_spans(h: Span, v: Span) -> Self {
        Self::new(h.off, v.off, h.len, v.len)
    }

    /// Does this rectangle completely enclose the other? Edges may coincide.
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.hspan().contains(&other.hspan()) && self.vspan().contains(&other.vspan())
    }

    /// Do the two rectangles share any pixel?
    pub fn intersects(&self, other: &Self) -> bool {
        self.hspan().intersects(&other.hspan()) && self.vspan().intersects(&other.vspan())
    }

    /// The overlapping area of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.tl.x.max(other.tl.x);
        let top = self.tl.y.max(other.tl.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Self::new(
            left,
            top,
            (right - i64::from(left)) as u32,
            (bottom - i64::from(top)) as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn contains() {
        let r = Rect::new(10, 10, 10, 10);
        assert!(r.contains_rect(&Rect::new(10, 10, 10, 10)));
        assert!(r.contains_rect(&Rect::new(11, 11, 1, 1)));
        assert!(!r.contains_rect(&Rect::new(11, 11, 10, 1)));
        assert!(!r.contains_rect(&Rect::new(9, 11, 2, 2)));
    }

    #[test]
    fn negative_origin() {
        let r = Rect::new(-4, -4, 10, 10);
        assert_eq!(r.right(), 6);
        assert_eq!(
            r.intersect(&Rect::new(0, 0, 100, 100)),
            Some(Rect::new(0, 0, 6, 6))
        );
    }

    #[test]
    fn spans() {
        let r = Rect::new(-2, 3, 7, 5);
        assert_eq!(r.hspan(), Span::new(-2, 7));
        assert_eq!(r.vspan(), Span::new(3, 5));
        assert_eq!(Rect::from_spans(r.hspan(), r.vspan()), r);
        assert!(Rect::new(1, 1, 0, 4).is_zero());
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&Rect::new(10, 0, 5, 5)), None);
        assert_eq!(
            a.intersect(&Rect::new(5, 5, 10, 10)),
            Some(Rect::new(5, 5, 5, 5))
        );
        assert_eq!(a.intersect(&Rect::new(2, 2, 0, 4)), None);
    }

    proptest! {
        #[test]
        fn intersection_is_contained(
            ax in -50i32..50, ay in -50i32..50, aw in 0u32..60, ah in 0u32..60,
            bx in -50i32..50, by in -50i32..50, bw in 0u32..60, bh in 0u32..60,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            if let Some(i) = a.intersect(&b) {
                prop_assert!(!i.is_zero());
                prop_assert!(a.contains_rect(&i));
                prop_assert!(b.contains_rect(&i));
            }
            prop_assert_eq!(a.intersect(&b), b.intersect(&a));
        }
    }
}
