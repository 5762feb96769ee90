/// A directionless one-dimensional extent: a horizontal or vertical slice
/// through a rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Span {
    /// Start offset.
    pub off: i32,
    /// Length.
    pub len: u32,
}

impl Span {
    /// Construct a span.
    pub fn new(off: i32, len: u32) -> Self {
        Self { off, len }
    }

    /// The far limit of the span (exclusive).
    pub fn far(&self) -> i64 {
        i64::from(self.off) + i64::from(self.len)
    }

    /// Does this span completely enclose the other? Empty spans are enclosed
    /// by any span that contains their offset.
    pub fn contains(&self, other: &Self) -> bool {
        other.off >= self.off && other.far() <= self.far()
    }

    /// Does this span share at least one position with the other?
    pub fn intersects(&self, other: &Self) -> bool {
        self.len > 0
            && other.len > 0
            && i64::from(self.off) < other.far()
            && i64::from(other.off) < self.far()
    }

    /// The parts of `self` not covered by `inner`, as (head, tail). Either
    /// side may be empty. Returns `None` if `inner` is not contained in `self`.
    pub fn carve(&self, inner: &Self) -> Option<(Self, Self)> {
        if !self.contains(inner) {
            return None;
        }
        let head = Self::new(self.off, (inner.off - self.off) as u32);
        let tail = Self::new(inner.far() as i32, (self.far() - inner.far()) as u32);
        Some((head, tail))
    }
}
