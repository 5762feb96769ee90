/// A point in signed pixel coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the origin point.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Shift the point by an offset, saturating at the coordinate limits.
    pub fn offset(&self, x: i32, y: i32) -> Self {
        Self {
            x: self.x.saturating_add(x),
            y: self.y.saturating_add(y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset() {
        assert_eq!(Point::zero().offset(1, 1), Point::new(1, 1));
        assert_eq!(Point::new(3, 4).offset(-3, 0), Point::new(0, 4));
    }

    #[test]
    fn offset_saturates() {
        let p = Point::new(i32::MAX - 1, 0);
        assert_eq!(p.offset(5, -3), Point::new(i32::MAX, -3));
    }
}
