use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed jump expression.
///
/// `t<n>` or a bare `<n>` jumps to image `n`, counting from 1. `f<n>` moves
/// forward `n` images and `b<n>` moves back `n` images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpTarget {
    /// An image number, counting from 1.
    Absolute(usize),
    /// Images to move forward.
    Forward(usize),
    /// Images to move back.
    Backward(usize),
}

impl JumpTarget {
    /// Parse a jump expression. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (ctor, digits): (fn(usize) -> Self, &str) = match s.as_bytes().first() {
            Some(b't' | b'T') => (Self::Absolute, &s[1..]),
            Some(b'f' | b'F') => (Self::Forward, &s[1..]),
            Some(b'b' | b'B') => (Self::Backward, &s[1..]),
            _ => (Self::Absolute, s),
        };
        let digits = digits.trim_start();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Parse(format!("bad jump expression: {s:?}")));
        }
        let n = digits
            .parse()
            .map_err(|e| Error::Parse(format!("bad jump expression {s:?}: {e}")))?;
        Ok(ctor(n))
    }

    /// The zero-based index this target selects, given the current index and
    /// the number of images. Out of range targets are clamped. `None` when
    /// there are no images.
    pub fn resolve(&self, current: usize, count: usize) -> Option<usize> {
        let last = count.checked_sub(1)?;
        let idx = match *self {
            Self::Absolute(n) => n.saturating_sub(1),
            Self::Forward(n) => current.saturating_add(n),
            Self::Backward(n) => current.min(last).saturating_sub(n),
        };
        Some(idx.min(last))
    }
}

impl FromStr for JumpTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(JumpTarget::parse("5"), Ok(JumpTarget::Absolute(5)));
        assert_eq!(JumpTarget::parse(" t12 "), Ok(JumpTarget::Absolute(12)));
        assert_eq!(JumpTarget::parse("f3"), Ok(JumpTarget::Forward(3)));
        assert_eq!(JumpTarget::parse("b 2"), Ok(JumpTarget::Backward(2)));
        for bad in ["", "t", "x5", "5x", "-1", "f-2", "t1 2"] {
            assert!(JumpTarget::parse(bad).is_err(), "{bad:?}");
        }
        assert!("99999999999999999999999999".parse::<JumpTarget>().is_err());
    }

    #[test]
    fn resolve() {
        assert_eq!(JumpTarget::Absolute(5).resolve(0, 10), Some(4));
        assert_eq!(JumpTarget::Absolute(0).resolve(3, 10), Some(0));
        assert_eq!(JumpTarget::Absolute(50).resolve(0, 10), Some(9));
        assert_eq!(JumpTarget::Forward(3).resolve(8, 10), Some(9));
        assert_eq!(JumpTarget::Forward(3).resolve(2, 10), Some(5));
        assert_eq!(JumpTarget::Backward(3).resolve(2, 10), Some(0));
        assert_eq!(JumpTarget::Backward(1).resolve(2, 10), Some(1));
        assert_eq!(JumpTarget::Absolute(1).resolve(0, 0), None);
    }
}
