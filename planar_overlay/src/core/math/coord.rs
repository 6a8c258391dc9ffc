use crate::core::traits::Real;
use std::{cmp::Ordering, ops};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A planar coordinate.
///
/// Coordinates are the vertex identity of the topology graph: two coordinates name the same node
/// if and only if [Coord::equals_2d] holds. They are ordered lexicographically (x then y) by
/// [Coord::compare].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Coord<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Coord<T>
where
    T: Real,
{
    /// Create a new coordinate.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Coord { x, y }
    }

    /// Create a zero coordinate (x = 0, y = 0).
    #[inline]
    pub fn zero() -> Self {
        Coord::new(T::zero(), T::zero())
    }

    /// Exact equality of the x and y ordinates.
    #[inline]
    pub fn equals_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Lexicographic comparison, x first then y.
    ///
    /// NaN ordinates compare as equal so that the ordering stays total for map keys.
    #[inline]
    pub fn compare(&self, other: &Self) -> Ordering {
        match self.x.partial_cmp(&other.x) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }

        self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
    }

    /// Both ordinates are finite numbers.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x.as_f64().is_finite() && self.y.as_f64().is_finite()
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Perpendicular dot product (`self.x * other.y - self.y * other.x`).
    #[inline]
    pub fn perp_dot(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: Self) -> T {
        (*self - other).length()
    }

    /// Length of the coordinate treated as a vector.
    #[inline]
    pub fn length(&self) -> T {
        self.dot(*self).sqrt()
    }

    /// Fuzzy equal comparison with another coordinate using `fuzzy_epsilon`.
    #[inline]
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon) && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
    }

    /// Fuzzy equal comparison with another coordinate using `T::fuzzy_epsilon()`.
    #[inline]
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }
}

/// Shorthand for [Coord::new].
#[inline(always)]
pub fn coord<T>(x: T, y: T) -> Coord<T>
where
    T: Real,
{
    Coord::new(x, y)
}

/// Total ordering wrapper used to key coordinates in ordered maps and sets.
#[derive(Debug, Copy, Clone)]
pub struct CoordKey<T>(pub Coord<T>);

impl<T: Real> PartialEq for CoordKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Real> Eq for CoordKey<T> {}

impl<T: Real> PartialOrd for CoordKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Real> Ord for CoordKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare(&other.0)
    }
}

macro_rules! ImplBinaryOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl<T: Real> ops::$op_trait<Coord<T>> for Coord<T> {
            type Output = Coord<T>;
            fn $op_func(self, rhs: Coord<T>) -> Self::Output {
                Coord::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<T: Real> ops::$op_trait<&Coord<T>> for Coord<T> {
            type Output = Coord<T>;
            fn $op_func(self, rhs: &Coord<T>) -> Self::Output {
                Coord::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<'a, 'b, T: Real> ops::$op_trait<&'b Coord<T>> for &'a Coord<T> {
            type Output = Coord<T>;
            fn $op_func(self, rhs: &'b Coord<T>) -> Self::Output {
                Coord::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

ImplBinaryOp!(Add, add, +);
ImplBinaryOp!(Sub, sub, -);

impl<T: Real> ops::Neg for Coord<T> {
    type Output = Coord<T>;
    fn neg(self) -> Self::Output {
        Coord::new(-self.x, -self.y)
    }
}
