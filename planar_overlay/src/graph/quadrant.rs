use crate::core::{math::Coord, traits::Real};

/// Quadrant of a direction vector, numbered counter clockwise from the positive x axis.
///
/// Vectors lying on an axis are assigned using the tests `dx >= 0` and `dy >= 0`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    NE = 0,
    NW = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [Quadrant::NE, Quadrant::NW, Quadrant::SW, Quadrant::SE];

    /// Quadrant of the vector `(dx, dy)`.
    ///
    /// # Panics
    ///
    /// Panics if the vector is zero, the direction of a zero vector is undefined.
    pub fn of<T>(dx: T, dy: T) -> Quadrant
    where
        T: Real,
    {
        if dx == T::zero() && dy == T::zero() {
            panic!(
                "cannot compute the quadrant for point ({:?}, {:?})",
                dx, dy
            );
        }

        if dx >= T::zero() {
            if dy >= T::zero() {
                Quadrant::NE
            } else {
                Quadrant::SE
            }
        } else if dy >= T::zero() {
            Quadrant::NW
        } else {
            Quadrant::SW
        }
    }

    /// Quadrant of the direction `p0 -> p1`.
    pub fn of_segment<T>(p0: Coord<T>, p1: Coord<T>) -> Quadrant
    where
        T: Real,
    {
        if p1.equals_2d(&p0) {
            panic!("cannot compute the quadrant for two identical points {:?}", p0);
        }
        Self::of(p1.x - p0.x, p1.y - p0.y)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(index: usize) -> Quadrant {
        Self::ALL[index % 4]
    }

    /// Quadrants are diagonally opposite.
    pub fn is_opposite(self, other: Quadrant) -> bool {
        if self == other {
            return false;
        }
        (self.index() + 4 - other.index()) % 4 == 2
    }

    /// Half plane shared by two adjacent quadrants, `None` if the quadrants are opposite.
    ///
    /// A half plane is named by the first quadrant it contains going counter clockwise, e.g.
    /// the northern half plane is [Quadrant::NE] and the eastern half plane is [Quadrant::SE].
    pub fn common_half_plane(self, other: Quadrant) -> Option<Quadrant> {
        if self == other {
            return Some(self);
        }
        if self.is_opposite(other) {
            return None;
        }

        let min = self.min(other);
        let max = self.max(other);
        if min == Quadrant::NE && max == Quadrant::SE {
            return Some(Quadrant::SE);
        }
        Some(min)
    }

    /// Quadrant lies in the half plane named by `half_plane`.
    pub fn is_in_half_plane(self, half_plane: Quadrant) -> bool {
        if half_plane == Quadrant::SE {
            return self == Quadrant::SE || self == Quadrant::SW;
        }
        self == half_plane || self == Self::from_index(half_plane.index() + 1)
    }

    #[inline]
    pub fn is_northern(self) -> bool {
        self == Quadrant::NE || self == Quadrant::NW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_of_vectors() {
        assert_eq!(Quadrant::of(1.0, 1.0), Quadrant::NE);
        assert_eq!(Quadrant::of(1.0, 0.0), Quadrant::NE);
        assert_eq!(Quadrant::of(0.0, 1.0), Quadrant::NE);
        assert_eq!(Quadrant::of(-1.0, 0.0), Quadrant::NW);
        assert_eq!(Quadrant::of(-1.0, -1.0), Quadrant::SW);
        assert_eq!(Quadrant::of(0.0, -1.0), Quadrant::SE);
    }

    #[test]
    #[should_panic]
    fn zero_vector_panics() {
        Quadrant::of(0.0, 0.0);
    }

    #[test]
    fn half_planes() {
        assert!(Quadrant::NE.is_opposite(Quadrant::SW));
        assert!(!Quadrant::NE.is_opposite(Quadrant::NW));
        assert_eq!(Quadrant::NE.common_half_plane(Quadrant::SE), Some(Quadrant::SE));
        assert_eq!(Quadrant::NW.common_half_plane(Quadrant::NE), Some(Quadrant::NE));
        assert_eq!(Quadrant::SW.common_half_plane(Quadrant::NE), None);
        assert!(Quadrant::SW.is_in_half_plane(Quadrant::SE));
        assert!(Quadrant::NW.is_in_half_plane(Quadrant::NE));
        assert!(!Quadrant::SE.is_in_half_plane(Quadrant::NW));
        assert!(Quadrant::NW.is_northern());
        assert!(!Quadrant::SE.is_northern());
    }
}
