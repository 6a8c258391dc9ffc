use super::Coord;
use crate::core::traits::Real;
use static_aabb2d_index::{
    IndexableNum, StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder, AABB,
};

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use planar_overlay::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Envelope operations used by the topology graph on top of [AABB].
///
/// An envelope built from no coordinates is "null": its min values are greater than its max
/// values and every query against it returns false.
pub trait EnvelopeExt<T>
where
    T: Real,
{
    /// Null envelope (contains nothing).
    fn null() -> Self;
    /// Envelope of a single segment.
    fn from_segment(p0: Coord<T>, p1: Coord<T>) -> Self;
    /// Envelope of a list of coordinates, null if the list is empty.
    fn from_coords(coords: &[Coord<T>]) -> Self;
    fn is_null(&self) -> bool;
    /// `coord` lies inside or on the border of the envelope.
    fn intersects_coord(&self, coord: Coord<T>) -> bool;
    /// Same as [EnvelopeExt::intersects_coord], kept for readability at call sites.
    fn contains_coord(&self, coord: Coord<T>) -> bool {
        self.intersects_coord(coord)
    }
    /// `other` lies entirely inside (or on the border of) this envelope.
    fn covers(&self, other: &Self) -> bool;
    fn intersects_envelope(&self, other: &Self) -> bool;
    fn expand_to_include(&mut self, coord: Coord<T>);
    fn expand_to_include_envelope(&mut self, other: &Self);
    fn width(&self) -> T;
    fn height(&self) -> T;
}

impl<T> EnvelopeExt<T> for AABB<T>
where
    T: Real,
{
    #[inline]
    fn null() -> Self {
        let (lo, hi) = (<T as Real>::min_value(), <T as Real>::max_value());
        AABB::new(hi, hi, lo, lo)
    }

    #[inline]
    fn from_segment(p0: Coord<T>, p1: Coord<T>) -> Self {
        let (min_x, max_x) = min_max(p0.x, p1.x);
        let (min_y, max_y) = min_max(p0.y, p1.y);
        AABB::new(min_x, min_y, max_x, max_y)
    }

    fn from_coords(coords: &[Coord<T>]) -> Self {
        let mut result = Self::null();
        for c in coords {
            result.expand_to_include(*c);
        }
        result
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.max_x < self.min_x
    }

    #[inline]
    fn intersects_coord(&self, coord: Coord<T>) -> bool {
        !self.is_null()
            && coord.x >= self.min_x
            && coord.x <= self.max_x
            && coord.y >= self.min_y
            && coord.y <= self.max_y
    }

    #[inline]
    fn covers(&self, other: &Self) -> bool {
        !self.is_null()
            && !other.is_null()
            && other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    #[inline]
    fn intersects_envelope(&self, other: &Self) -> bool {
        !self.is_null()
            && !other.is_null()
            && other.min_x <= self.max_x
            && other.max_x >= self.min_x
            && other.min_y <= self.max_y
            && other.max_y >= self.min_y
    }

    #[inline]
    fn expand_to_include(&mut self, coord: Coord<T>) {
        if self.is_null() {
            *self = AABB::new(coord.x, coord.y, coord.x, coord.y);
            return;
        }
        if coord.x < self.min_x {
            self.min_x = coord.x;
        }
        if coord.x > self.max_x {
            self.max_x = coord.x;
        }
        if coord.y < self.min_y {
            self.min_y = coord.y;
        }
        if coord.y > self.max_y {
            self.max_y = coord.y;
        }
    }

    fn expand_to_include_envelope(&mut self, other: &Self) {
        if other.is_null() {
            return;
        }
        self.expand_to_include(Coord::new(other.min_x, other.min_y));
        self.expand_to_include(Coord::new(other.max_x, other.max_y));
    }

    #[inline]
    fn width(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        self.max_x - self.min_x
    }

    #[inline]
    fn height(&self) -> T {
        if self.is_null() {
            return T::zero();
        }
        self.max_y - self.min_y
    }
}

/// Build a spatial index over `boxes`, item `i` of the index is `boxes[i]`.
///
/// # Panics
///
/// Panics if `T` fails to cast to/from a `u16`.
pub fn build_spatial_index<T, I>(boxes: I) -> StaticAABB2DIndex<T>
where
    T: IndexableNum,
    I: ExactSizeIterator<Item = AABB<T>>,
{
    let mut builder = StaticAABB2DIndexBuilder::new(boxes.len());
    for b in boxes {
        builder.add(b.min_x, b.min_y, b.max_x, b.max_y);
    }

    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast numeric type: {e}")
            }
        },
    }
}

/// Test if `q` lies in the envelope of the segment `p1 -> p2`.
#[inline]
pub fn segment_envelope_contains<T>(p1: Coord<T>, p2: Coord<T>, q: Coord<T>) -> bool
where
    T: Real,
{
    let (min_x, max_x) = min_max(p1.x, p2.x);
    let (min_y, max_y) = min_max(p1.y, p2.y);
    q.x >= min_x && q.x <= max_x && q.y >= min_y && q.y <= max_y
}

/// Test if the envelopes of segments `p1 -> p2` and `q1 -> q2` intersect.
#[inline]
pub fn segment_envelopes_intersect<T>(p1: Coord<T>, p2: Coord<T>, q1: Coord<T>, q2: Coord<T>) -> bool
where
    T: Real,
{
    let (p_min_x, p_max_x) = min_max(p1.x, p2.x);
    let (q_min_x, q_max_x) = min_max(q1.x, q2.x);
    if p_min_x > q_max_x || p_max_x < q_min_x {
        return false;
    }

    let (p_min_y, p_max_y) = min_max(p1.y, p2.y);
    let (q_min_y, q_max_y) = min_max(q1.y, q2.y);
    !(p_min_y > q_max_y || p_max_y < q_min_y)
}
