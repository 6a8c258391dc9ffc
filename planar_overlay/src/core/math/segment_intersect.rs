use super::{
    envelope::{segment_envelope_contains, segment_envelopes_intersect},
    orientation_index, Coord,
};
use crate::core::traits::Real;

/// Holds the result of intersecting two line segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SegSegIntr<T = f64> {
    /// Segments do not intersect.
    NoIntersect,
    /// Segments intersect at a single point.
    Point {
        point: Coord<T>,
        /// Intersection lies in the interior of both segments (not at any endpoint).
        is_proper: bool,
    },
    /// Segments are collinear and overlap along a sub segment.
    Collinear { point1: Coord<T>, point2: Coord<T> },
}

/// Finds the intersect between segments `p1 -> p2` and `q1 -> q2`.
///
/// Classification uses the robust [orientation_index] predicate so the result kind is always
/// topologically consistent. Proper intersection points are computed after translating the
/// segments towards the origin (by the center of their envelope overlap) to condition the
/// arithmetic, and clamped to the nearest segment endpoint if rounding places them outside the
/// segment envelopes.
///
/// # Examples
///
/// ```
/// # use planar_overlay::core::math::*;
/// let r = seg_seg_intr(
///     Coord::new(0.0, 0.0),
///     Coord::new(2.0, 2.0),
///     Coord::new(0.0, 2.0),
///     Coord::new(2.0, 0.0),
/// );
/// if let SegSegIntr::Point { point, is_proper } = r {
///     assert!(point.equals_2d(&Coord::new(1.0, 1.0)));
///     assert!(is_proper);
/// } else {
///     unreachable!("expected point intersection");
/// }
/// ```
pub fn seg_seg_intr<T>(p1: Coord<T>, p2: Coord<T>, q1: Coord<T>, q2: Coord<T>) -> SegSegIntr<T>
where
    T: Real,
{
    use SegSegIntr::*;

    if !segment_envelopes_intersect(p1, p2, q1, q2) {
        return NoIntersect;
    }

    let pq1 = orientation_index(p1, p2, q1).index();
    let pq2 = orientation_index(p1, p2, q2).index();
    if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
        return NoIntersect;
    }

    let qp1 = orientation_index(q1, q2, p1).index();
    let qp2 = orientation_index(q1, q2, p2).index();
    if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
        return NoIntersect;
    }

    if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
        return collinear_intr(p1, p2, q1, q2);
    }

    if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
        // an endpoint touches the other segment, prefer shared endpoints so that the
        // intersection is exactly an input vertex
        let point = if p1.equals_2d(&q1) || p1.equals_2d(&q2) {
            p1
        } else if p2.equals_2d(&q1) || p2.equals_2d(&q2) {
            p2
        } else if pq1 == 0 {
            q1
        } else if pq2 == 0 {
            q2
        } else if qp1 == 0 {
            p1
        } else {
            p2
        };

        return Point {
            point,
            is_proper: false,
        };
    }

    Point {
        point: proper_intersection_point(p1, p2, q1, q2),
        is_proper: true,
    }
}

fn collinear_intr<T>(p1: Coord<T>, p2: Coord<T>, q1: Coord<T>, q2: Coord<T>) -> SegSegIntr<T>
where
    T: Real,
{
    use SegSegIntr::*;

    let p1q1p2 = segment_envelope_contains(p1, p2, q1);
    let p1q2p2 = segment_envelope_contains(p1, p2, q2);
    let q1p1q2 = segment_envelope_contains(q1, q2, p1);
    let q1p2q2 = segment_envelope_contains(q1, q2, p2);

    let single_or_collinear = |a: Coord<T>, b: Coord<T>, touch_only: bool| {
        if a.equals_2d(&b) && touch_only {
            Point {
                point: a,
                is_proper: false,
            }
        } else {
            Collinear {
                point1: a,
                point2: b,
            }
        }
    };

    if p1q1p2 && p1q2p2 {
        return Collinear {
            point1: q1,
            point2: q2,
        };
    }
    if q1p1q2 && q1p2q2 {
        return Collinear {
            point1: p1,
            point2: p2,
        };
    }
    if p1q1p2 && q1p1q2 {
        return single_or_collinear(q1, p1, !p1q2p2 && !q1p2q2);
    }
    if p1q1p2 && q1p2q2 {
        return single_or_collinear(q1, p2, !p1q2p2 && !q1p1q2);
    }
    if p1q2p2 && q1p1q2 {
        return single_or_collinear(q2, p1, !p1q1p2 && !q1p2q2);
    }
    if p1q2p2 && q1p2q2 {
        return single_or_collinear(q2, p2, !p1q1p2 && !q1p1q2);
    }

    NoIntersect
}

fn proper_intersection_point<T>(p1: Coord<T>, p2: Coord<T>, q1: Coord<T>, q2: Coord<T>) -> Coord<T>
where
    T: Real,
{
    let (p1x, p1y) = (p1.x.as_f64(), p1.y.as_f64());
    let (p2x, p2y) = (p2.x.as_f64(), p2.y.as_f64());
    let (q1x, q1y) = (q1.x.as_f64(), q1.y.as_f64());
    let (q2x, q2y) = (q2.x.as_f64(), q2.y.as_f64());

    // center of the overlap of the two segment envelopes
    let min_x = p1x.min(p2x).max(q1x.min(q2x));
    let max_x = p1x.max(p2x).min(q1x.max(q2x));
    let min_y = p1y.min(p2y).max(q1y.min(q2y));
    let max_y = p1y.max(p2y).min(q1y.max(q2y));
    let mid_x = (min_x + max_x) / 2.0;
    let mid_y = (min_y + max_y) / 2.0;

    let (p1x, p1y, p2x, p2y) = (p1x - mid_x, p1y - mid_y, p2x - mid_x, p2y - mid_y);
    let (q1x, q1y, q2x, q2y) = (q1x - mid_x, q1y - mid_y, q2x - mid_x, q2y - mid_y);

    // homogeneous line coefficients
    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;
    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = x / w + mid_x;
    let y_int = y / w + mid_y;

    if !x_int.is_finite() || !y_int.is_finite() {
        return nearest_endpoint(p1, p2, q1, q2);
    }

    let result = Coord::new(T::from_f64(x_int), T::from_f64(y_int));
    if segment_envelope_contains(p1, p2, result) && segment_envelope_contains(q1, q2, result) {
        result
    } else {
        nearest_endpoint(p1, p2, q1, q2)
    }
}

/// The endpoint of either segment closest to the other segment.
fn nearest_endpoint<T>(p1: Coord<T>, p2: Coord<T>, q1: Coord<T>, q2: Coord<T>) -> Coord<T>
where
    T: Real,
{
    let mut nearest = p1;
    let mut min_dist = point_segment_distance(p1, q1, q2);

    for (pt, seg_start, seg_end) in [(p2, q1, q2), (q1, p1, p2), (q2, p1, p2)] {
        let dist = point_segment_distance(pt, seg_start, seg_end);
        if dist < min_dist {
            min_dist = dist;
            nearest = pt;
        }
    }

    nearest
}

/// Shortest distance from `p` to the segment `a -> b`.
pub fn point_segment_distance<T>(p: Coord<T>, a: Coord<T>, b: Coord<T>) -> T
where
    T: Real,
{
    if a.equals_2d(&b) {
        return p.distance(a);
    }

    let ab = b - a;
    let t = (p - a).dot(ab) / ab.dot(ab);
    if t <= T::zero() {
        return p.distance(a);
    }
    if t >= T::one() {
        return p.distance(b);
    }

    let proj = Coord::new(a.x + t * ab.x, a.y + t * ab.y);
    p.distance(proj)
}

/// Distance metric of `p` along the segment `p0 -> p1`.
///
/// This is not the euclidean distance but a cheap monotone measure (the larger of the x or y
/// offset) which is exact for points produced by intersecting the segment. It is used only to
/// order intersections along a segment.
pub fn edge_distance<T>(p: Coord<T>, p0: Coord<T>, p1: Coord<T>) -> T
where
    T: Real,
{
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if p.equals_2d(&p0) {
        return T::zero();
    }

    if p.equals_2d(&p1) {
        return if dx > dy { dx } else { dy };
    }

    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };

    // tiny segments can round the primary offset to zero
    if dist == T::zero() {
        return num_traits::real::Real::max(pdx, pdy);
    }

    dist
}

/// Line intersector result bound to its input segments.
///
/// Wraps [seg_seg_intr] with the queries the topology graph needs: the intersection points by
/// index, whether a point is one of the intersections, and edge distances along either input.
#[derive(Debug, Copy, Clone)]
pub struct SegmentIntersection<T = f64> {
    pub result: SegSegIntr<T>,
    pub input: [[Coord<T>; 2]; 2],
}

impl<T> SegmentIntersection<T>
where
    T: Real,
{
    pub fn compute(p1: Coord<T>, p2: Coord<T>, q1: Coord<T>, q2: Coord<T>) -> Self {
        Self {
            result: seg_seg_intr(p1, p2, q1, q2),
            input: [[p1, p2], [q1, q2]],
        }
    }

    /// Number of intersection points (0, 1 or 2).
    #[inline]
    pub fn intersection_count(&self) -> usize {
        match self.result {
            SegSegIntr::NoIntersect => 0,
            SegSegIntr::Point { .. } => 1,
            SegSegIntr::Collinear { .. } => 2,
        }
    }

    #[inline]
    pub fn has_intersection(&self) -> bool {
        !matches!(self.result, SegSegIntr::NoIntersect)
    }

    /// Intersection point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.intersection_count()`.
    pub fn intersection(&self, index: usize) -> Coord<T> {
        match (self.result, index) {
            (SegSegIntr::Point { point, .. }, 0) => point,
            (SegSegIntr::Collinear { point1, .. }, 0) => point1,
            (SegSegIntr::Collinear { point2, .. }, 1) => point2,
            _ => panic!(
                "intersection index {} out of range (count {})",
                index,
                self.intersection_count()
            ),
        }
    }

    #[inline]
    pub fn is_proper(&self) -> bool {
        matches!(
            self.result,
            SegSegIntr::Point {
                is_proper: true,
                ..
            }
        )
    }

    #[inline]
    pub fn is_collinear(&self) -> bool {
        matches!(self.result, SegSegIntr::Collinear { .. })
    }

    /// `pt` equals one of the computed intersection points.
    pub fn is_intersection(&self, pt: Coord<T>) -> bool {
        (0..self.intersection_count()).any(|i| self.intersection(i).equals_2d(&pt))
    }

    /// Some intersection point is not an endpoint of input segment `seg_index` (0 or 1).
    pub fn is_interior_intersection_of(&self, seg_index: usize) -> bool {
        let [s0, s1] = self.input[seg_index];
        (0..self.intersection_count()).any(|i| {
            let pt = self.intersection(i);
            !pt.equals_2d(&s0) && !pt.equals_2d(&s1)
        })
    }

    /// Some intersection point is interior to either input segment.
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_of(0) || self.is_interior_intersection_of(1)
    }

    /// Edge distance of intersection `int_index` along input segment `seg_index` (0 or 1).
    pub fn edge_distance(&self, seg_index: usize, int_index: usize) -> T {
        let [s0, s1] = self.input[seg_index];
        edge_distance(self.intersection(int_index), s0, s1)
    }
}
