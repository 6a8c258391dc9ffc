use super::{envelope::segment_envelope_contains, orientation_index, Coord, Orientation};
use crate::{core::traits::Real, geometry::Location};

/// Counts crossings of a horizontal ray (pointing in +x direction) from a point against ring
/// segments, detecting when the point lies exactly on a segment.
///
/// Segments are fed one at a time with [RayCrossingCounter::count_segment], which allows
/// counting across several rings or a spatial index query.
#[derive(Debug, Copy, Clone)]
pub struct RayCrossingCounter<T = f64> {
    point: Coord<T>,
    crossing_count: usize,
    is_point_on_segment: bool,
}

impl<T> RayCrossingCounter<T>
where
    T: Real,
{
    pub fn new(point: Coord<T>) -> Self {
        Self {
            point,
            crossing_count: 0,
            is_point_on_segment: false,
        }
    }

    /// Count the segment `p1 -> p2`.
    pub fn count_segment(&mut self, p1: Coord<T>, p2: Coord<T>) {
        let p = self.point;

        // segment strictly left of the point
        if p1.x < p.x && p2.x < p.x {
            return;
        }

        if p.equals_2d(&p2) {
            self.is_point_on_segment = true;
            return;
        }

        // horizontal segment at the point's y
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = super::min_max(p1.x, p2.x);
            if p.x >= min_x && p.x <= max_x {
                self.is_point_on_segment = true;
            }
            return;
        }

        // segment straddles the ray (upper endpoint exclusive)
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p).index();
            if orient == 0 {
                self.is_point_on_segment = true;
                return;
            }
            if p2.y < p1.y {
                orient = -orient;
            }
            if orient > 0 {
                self.crossing_count += 1;
            }
        }
    }

    #[inline]
    pub fn is_on_segment(&self) -> bool {
        self.is_point_on_segment
    }

    /// Location of the point relative to the counted segments.
    pub fn location(&self) -> Location {
        if self.is_point_on_segment {
            return Location::Boundary;
        }

        if self.crossing_count % 2 == 1 {
            return Location::Interior;
        }

        Location::Exterior
    }
}

/// Locate `p` relative to the closed ring `ring`.
///
/// # Examples
///
/// ```
/// # use planar_overlay::core::math::*;
/// # use planar_overlay::geometry::Location;
/// let ring = [coord(0.0, 0.0), coord(4.0, 0.0), coord(4.0, 4.0), coord(0.0, 4.0), coord(0.0, 0.0)];
/// assert_eq!(locate_in_ring(coord(2.0, 2.0), &ring), Location::Interior);
/// assert_eq!(locate_in_ring(coord(4.0, 2.0), &ring), Location::Boundary);
/// assert_eq!(locate_in_ring(coord(5.0, 2.0), &ring), Location::Exterior);
/// ```
pub fn locate_in_ring<T>(p: Coord<T>, ring: &[Coord<T>]) -> Location
where
    T: Real,
{
    let mut counter = RayCrossingCounter::new(p);
    for i in 1..ring.len() {
        counter.count_segment(ring[i], ring[i - 1]);
        if counter.is_on_segment() {
            break;
        }
    }
    counter.location()
}

/// `p` is inside or on the boundary of `ring`.
#[inline]
pub fn is_in_ring<T>(p: Coord<T>, ring: &[Coord<T>]) -> bool
where
    T: Real,
{
    locate_in_ring(p, ring) != Location::Exterior
}

/// `p` lies on the segment `p0 -> p1`.
#[inline]
pub fn is_on_segment<T>(p: Coord<T>, p0: Coord<T>, p1: Coord<T>) -> bool
where
    T: Real,
{
    segment_envelope_contains(p0, p1, p)
        && orientation_index(p0, p1, p) == Orientation::Collinear
}

/// `p` lies on a vertex or segment of the line `line`.
pub fn is_on_line<T>(p: Coord<T>, line: &[Coord<T>]) -> bool
where
    T: Real,
{
    match line.len() {
        0 => false,
        1 => line[0].equals_2d(&p),
        _ => line.windows(2).any(|w| is_on_segment(p, w[0], w[1])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::coord;

    fn ring_with_notch() -> Vec<Coord<f64>> {
        vec![
            coord(0.0, 0.0),
            coord(10.0, 0.0),
            coord(10.0, 10.0),
            coord(5.0, 5.0),
            coord(0.0, 10.0),
            coord(0.0, 0.0),
        ]
    }

    #[test]
    fn locate_ray_through_vertex() {
        let ring = ring_with_notch();
        // ray from (2, 5) passes exactly through the notch vertex (5, 5)
        assert_eq!(locate_in_ring(coord(2.0, 5.0), &ring), Location::Interior);
        assert_eq!(locate_in_ring(coord(5.0, 7.0), &ring), Location::Exterior);
        assert_eq!(locate_in_ring(coord(5.0, 5.0), &ring), Location::Boundary);
        assert_eq!(locate_in_ring(coord(7.5, 7.5), &ring), Location::Boundary);
        assert_eq!(locate_in_ring(coord(-1.0, 5.0), &ring), Location::Exterior);
    }

    #[test]
    fn orientation_independent() {
        let mut ring = ring_with_notch();
        ring.reverse();
        assert_eq!(locate_in_ring(coord(2.0, 5.0), &ring), Location::Interior);
        assert!(is_in_ring(coord(0.0, 3.0), &ring));
    }

    #[test]
    fn on_line() {
        let line = [coord(0.0, 0.0), coord(2.0, 2.0), coord(4.0, 0.0)];
        assert!(is_on_line(coord(1.0, 1.0), &line));
        assert!(is_on_line(coord(3.0, 1.0), &line));
        assert!(!is_on_line(coord(2.0, 0.0), &line));
        assert!(is_on_line(coord(0.0, 0.0), &line[..1]));
    }
}
