use super::{orientation_index, Coord, Orientation};
use crate::core::traits::Real;

/// Copy of `coords` with consecutive duplicate coordinates removed.
///
/// # Examples
///
/// ```
/// # use planar_overlay::core::math::*;
/// let pts = [coord(0.0, 0.0), coord(0.0, 0.0), coord(1.0, 0.0), coord(1.0, 0.0)];
/// assert_eq!(remove_repeated_points(&pts), vec![coord(0.0, 0.0), coord(1.0, 0.0)]);
/// ```
pub fn remove_repeated_points<T>(coords: &[Coord<T>]) -> Vec<Coord<T>>
where
    T: Real,
{
    let mut result: Vec<Coord<T>> = Vec::with_capacity(coords.len());
    for c in coords {
        match result.last() {
            Some(last) if last.equals_2d(c) => {}
            _ => result.push(*c),
        }
    }
    result
}

/// `true` if `coords` contains two consecutive equal coordinates.
pub fn has_repeated_points<T>(coords: &[Coord<T>]) -> bool
where
    T: Real,
{
    coords.windows(2).any(|w| w[0].equals_2d(&w[1]))
}

/// Signed area of a closed ring using the shoelace formula, positive if the ring is counter
/// clockwise.
pub fn signed_area<T>(ring: &[Coord<T>]) -> T
where
    T: Real,
{
    if ring.len() < 3 {
        return T::zero();
    }

    let x0 = ring[0].x;
    let mut sum = T::zero();
    for i in 1..ring.len() - 1 {
        let x = ring[i].x - x0;
        let y1 = ring[i + 1].y;
        let y2 = ring[i - 1].y;
        sum = sum + x * (y2 - y1);
    }

    -sum / T::two()
}

/// Robust test for counter clockwise orientation of a closed ring (first coordinate repeated at
/// the end).
///
/// The orientation is decided at the highest vertex of the ring using [orientation_index], so it is
/// correct for rings with self touching vertices and flat sections. Rings with fewer than three
/// distinct points and flat rings are reported as not counter clockwise.
pub fn is_ccw<T>(ring: &[Coord<T>]) -> bool
where
    T: Real,
{
    if ring.len() < 4 {
        return false;
    }

    let n_pts = ring.len() - 1;

    // upward segment ending at the highest point
    let mut up_hi_pt = ring[0];
    let mut prev_y = up_hi_pt.y;
    let mut up_low_pt = ring[0];
    let mut i_up_hi = 0;
    for i in 1..=n_pts {
        let py = ring[i].y;
        if py > prev_y && py >= up_hi_pt.y {
            up_hi_pt = ring[i];
            i_up_hi = i;
            up_low_pt = ring[i - 1];
        }
        prev_y = py;
    }

    if i_up_hi == 0 {
        // flat ring
        return false;
    }

    // downward segment leaving the highest point (skipping a flat top)
    let mut i_down_low = i_up_hi;
    loop {
        i_down_low = (i_down_low + 1) % n_pts;
        if i_down_low == i_up_hi || ring[i_down_low].y != up_hi_pt.y {
            break;
        }
    }

    let down_low_pt = ring[i_down_low];
    let i_down_hi = if i_down_low > 0 {
        i_down_low - 1
    } else {
        n_pts - 1
    };
    let down_hi_pt = ring[i_down_hi];

    if up_hi_pt.equals_2d(&down_hi_pt) {
        // single highest point: a collapsed spike has no orientation
        if up_low_pt.equals_2d(&up_hi_pt)
            || down_low_pt.equals_2d(&up_hi_pt)
            || up_low_pt.equals_2d(&down_low_pt)
        {
            return false;
        }

        orientation_index(up_low_pt, up_hi_pt, down_low_pt) == Orientation::CounterClockwise
    } else {
        // flat top, direction along it decides
        down_hi_pt.x - up_hi_pt.x < T::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::coord;

    fn square_ccw() -> Vec<Coord<f64>> {
        vec![
            coord(0.0, 0.0),
            coord(10.0, 0.0),
            coord(10.0, 10.0),
            coord(0.0, 10.0),
            coord(0.0, 0.0),
        ]
    }

    #[test]
    fn orientation_of_square() {
        let mut ring = square_ccw();
        assert!(is_ccw(&ring));
        assert_eq!(signed_area(&ring), 100.0);
        ring.reverse();
        assert!(!is_ccw(&ring));
        assert_eq!(signed_area(&ring), -100.0);
    }

    #[test]
    fn orientation_with_single_top_vertex() {
        let ring = vec![
            coord(0.0, 0.0),
            coord(4.0, 0.0),
            coord(2.0, 3.0),
            coord(0.0, 0.0),
        ];
        assert!(is_ccw(&ring));
        let rev: Vec<_> = ring.iter().rev().copied().collect();
        assert!(!is_ccw(&rev));
    }

    #[test]
    fn degenerate_rings_are_not_ccw() {
        let flat = vec![coord(0.0, 0.0), coord(1.0, 0.0), coord(0.0, 0.0)];
        assert!(!is_ccw(&flat));
        let spike = vec![
            coord(0.0, 0.0),
            coord(1.0, 1.0),
            coord(2.0, 2.0),
            coord(1.0, 1.0),
            coord(0.0, 0.0),
        ];
        assert!(!is_ccw(&spike));
    }

    #[test]
    fn repeated_points() {
        let pts = [coord(0.0, 0.0), coord(1.0, 0.0), coord(1.0, 0.0)];
        assert!(has_repeated_points(&pts));
        assert!(!has_repeated_points(&remove_repeated_points(&pts)));
    }
}
