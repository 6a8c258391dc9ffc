use super::ring_corners;
use planar_overlay::{Coord, LineString};

/// Rings enclose the same area with the same corners, ignoring start vertex, orientation and
/// collinear vertexes.
pub fn rings_topologically_equal(a: &LineString, b: &LineString) -> bool {
    let a = ring_corners(a);
    let mut b = ring_corners(b);
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }

    let matches_rotation = |b: &[Coord]| {
        (0..b.len()).any(|offset| {
            a.iter()
                .enumerate()
                .all(|(i, p)| p.equals_2d(&b[(i + offset) % b.len()]))
        })
    };

    if matches_rotation(&b) {
        return true;
    }
    b.reverse();
    matches_rotation(&b)
}
